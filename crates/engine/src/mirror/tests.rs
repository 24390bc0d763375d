use super::*;
use crate::comparator::FileVerdict;
use test_support::{create_test_tree, setup_mirror_test, setup_mirror_test_with_dest};
use walk::WalkEntry;

fn entry_for(path: &Path) -> WalkEntry {
    WalkBuilder::new(path)
        .build()
        .expect("walker")
        .next()
        .expect("root entry")
        .expect("metadata")
}

fn classify_pair(
    source: &[u8],
    dest: &[u8],
) -> (FileVerdict, MirrorSummary, tempfile::TempDir) {
    let ctx = setup_mirror_test_with_dest();
    ctx.write_source("file.bin", source);
    ctx.write_dest("file.bin", dest);

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &options);
    let entry = entry_for(&roots.destination().join("file.bin"));
    let verdict = run
        .classify(&entry, &roots.source().join("file.bin"))
        .expect("classify");
    (verdict, run.finish(), ctx.temp_dir)
}

#[test]
fn classify_identical_files_are_kept() {
    let (verdict, summary, _temp) = classify_pair(b"same bytes", b"same bytes");
    assert_eq!(verdict, FileVerdict::Identical);
    assert_eq!(summary.contents_compared(), 1);
}

#[test]
fn classify_size_mismatch_skips_digest() {
    let (verdict, summary, _temp) = classify_pair(b"longer content", b"short");
    assert_eq!(verdict, FileVerdict::SizeMismatch);
    assert_eq!(summary.contents_compared(), 0);
}

#[test]
fn classify_same_size_different_bytes_is_content_mismatch() {
    let (verdict, summary, _temp) = classify_pair(b"hello", b"world");
    assert_eq!(verdict, FileVerdict::ContentMismatch);
    assert_eq!(summary.contents_compared(), 1);
}

#[test]
fn classify_missing_and_type_mismatch() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(&ctx.source, &[("was-file", None)]);
    create_test_tree(
        &ctx.dest,
        &[("was-file", Some(b"x")), ("orphan.txt", Some(b"y"))],
    );

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &options);

    let orphan = entry_for(&roots.destination().join("orphan.txt"));
    assert_eq!(
        run.classify(&orphan, &roots.source().join("orphan.txt"))
            .expect("classify"),
        FileVerdict::Missing
    );

    let shadowed = entry_for(&roots.destination().join("was-file"));
    assert_eq!(
        run.classify(&shadowed, &roots.source().join("was-file"))
            .expect("classify"),
        FileVerdict::TypeMismatch
    );
    assert_eq!(run.finish().contents_compared(), 0);
}

#[test]
fn ensure_destination_root_creates_missing_root_once() {
    let ctx = setup_mirror_test();
    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();

    let mut run = MirrorRun::new(&roots, &options);
    run.ensure_destination_root().expect("create root");
    run.ensure_destination_root().expect("existing root is fine");

    assert!(ctx.dest.is_dir());
    assert_eq!(run.finish().directories_created(), 1);
}

#[test]
fn ensure_destination_root_rejects_file_destination() {
    let ctx = setup_mirror_test();
    std::fs::write(&ctx.dest, b"not a directory").expect("write dest file");
    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();

    let error = MirrorRun::new(&roots, &options)
        .ensure_destination_root()
        .expect_err("file destination");
    assert!(error.is_io());
    assert_eq!(error.path(), roots.destination());
}

#[test]
fn deletion_pass_collects_orphans_in_walk_order() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(&ctx.source, &[("kept", None)]);
    create_test_tree(
        &ctx.dest,
        &[("kept", None), ("gone/inner", None), ("gone/inner/f.txt", Some(b"f"))],
    );

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default().prune_empty_directories(true);
    let mut run = MirrorRun::new(&roots, &options);
    let orphans = run.deletion_pass().expect("deletion pass");

    let expected: Vec<PathBuf> = vec![
        roots.destination().join("gone"),
        roots.destination().join("gone/inner"),
    ];
    assert_eq!(orphans, expected);
    assert!(!ctx.dest.join("gone/inner/f.txt").exists());
    assert_eq!(run.finish().files_deleted(), 1);
}

#[test]
fn deletion_pass_clears_orphans_shadowing_a_source_file() {
    let ctx = setup_mirror_test_with_dest();
    ctx.write_source("entry", b"file");
    create_test_tree(
        &ctx.dest,
        &[("entry/sub/deep.txt", Some(b"d")), ("entry/top.txt", Some(b"t"))],
    );

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default().prune_empty_directories(true);
    let mut run = MirrorRun::new(&roots, &options);
    let orphans = run.deletion_pass().expect("deletion pass");

    assert_eq!(
        orphans,
        vec![roots.destination().join("entry"), roots.destination().join("entry/sub")]
    );
    assert!(!ctx.dest.join("entry/sub/deep.txt").exists());
    assert!(!ctx.dest.join("entry/top.txt").exists());
    assert_eq!(run.finish().files_deleted(), 2);
}

#[test]
fn deletion_pass_without_pruning_reports_no_orphans() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(&ctx.dest, &[("gone/inner", None)]);

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let orphans = MirrorRun::new(&roots, &options)
        .deletion_pass()
        .expect("deletion pass");
    assert!(orphans.is_empty());
}

#[test]
fn prune_orphans_removes_children_before_parents() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(&ctx.dest, &[("a/b/c", None)]);

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default().prune_empty_directories(true);
    let mut run = MirrorRun::new(&roots, &options);
    let orphans = vec![ctx.dest.join("a"), ctx.dest.join("a/b"), ctx.dest.join("a/b/c")];

    run.prune_orphans(orphans).expect("prune");
    assert!(!ctx.dest.join("a").exists());
    assert_eq!(run.finish().directories_pruned(), 3);
}

#[test]
fn prune_orphans_keeps_non_empty_directories() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(&ctx.dest, &[("a/keep.txt", Some(b"still here"))]);

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default().prune_empty_directories(true);
    let mut run = MirrorRun::new(&roots, &options);

    run.prune_orphans(vec![ctx.dest.join("a")]).expect("prune");
    assert!(ctx.dest.join("a/keep.txt").exists());
    assert_eq!(run.finish().directories_pruned(), 0);
}

#[test]
fn copy_pass_creates_directories_and_files() {
    let ctx = setup_mirror_test_with_dest();
    create_test_tree(
        &ctx.source,
        &[("empty", None), ("nested/deep/file.txt", Some(b"deep"))],
    );

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &options);
    run.copy_pass().expect("copy pass");
    let summary = run.finish();

    assert!(ctx.dest_is_dir("empty"));
    assert_eq!(ctx.read_dest("nested/deep/file.txt"), b"deep");
    assert_eq!(summary.directories_created(), 3);
    assert_eq!(summary.files_copied(), 1);
    assert_eq!(summary.bytes_copied(), 4);
}

#[test]
fn copy_pass_leaves_existing_files_alone() {
    let ctx = setup_mirror_test_with_dest();
    ctx.write_source("file.txt", b"source");
    ctx.write_dest("file.txt", b"destination");

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &options);
    run.copy_pass().expect("copy pass");

    assert_eq!(ctx.read_dest("file.txt"), b"destination");
    assert_eq!(run.finish().files_copied(), 0);
}

#[cfg(unix)]
#[test]
fn unfollowed_link_obeys_policy() {
    let ctx = setup_mirror_test_with_dest();
    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let link = roots.source().join("link");

    let skip = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &skip);
    run.unfollowed_link(&link).expect("skip");
    assert_eq!(run.finish().entries_skipped(), 1);

    let reject = MirrorOptions::default().symlink_policy(SymlinkPolicy::Reject);
    let error = MirrorRun::new(&roots, &reject)
        .unfollowed_link(&link)
        .expect_err("reject");
    assert!(matches!(error, MirrorError::SymlinkRejected { ref path } if path == &link));
}

#[test]
fn is_absent_covers_missing_and_non_directory_parents() {
    assert!(is_absent(&io::Error::from(io::ErrorKind::NotFound)));
    assert!(is_absent(&io::Error::from(io::ErrorKind::NotADirectory)));
    assert!(!is_absent(&io::Error::from(io::ErrorKind::PermissionDenied)));
}

#[test]
fn is_missing_only_accepts_not_found() {
    assert!(is_missing(&io::Error::from(io::ErrorKind::NotFound)));
    assert!(!is_missing(&io::Error::from(io::ErrorKind::NotADirectory)));
    assert!(!is_missing(&io::Error::from(io::ErrorKind::PermissionDenied)));
}

#[cfg(unix)]
#[test]
fn classify_fails_when_source_parent_is_a_file() {
    let ctx = setup_mirror_test_with_dest();
    ctx.write_source("entry", b"file");
    ctx.write_dest("entry/child.txt", b"old");

    let roots = resolve_roots(&ctx.source, &ctx.dest).expect("roots");
    let options = MirrorOptions::default();
    let mut run = MirrorRun::new(&roots, &options);
    let entry = entry_for(&roots.destination().join("entry/child.txt"));
    let error = run
        .classify(&entry, &roots.source().join("entry/child.txt"))
        .expect_err("source parent is a file");

    assert!(error.is_io());
    assert_eq!(
        error.io_error().map(io::Error::kind),
        Some(io::ErrorKind::NotADirectory)
    );
}
