#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Fixtures shared by the dirmirror test suites.
//!
//! Everything here panics on failure: these helpers only run inside tests,
//! where a failed setup step should stop the test with a clear message.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

// ==================== Test Context ====================

/// Self-contained source/destination pair inside a temporary directory.
///
/// The source directory is created; the destination is not, so tests decide
/// whether it exists up front.
pub struct MirrorTestContext {
    /// Temporary directory that must be kept alive for the paths to stay valid.
    pub temp_dir: TempDir,
    /// Source directory path (already created).
    pub source: PathBuf,
    /// Destination directory path (NOT created by default).
    pub dest: PathBuf,
}

impl MirrorTestContext {
    /// Returns an additional path within the temp directory.
    #[must_use]
    pub fn additional_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Creates a file in the source tree, creating parents as needed.
    pub fn write_source(&self, relative_path: &str, content: &[u8]) {
        write_file(&self.source.join(relative_path), content);
    }

    /// Creates a file in the destination tree, creating parents as needed.
    pub fn write_dest(&self, relative_path: &str, content: &[u8]) {
        write_file(&self.dest.join(relative_path), content);
    }

    /// Reads a file from the destination tree.
    #[must_use]
    pub fn read_dest(&self, relative_path: &str) -> Vec<u8> {
        fs::read(self.dest.join(relative_path)).expect("read dest file")
    }

    /// Checks whether anything exists at a destination path, links included.
    #[must_use]
    pub fn dest_exists(&self, relative_path: &str) -> bool {
        fs::symlink_metadata(self.dest.join(relative_path)).is_ok()
    }

    /// Checks whether a destination path is a directory.
    #[must_use]
    pub fn dest_is_dir(&self, relative_path: &str) -> bool {
        self.dest.join(relative_path).is_dir()
    }

    /// Checks whether a destination path is a regular file.
    #[must_use]
    pub fn dest_is_file(&self, relative_path: &str) -> bool {
        self.dest.join(relative_path).is_file()
    }
}

// ==================== Setup Functions ====================

/// Creates a test context with an existing source and a missing destination.
#[must_use]
pub fn setup_mirror_test() -> MirrorTestContext {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let source = temp_dir.path().join("source");
    let dest = temp_dir.path().join("dest");
    fs::create_dir_all(&source).expect("create source");
    MirrorTestContext {
        temp_dir,
        source,
        dest,
    }
}

/// Creates a test context whose destination directory already exists.
#[must_use]
pub fn setup_mirror_test_with_dest() -> MirrorTestContext {
    let ctx = setup_mirror_test();
    fs::create_dir_all(&ctx.dest).expect("create dest");
    ctx
}

// ==================== Tree Creation ====================

/// Creates a directory tree for testing.
///
/// Each entry is `(path, content)`: `Some(data)` writes a file, `None`
/// creates an empty directory. Parent directories are created as needed.
///
/// ```ignore
/// create_test_tree(temp.path(), &[
///     ("dir1/file1.txt", Some(b"content1")),
///     ("dir2/subdir", None),
/// ]);
/// ```
pub fn create_test_tree(base: &Path, spec: &[(&str, Option<&[u8]>)]) {
    for (path, content) in spec {
        let full_path = base.join(path);
        if let Some(data) = content {
            write_file(&full_path, data);
        } else {
            fs::create_dir_all(&full_path).expect("create directory");
        }
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, content).expect("write file");
}

/// Creates a symbolic link (Unix only).
#[cfg(unix)]
pub fn create_symlink(target: &Path, link_path: &Path) {
    if let Some(parent) = link_path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    std::os::unix::fs::symlink(target, link_path).expect("create symlink");
}

/// Sets the permission bits of a path (Unix only).
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("set permissions");
}

// ==================== Tree Snapshots ====================

/// One entry of a [`snapshot_tree`] result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    /// A directory and its permission bits.
    Dir {
        /// Permission bits (`0` on platforms without Unix modes).
        mode: u32,
    },
    /// A regular file, its bytes, and its permission bits.
    File {
        /// File content.
        content: Vec<u8>,
        /// Permission bits (`0` on platforms without Unix modes).
        mode: u32,
    },
    /// A symbolic link and the path it points to.
    Symlink {
        /// Link target as stored in the link.
        target: PathBuf,
    },
    /// Anything else, such as a FIFO.
    Other,
}

/// Records every entry under `root`, keyed by its path relative to `root`.
///
/// The root itself is not included. Links are recorded, never followed.
#[must_use]
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, TreeNode> {
    let mut nodes = BTreeMap::new();
    collect(root, Path::new(""), &mut nodes);
    nodes
}

fn collect(dir: &Path, prefix: &Path, nodes: &mut BTreeMap<PathBuf, TreeNode>) {
    for entry in fs::read_dir(dir).expect("read dir") {
        let entry = entry.expect("dir entry");
        let path = entry.path();
        let relative = prefix.join(entry.file_name());
        let metadata = fs::symlink_metadata(&path).expect("symlink metadata");
        let file_type = metadata.file_type();

        let node = if file_type.is_symlink() {
            TreeNode::Symlink {
                target: fs::read_link(&path).expect("read link"),
            }
        } else if file_type.is_dir() {
            collect(&path, &relative, nodes);
            TreeNode::Dir {
                mode: mode_of(&metadata),
            }
        } else if file_type.is_file() {
            TreeNode::File {
                content: fs::read(&path).expect("read file"),
                mode: mode_of(&metadata),
            }
        } else {
            TreeNode::Other
        };
        nodes.insert(relative, node);
    }
}

#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(_metadata: &fs::Metadata) -> u32 {
    0
}

/// Asserts that `dest` holds exactly the files of `source` with the same
/// content and file modes, and that every source directory exists in `dest`.
///
/// Extra empty directories in `dest` are allowed, since directories are kept
/// unless pruning is enabled. Directory modes are not compared because
/// directory creation is subject to the process umask.
pub fn assert_mirrors(source: &Path, dest: &Path) {
    let source_nodes = snapshot_tree(source);
    let dest_nodes = snapshot_tree(dest);

    for (path, node) in &source_nodes {
        match node {
            TreeNode::File { .. } => assert_eq!(
                dest_nodes.get(path),
                Some(node),
                "destination file {} differs from source",
                path.display()
            ),
            TreeNode::Dir { .. } => assert!(
                matches!(dest_nodes.get(path), Some(TreeNode::Dir { .. })),
                "destination is missing directory {}",
                path.display()
            ),
            TreeNode::Symlink { .. } | TreeNode::Other => {}
        }
    }

    for (path, node) in &dest_nodes {
        if matches!(node, TreeNode::File { .. }) {
            assert!(
                source_nodes.contains_key(path),
                "destination holds unexpected file {}",
                path.display()
            );
        }
    }
}
