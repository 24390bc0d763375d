//! Two-pass mirror of a source tree onto a destination tree.
//!
//! A run moves through a fixed sequence of phases:
//!
//! 1. resolve both roots and make sure the destination root exists;
//! 2. the deletion pass walks the destination and removes every file that has
//!    no identical regular-file counterpart in the source;
//! 3. when enabled, orphan directories emptied by the deletion pass are pruned;
//! 4. the copy pass walks the source, creating missing directories and copying
//!    missing files with their permission bits.
//!
//! The first failure aborts the run. Nothing is rolled back, and running again
//! over the same roots picks up where the failed run stopped.

mod copy;
mod deletion;
mod prune;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use logging::{trace_copy, trace_skip};
use walk::{WalkBuilder, Walker};

use crate::comparator::ContentComparator;
use crate::error::MirrorError;
use crate::fs_ops::create_dir_all_with_mode;
use crate::options::{MirrorOptions, SymlinkPolicy};
use crate::paths::{RootPair, resolve_roots};
use crate::summary::MirrorSummary;

/// Makes `destination` an exact one-way mirror of `source`.
///
/// On success every file and directory under `source` exists under
/// `destination` with identical content, files carry the source permission
/// bits, and every destination file without an identical source counterpart
/// has been deleted. Files already identical are left untouched, including
/// their timestamps.
///
/// # Errors
///
/// Returns the first [`MirrorError`] encountered; the destination may then be
/// partially mirrored.
///
/// # Examples
///
/// ```
/// use engine::{MirrorOptions, mirror};
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let source = temp.path().join("source");
/// std::fs::create_dir_all(source.join("docs"))?;
/// std::fs::write(source.join("docs/readme.txt"), b"hello")?;
///
/// let destination = temp.path().join("dest");
/// let summary = mirror(&source, &destination, &MirrorOptions::default())?;
///
/// assert_eq!(summary.files_copied(), 1);
/// assert_eq!(std::fs::read(destination.join("docs/readme.txt"))?, b"hello");
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn mirror(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &MirrorOptions,
) -> Result<MirrorSummary, MirrorError> {
    let roots = resolve_roots(source, destination)?;
    let mut run = MirrorRun::new(&roots, options);

    run.ensure_destination_root()?;
    let orphans = run.deletion_pass()?;
    if options.prunes_empty_directories() {
        run.prune_orphans(orphans)?;
    }
    run.copy_pass()?;

    Ok(run.finish())
}

/// Mirrors `source` onto `destination` with default options.
///
/// # Errors
///
/// Same as [`mirror`].
pub fn sync(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<(), MirrorError> {
    mirror(source, destination, &MirrorOptions::default()).map(|_| ())
}

/// State shared by the phases of one run.
struct MirrorRun<'a> {
    roots: &'a RootPair,
    options: &'a MirrorOptions,
    comparator: ContentComparator,
    summary: MirrorSummary,
}

impl<'a> MirrorRun<'a> {
    fn new(roots: &'a RootPair, options: &'a MirrorOptions) -> Self {
        Self {
            roots,
            options,
            comparator: ContentComparator::new(
                options.digest_algorithm_kind(),
                options.digest_buffer_size_bytes(),
            ),
            summary: MirrorSummary::default(),
        }
    }

    fn finish(self) -> MirrorSummary {
        self.summary
    }

    fn ensure_destination_root(&mut self) -> Result<(), MirrorError> {
        let destination = self.roots.destination();
        match fs::metadata(destination) {
            Ok(metadata) if metadata.is_dir() => return Ok(()),
            Ok(_) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                return Err(MirrorError::io("inspect destination root", destination, error));
            }
        }

        let permissions = fs::metadata(self.roots.source())
            .map_err(|error| MirrorError::io("inspect source root", self.roots.source(), error))?
            .permissions();
        create_dir_all_with_mode(destination, &permissions)
            .map_err(|error| MirrorError::io("create destination root", destination, error))?;
        self.summary.record_directory_created();
        trace_copy!("created destination root {}", destination.display());
        Ok(())
    }

    fn walker(&self, root: &Path) -> Result<Walker, MirrorError> {
        Ok(WalkBuilder::new(root)
            .follow_symlinks(self.options.follows_symlinks())
            .include_root(false)
            .build()?)
    }

    /// Reads metadata for a path under either root, resolving links only when
    /// the policy follows them.
    fn stat(&self, path: &Path) -> io::Result<fs::Metadata> {
        if self.options.follows_symlinks() {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
    }

    /// Applies the non-following link policies to a link found at `path`.
    fn unfollowed_link(&mut self, path: &Path) -> Result<(), MirrorError> {
        match self.options.symlinks() {
            SymlinkPolicy::Reject => Err(MirrorError::SymlinkRejected {
                path: path.to_path_buf(),
            }),
            SymlinkPolicy::Skip | SymlinkPolicy::Follow => {
                trace_skip!("skipping symbolic link {}", path.display());
                self.summary.record_skip();
                Ok(())
            }
        }
    }
}

/// Returns `true` when a source lookup failed because the entry does not
/// exist. Any other failure aborts the run.
fn is_missing(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::NotFound
}

/// Returns `true` for destination lookup failures meaning "nothing is there",
/// including an entry whose parent is not a directory.
fn is_absent(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

type OrphanDirectories = Vec<PathBuf>;
