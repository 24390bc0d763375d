use std::fs;
use std::io;

use logging::trace_prune;

use super::{MirrorRun, OrphanDirectories};
use crate::error::MirrorError;

impl MirrorRun<'_> {
    /// Removes orphan directories, children before parents.
    ///
    /// `orphans` must be in walk (pre-)order. A directory still holding
    /// entries, such as a skipped symlink, is kept.
    pub(super) fn prune_orphans(&mut self, orphans: OrphanDirectories) -> Result<(), MirrorError> {
        for directory in orphans.into_iter().rev() {
            match fs::remove_dir(&directory) {
                Ok(()) => {
                    self.summary.record_prune();
                    trace_prune!("removed orphan directory {}", directory.display());
                }
                Err(error) if error.kind() == io::ErrorKind::DirectoryNotEmpty => {
                    trace_prune!("keeping non-empty orphan directory {}", directory.display());
                }
                Err(error) => {
                    return Err(MirrorError::io("remove orphan directory", directory, error));
                }
            }
        }
        Ok(())
    }
}
