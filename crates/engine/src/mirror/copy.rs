use std::io;
use std::path::Path;

use logging::{trace_copy, trace_skip};
use walk::WalkEntry;

use super::{MirrorRun, is_absent};
use crate::error::MirrorError;
use crate::fs_ops::{copy_file_with_mode, create_dir_all_with_mode};

impl MirrorRun<'_> {
    /// Walks the source and creates every directory and file missing from the
    /// destination.
    ///
    /// Existing destination files are not touched: anything that survived the
    /// deletion pass is already identical.
    pub(super) fn copy_pass(&mut self) -> Result<(), MirrorError> {
        trace_copy!("copy pass over {}", self.roots.source().display());

        for entry in self.walker(self.roots.source())? {
            let entry = entry?;

            if entry.is_symlink() && !self.options.follows_symlinks() {
                self.unfollowed_link(entry.full_path())?;
                continue;
            }

            let destination_path = self.roots.destination_counterpart(entry.full_path())?;

            if entry.is_dir() {
                self.mirror_directory(&entry, &destination_path)?;
            } else if entry.is_file() {
                self.mirror_file(&entry, &destination_path)?;
            } else {
                trace_skip!("skipping special file {}", entry.full_path().display());
                self.summary.record_skip();
            }
        }

        Ok(())
    }

    fn mirror_directory(
        &mut self,
        source: &WalkEntry,
        destination: &Path,
    ) -> Result<(), MirrorError> {
        let missing = match self.stat(destination) {
            Ok(metadata) if metadata.is_dir() => return Ok(()),
            Ok(_) => false,
            Err(error) if error.kind() == io::ErrorKind::NotFound => true,
            Err(error) => {
                return Err(MirrorError::io("inspect destination directory", destination, error));
            }
        };

        // An existing non-directory entry makes creation fail with the
        // operating system's own error.
        create_dir_all_with_mode(destination, &source.metadata().permissions())
            .map_err(|error| MirrorError::io("create destination directory", destination, error))?;

        if missing {
            self.summary.record_directory_created();
            trace_copy!("created directory {}", destination.display());
        }
        Ok(())
    }

    fn mirror_file(&mut self, source: &WalkEntry, destination: &Path) -> Result<(), MirrorError> {
        match self.stat(destination) {
            Ok(_) => return Ok(()),
            Err(error) if is_absent(&error) => {}
            Err(error) => {
                return Err(MirrorError::io("inspect destination file", destination, error));
            }
        }

        let bytes =
            copy_file_with_mode(source.full_path(), destination, &source.metadata().permissions())
                .map_err(|error| MirrorError::io("copy file", destination, error))?;
        self.summary.record_copy(bytes);
        trace_copy!(
            "copied {} to {} ({bytes} bytes)",
            source.full_path().display(),
            destination.display()
        );
        Ok(())
    }
}
