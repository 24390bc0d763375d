use std::fs;
use std::path::Path;

use logging::trace_del;
use walk::WalkEntry;

use super::{MirrorRun, OrphanDirectories, is_missing};
use crate::comparator::{ContentVerdict, FileVerdict};
use crate::error::MirrorError;
use crate::options::SymlinkPolicy;

impl MirrorRun<'_> {
    /// Walks the destination and removes every file without an identical
    /// source counterpart.
    ///
    /// Directories are never removed here. When pruning is enabled the
    /// directories lacking a source directory counterpart are returned in
    /// walk order so they can be removed once emptied.
    pub(super) fn deletion_pass(&mut self) -> Result<OrphanDirectories, MirrorError> {
        trace_del!("deletion pass over {}", self.roots.destination().display());
        let mut orphans = OrphanDirectories::new();

        for entry in self.walker(self.roots.destination())? {
            let entry = entry?;

            if entry.is_symlink() && !self.options.follows_symlinks() {
                self.unfollowed_link(entry.full_path())?;
                continue;
            }

            let source_path = self.roots.source_counterpart(entry.full_path())?;
            // Below an orphan the source has no directory, so nothing can match.
            let inside_orphan = orphans
                .iter()
                .rev()
                .any(|orphan| entry.full_path().starts_with(orphan));

            if entry.is_dir() {
                if self.options.prunes_empty_directories()
                    && !entry.is_symlink()
                    && (inside_orphan || !self.source_is_directory(&source_path)?)
                {
                    orphans.push(entry.full_path().to_path_buf());
                }
                continue;
            }

            let verdict = if inside_orphan {
                FileVerdict::Missing
            } else {
                self.classify(&entry, &source_path)?
            };
            if verdict.keeps_destination() {
                self.summary.record_preserved();
                continue;
            }

            fs::remove_file(entry.full_path()).map_err(|error| {
                MirrorError::io("remove destination file", entry.full_path(), error)
            })?;
            self.summary.record_deletion();
            trace_del!("deleted {} ({verdict:?})", entry.full_path().display());
        }

        Ok(orphans)
    }

    /// Decides whether a destination file may stay.
    ///
    /// Sizes are compared first; content is only digested when they agree.
    pub(super) fn classify(
        &mut self,
        destination: &WalkEntry,
        source_path: &Path,
    ) -> Result<FileVerdict, MirrorError> {
        let source_metadata = match self.stat(source_path) {
            Ok(metadata) => metadata,
            Err(error) if is_missing(&error) => return Ok(FileVerdict::Missing),
            Err(error) => {
                return Err(MirrorError::io("inspect source file", source_path, error));
            }
        };

        if source_metadata.file_type().is_symlink()
            && self.options.symlinks() == SymlinkPolicy::Reject
        {
            return Err(MirrorError::SymlinkRejected {
                path: source_path.to_path_buf(),
            });
        }

        if !source_metadata.is_file() || !destination.is_file() {
            return Ok(FileVerdict::TypeMismatch);
        }

        if source_metadata.len() != destination.metadata().len() {
            return Ok(FileVerdict::SizeMismatch);
        }

        self.summary.record_comparison();
        let verdict = match self.comparator.compare(destination.full_path(), source_path)? {
            ContentVerdict::Identical => FileVerdict::Identical,
            ContentVerdict::Distinct => FileVerdict::ContentMismatch,
        };
        Ok(verdict)
    }

    fn source_is_directory(&self, source_path: &Path) -> Result<bool, MirrorError> {
        match self.stat(source_path) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(error) if is_missing(&error) => Ok(false),
            Err(error) => Err(MirrorError::io("inspect source directory", source_path, error)),
        }
    }
}
