/// Counters describing what a successful mirror run did.
///
/// Only returned on success; a failed run reports nothing but its error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    files_deleted: u64,
    files_preserved: u64,
    contents_compared: u64,
    files_copied: u64,
    bytes_copied: u64,
    directories_created: u64,
    directories_pruned: u64,
    entries_skipped: u64,
}

impl MirrorSummary {
    /// Destination files removed by the deletion pass.
    #[must_use]
    pub const fn files_deleted(&self) -> u64 {
        self.files_deleted
    }

    /// Destination files found identical to their source and left untouched.
    #[must_use]
    pub const fn files_preserved(&self) -> u64 {
        self.files_preserved
    }

    /// Full-content digest comparisons performed.
    #[must_use]
    pub const fn contents_compared(&self) -> u64 {
        self.contents_compared
    }

    /// Files copied by the copy pass.
    #[must_use]
    pub const fn files_copied(&self) -> u64 {
        self.files_copied
    }

    /// Bytes of file content written by the copy pass.
    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Directories created, including the destination root.
    #[must_use]
    pub const fn directories_created(&self) -> u64 {
        self.directories_created
    }

    /// Orphan directories removed.
    #[must_use]
    pub const fn directories_pruned(&self) -> u64 {
        self.directories_pruned
    }

    /// Symlinks and special files left alone, counted once per pass that saw them.
    #[must_use]
    pub const fn entries_skipped(&self) -> u64 {
        self.entries_skipped
    }

    /// Returns `true` when the run changed nothing in the destination.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.files_deleted == 0
            && self.files_copied == 0
            && self.directories_created == 0
            && self.directories_pruned == 0
    }

    pub(crate) const fn record_deletion(&mut self) {
        self.files_deleted += 1;
    }

    pub(crate) const fn record_preserved(&mut self) {
        self.files_preserved += 1;
    }

    pub(crate) const fn record_comparison(&mut self) {
        self.contents_compared += 1;
    }

    pub(crate) const fn record_copy(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub(crate) const fn record_directory_created(&mut self) {
        self.directories_created += 1;
    }

    pub(crate) const fn record_prune(&mut self) {
        self.directories_pruned += 1;
    }

    pub(crate) const fn record_skip(&mut self) {
        self.entries_skipped += 1;
    }
}
