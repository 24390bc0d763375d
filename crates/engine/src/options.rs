//! Configuration for a mirror run.

use checksums::strong::DigestAlgorithm;

/// One megabyte, as used for sizing the digest buffer.
pub const MEGABYTE: usize = 1_000_000;

/// Default read buffer size used while digesting files.
///
/// Large enough to amortise syscall overhead on big files without ever
/// holding a whole file in memory.
pub const DEFAULT_DIGEST_BUFFER_SIZE: usize = 10 * MEGABYTE;

/// How symbolic links found in either tree are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymlinkPolicy {
    /// Leave links alone: they are logged, counted, and never mirrored or deleted.
    #[default]
    Skip,
    /// Resolve links and mirror whatever they point at. Cycles are detected;
    /// a dangling link aborts the run.
    Follow,
    /// Abort the run when a link is encountered.
    Reject,
}

/// Options that influence how a mirror run is executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorOptions {
    digest_buffer_size: usize,
    digest_algorithm: DigestAlgorithm,
    prune_empty_directories: bool,
    symlink_policy: SymlinkPolicy,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorOptions {
    /// Returns the default options: MD5 digests with a 10 MB buffer, no
    /// directory pruning, symlinks skipped.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            digest_buffer_size: DEFAULT_DIGEST_BUFFER_SIZE,
            digest_algorithm: DigestAlgorithm::Md5,
            prune_empty_directories: false,
            symlink_policy: SymlinkPolicy::Skip,
        }
    }

    /// Sets the read buffer size used while digesting. Zero is raised to one.
    #[must_use]
    pub const fn digest_buffer_size(mut self, size: usize) -> Self {
        self.digest_buffer_size = if size == 0 { 1 } else { size };
        self
    }

    /// Selects the digest used for content comparison.
    #[must_use]
    pub const fn digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest_algorithm = algorithm;
        self
    }

    /// Removes destination directories that have no directory counterpart in
    /// the source once the deletion pass has emptied them.
    #[must_use]
    pub const fn prune_empty_directories(mut self, prune: bool) -> Self {
        self.prune_empty_directories = prune;
        self
    }

    /// Chooses how symbolic links are handled.
    #[must_use]
    pub const fn symlink_policy(mut self, policy: SymlinkPolicy) -> Self {
        self.symlink_policy = policy;
        self
    }

    /// Returns the configured digest buffer size in bytes.
    #[must_use]
    pub const fn digest_buffer_size_bytes(&self) -> usize {
        self.digest_buffer_size
    }

    /// Returns the configured digest algorithm.
    #[must_use]
    pub const fn digest_algorithm_kind(&self) -> DigestAlgorithm {
        self.digest_algorithm
    }

    /// Reports whether orphan directories are pruned.
    #[must_use]
    pub const fn prunes_empty_directories(&self) -> bool {
        self.prune_empty_directories
    }

    /// Returns the configured symlink policy.
    #[must_use]
    pub const fn symlinks(&self) -> SymlinkPolicy {
        self.symlink_policy
    }

    pub(crate) const fn follows_symlinks(&self) -> bool {
        matches!(self.symlink_policy, SymlinkPolicy::Follow)
    }
}
