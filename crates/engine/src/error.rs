use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walk::WalkError;

/// Message used when the source root is not a directory.
pub const NOT_A_DIRECTORY: &str = "Not a directory";

/// Error produced when resolving roots or running either mirror pass fails.
///
/// The first failure aborts the run and is returned unchanged; the destination
/// may be left partially mirrored and re-running is the recovery path.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A supplied path could not be turned into an absolute, canonical form.
    #[error("failed to resolve path '{}': {source}", .path.display())]
    PathResolution {
        /// Path as supplied by the caller.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A walked path was not rooted under the root it was walked from.
    #[error("path '{}' is not contained in '{}'", .path.display(), .root.display())]
    PathOutsideRoot {
        /// Offending path.
        path: PathBuf,
        /// Root the path was expected to live under.
        root: PathBuf,
    },
    /// The source root exists but is not a directory.
    #[error("{}: '{}'", NOT_A_DIRECTORY, .path.display())]
    NotADirectory {
        /// Resolved source root.
        path: PathBuf,
    },
    /// Filesystem interaction failed.
    #[error("failed to {action} '{}': {source}", .path.display())]
    Io {
        /// Action being performed.
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A symbolic link was found while the policy forbids them.
    #[error("refusing to mirror symbolic link '{}'", .path.display())]
    SymlinkRejected {
        /// Location of the link.
        path: PathBuf,
    },
}

impl MirrorError {
    /// Constructs an I/O error with action context.
    #[must_use]
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn path_resolution(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PathResolution {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures that prevented a path from being resolved.
    #[must_use]
    pub const fn is_path_resolution(&self) -> bool {
        matches!(self, Self::PathResolution { .. } | Self::PathOutsideRoot { .. })
    }

    /// Returns `true` when the source root was not a directory.
    #[must_use]
    pub const fn is_not_a_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` for failures while reading, writing, creating, deleting,
    /// or changing permissions on an entry.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::SymlinkRejected { .. })
    }

    /// Returns the path the failure relates to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PathResolution { path, .. }
            | Self::PathOutsideRoot { path, .. }
            | Self::NotADirectory { path }
            | Self::Io { path, .. }
            | Self::SymlinkRejected { path } => path,
        }
    }

    /// Returns the underlying operating system error, if there is one.
    #[must_use]
    pub const fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::PathResolution { source, .. } | Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<WalkError> for MirrorError {
    fn from(error: WalkError) -> Self {
        let action = error.kind().action();
        let (path, source) = error.into_parts();
        Self::Io {
            action,
            path,
            source,
        }
    }
}
