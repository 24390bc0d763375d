//! crates/logging/src/subsystem.rs
//! Diagnostic categories and the tracing targets they map to.

use std::fmt;

/// Diagnostic category attached to every event emitted by the mirror.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subsystem {
    /// Directory traversal.
    Walk,
    /// Destination file removal during the deletion pass.
    Delete,
    /// File copies and directory creation during the copy pass.
    Copy,
    /// Content digest comparison.
    Compare,
    /// Orphan directory removal.
    Prune,
    /// Entries skipped by policy, such as symbolic links.
    Skip,
}

impl Subsystem {
    /// Every subsystem, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Walk,
        Self::Delete,
        Self::Copy,
        Self::Compare,
        Self::Prune,
        Self::Skip,
    ];

    /// Returns the tracing target used for events in this category.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Walk => "dirmirror::walk",
            Self::Delete => "dirmirror::delete",
            Self::Copy => "dirmirror::copy",
            Self::Compare => "dirmirror::compare",
            Self::Prune => "dirmirror::prune",
            Self::Skip => "dirmirror::skip",
        }
    }

    /// Maps a tracing target back to its category.
    ///
    /// Only exact `dirmirror::<name>` targets match, so module paths that merely
    /// contain a category name (for example `dirmirror::walker`) are ignored.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subsystem| subsystem.target() == target)
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .target()
            .rsplit("::")
            .next()
            .unwrap_or_else(|| self.target());
        f.write_str(name)
    }
}
