//! crates/logging/src/tracing_macros.rs
//! Convenience macros for dirmirror-specific tracing.
//!
//! These macros wrap the standard tracing macros with the target of the
//! matching [`Subsystem`](crate::Subsystem), so callers only need a dependency
//! on this crate.

/// Emit a traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "dirmirror::walk", $($arg)*);
    };
}

/// Emit a deletion trace.
///
/// # Example
/// ```ignore
/// trace_del!(path = %path.display(), "removed stale file");
/// ```
#[macro_export]
macro_rules! trace_del {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "dirmirror::delete", $($arg)*);
    };
}

/// Emit a copy trace.
///
/// # Example
/// ```ignore
/// trace_copy!("copied {} bytes", bytes);
/// ```
#[macro_export]
macro_rules! trace_copy {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "dirmirror::copy", $($arg)*);
    };
}

/// Emit a content comparison trace.
///
/// # Example
/// ```ignore
/// trace_compare!("digesting {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_compare {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "dirmirror::compare", $($arg)*);
    };
}

/// Emit an orphan directory pruning trace.
///
/// # Example
/// ```ignore
/// trace_prune!("removed orphan directory {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_prune {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "dirmirror::prune", $($arg)*);
    };
}

/// Emit a warning for an entry skipped by policy.
///
/// # Example
/// ```ignore
/// trace_skip!("skipping symbolic link {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "dirmirror::skip", $($arg)*);
    };
}
