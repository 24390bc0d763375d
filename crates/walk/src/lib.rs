#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic filesystem traversal both mirror passes
//! are built on. The walker enumerates regular files, directories, and
//! symbolic links below a root, yielding each entry together with the
//! metadata captured when it was visited and its path relative to the root.
//! Directory entries are sorted lexicographically before they are yielded so
//! the visiting order is stable across platforms and runs.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures traversal options such as whether the root entry
//!   should be emitted and if directory symlinks may be followed.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values in
//!   depth-first pre-order: a directory is yielded before its contents, and its
//!   contents are exhausted before the walker moves to the next sibling.
//! - [`WalkError`] describes I/O failures encountered while querying metadata or
//!   reading directories, always tagged with the offending path.
//!
//! # Invariants
//!
//! - Every yielded full path lives below the configured root (followed
//!   symlinks keep the link's path, not the target's). Relative paths never
//!   contain `..` segments.
//! - A directory's listing is read when the directory entry is yielded, so
//!   callers may remove the children of a directory they have already seen
//!   without disturbing the walk.
//! - Directories are descended exactly once. When symlink following is
//!   enabled, canonical paths are tracked to avoid cycles even if a symlink
//!   points back to an ancestor directory.
//! - The first error ends the traversal; later calls to `next` return `None`.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::collections::BTreeSet;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! let nested = root.join("nested");
//! fs::create_dir_all(&nested)?;
//! fs::write(root.join("file.txt"), b"data")?;
//! fs::write(nested.join("more.txt"), b"data")?;
//!
//! let walker = WalkBuilder::new(&root).include_root(false).build()?;
//! let mut seen = BTreeSet::new();
//! for entry in walker {
//!     seen.insert(entry?.relative_path().to_path_buf());
//! }
//!
//! assert!(seen.contains(std::path::Path::new("file.txt")));
//! assert!(seen.contains(std::path::Path::new("nested")));
//! assert!(seen.contains(std::path::Path::new("nested/more.txt")));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;


pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
