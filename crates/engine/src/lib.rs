#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` turns a destination directory into a one-way mirror of a source
//! directory. It is made of three parts:
//!
//! - the path resolver ([`resolve_roots`], [`relative_to`]) turns the
//!   caller's roots into absolute paths and maps entries between the trees
//!   by component-wise relativization;
//! - the content comparator ([`ContentComparator`], [`compare_contents`])
//!   decides whether two same-sized files hold the same bytes by streaming
//!   both through a digest with a bounded buffer;
//! - the mirror engine ([`mirror`], [`sync`]) runs a deletion pass over the
//!   destination followed by a copy pass over the source.
//!
//! # Design
//!
//! Files in the destination survive only when the source holds a regular
//! file of the same size and digest at the same relative path; everything
//! else is deleted and recreated by the copy pass. Identical files are never
//! rewritten, so their timestamps and inodes are preserved. Directories are
//! only removed when [`MirrorOptions::prune_empty_directories`] is enabled.
//! Symbolic links follow the configured [`SymlinkPolicy`].
//!
//! All I/O is synchronous and single-threaded. The first error aborts the run
//! without rollback; calling [`mirror`] again converges the destination.
//!
//! # Examples
//!
//! ```
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("src");
//! let destination = temp.path().join("dst");
//! std::fs::create_dir(&source)?;
//! std::fs::write(source.join("a.txt"), b"alpha")?;
//!
//! engine::sync(&source, &destination)?;
//! assert_eq!(std::fs::read(destination.join("a.txt"))?, b"alpha");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod comparator;
mod error;
mod fs_ops;
mod mirror;
mod options;
mod paths;
mod summary;

pub use checksums::strong::DigestAlgorithm;
pub use comparator::{ContentComparator, ContentVerdict, FileVerdict, compare_contents};
pub use error::{MirrorError, NOT_A_DIRECTORY};
pub use mirror::{mirror, sync};
pub use options::{DEFAULT_DIGEST_BUFFER_SIZE, MEGABYTE, MirrorOptions, SymlinkPolicy};
pub use paths::{RootPair, relative_to, resolve_roots};
pub use summary::MirrorSummary;
