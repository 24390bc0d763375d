#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dirmirror` makes a destination directory an exact one-way mirror of a
//! source directory. After a successful [`sync`] every file and directory of
//! the source exists in the destination with the same content and permission
//! bits, and every destination file without an identical source counterpart
//! is gone.
//!
//! Changes are detected by size first and by a streaming content digest when
//! sizes agree, so identical files are never rewritten.
//!
//! # Logging
//!
//! Every deletion, copy, directory creation, prune and skipped entry is
//! reported through [`tracing`](https://docs.rs/tracing) under the
//! `dirmirror::*` targets. The library never installs a subscriber;
//! applications can call [`init_tracing`] or wire their own.
//!
//! # Examples
//!
//! ```
//! use dirmirror::{MirrorOptions, mirror};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("photos");
//! let backup = temp.path().join("backup");
//! std::fs::create_dir_all(source.join("2024"))?;
//! std::fs::write(source.join("2024/beach.jpg"), b"jpeg bytes")?;
//!
//! let options = MirrorOptions::new().prune_empty_directories(true);
//! let summary = mirror(&source, &backup, &options)?;
//! assert_eq!(summary.files_copied(), 1);
//!
//! // A second run has nothing left to do.
//! let summary = mirror(&source, &backup, &options)?;
//! assert!(summary.is_noop());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub use engine::{
    ContentComparator, ContentVerdict, DEFAULT_DIGEST_BUFFER_SIZE, DigestAlgorithm, FileVerdict,
    MEGABYTE, MirrorError, MirrorOptions, MirrorSummary, NOT_A_DIRECTORY, RootPair, SymlinkPolicy,
    compare_contents, mirror, relative_to, resolve_roots, sync,
};
pub use logging::{DEFAULT_FILTER, Subsystem, init_tracing};
