#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the strong digests dirmirror uses to decide whether
//! two files have identical content. Files are streamed through the digest
//! with a caller-supplied buffer so arbitrarily large files never have to fit
//! in memory.
//!
//! # Design
//!
//! - [`strong::StrongDigest`] is the streaming interface implemented by
//!   [`strong::Md5`] and [`strong::Sha256`].
//! - [`strong::DigestAlgorithm`] selects an implementation at runtime.
//! - [`digest_reader`] and [`hex_digest_reader`] drive any [`std::io::Read`]
//!   through a digest using a bounded buffer.
//!
//! # Examples
//!
//! ```
//! use checksums::hex_digest_reader;
//! use checksums::strong::DigestAlgorithm;
//!
//! let mut buffer = [0u8; 2];
//! let hex = hex_digest_reader(DigestAlgorithm::Md5, &b"abc"[..], &mut buffer).unwrap();
//! assert_eq!(hex, "900150983cd24fb0d6963f7d28e17f72");
//! ```

mod hex;
mod stream;
pub mod strong;

pub use hex::to_hex;
pub use stream::{digest_reader, hex_digest_reader};
