//! crates/checksums/src/strong/mod.rs
//!
//! Strong (content-addressing) digests.

mod md5;
mod sha256;

use std::fmt;

pub use md5::Md5;
pub use sha256::Sha256;

/// Common interface for streaming strong digests.
///
/// Implementations accept data incrementally through [`update`](Self::update)
/// and produce a fixed-size output from [`finalize`](Self::finalize).
pub trait StrongDigest: Sized {
    /// Fixed-size digest output.
    type Digest: AsRef<[u8]> + Copy + Eq + fmt::Debug;

    /// Length of [`Self::Digest`] in bytes.
    const DIGEST_LEN: usize;

    /// Creates a hasher with an empty state.
    fn new() -> Self;

    /// Feeds additional bytes into the digest state.
    fn update(&mut self, data: &[u8]);

    /// Consumes the hasher and returns the digest.
    fn finalize(self) -> Self::Digest;

    /// Computes the digest of `data` in one shot.
    fn digest(data: &[u8]) -> Self::Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Digest algorithms available for content comparison.
///
/// Content addressing, not security, is the goal: MD5 is the default because
/// it is the cheapest option with adequate collision resistance for detecting
/// changed files. SHA-256 is offered for callers that prefer a modern hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// MD5 (RFC 1321), 16-byte digests.
    #[default]
    Md5,
    /// SHA-256 (FIPS 180-4), 32-byte digests.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the digest length in bytes.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Md5 => <Md5 as StrongDigest>::DIGEST_LEN,
            Self::Sha256 => <Sha256 as StrongDigest>::DIGEST_LEN,
        }
    }

    /// Returns the conventional lowercase name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
