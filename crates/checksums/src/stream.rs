//! crates/checksums/src/stream.rs
//!
//! Buffered streaming of readers through a [`StrongDigest`].

use std::io::{self, Read};

use crate::hex::to_hex;
use crate::strong::{DigestAlgorithm, Md5, Sha256, StrongDigest};

/// Streams `reader` to EOF through `D`, reading at most `buffer.len()` bytes
/// per call.
///
/// Interrupted reads are retried; any other read error is returned as-is.
///
/// # Panics
///
/// Panics if `buffer` is empty, since no progress could ever be made.
pub fn digest_reader<D, R>(mut reader: R, buffer: &mut [u8]) -> io::Result<D::Digest>
where
    D: StrongDigest,
    R: Read,
{
    assert!(!buffer.is_empty(), "digest buffer must not be empty");

    let mut hasher = D::new();
    loop {
        match reader.read(buffer) {
            Ok(0) => break,
            Ok(read) => hasher.update(&buffer[..read]),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(hasher.finalize())
}

/// Streams `reader` through `algorithm` and returns the lowercase hex digest.
pub fn hex_digest_reader<R: Read>(
    algorithm: DigestAlgorithm,
    reader: R,
    buffer: &mut [u8],
) -> io::Result<String> {
    match algorithm {
        DigestAlgorithm::Md5 => digest_reader::<Md5, R>(reader, buffer).map(|d| to_hex(&d)),
        DigestAlgorithm::Sha256 => digest_reader::<Sha256, R>(reader, buffer).map(|d| to_hex(&d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that yields `data` in fixed chunks and interrupts once.
    struct Choppy<'a> {
        data: &'a [u8],
        chunk: usize,
        interrupted: bool,
    }

    impl Read for Choppy<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let len = self.chunk.min(buf.len()).min(self.data.len());
            buf[..len].copy_from_slice(&self.data[..len]);
            self.data = &self.data[len..];
            Ok(len)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn buffer_size_does_not_change_digest() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let expected = Md5::digest(data);

        for size in [1, 2, 3, 7, 64, 4096] {
            let mut buffer = vec![0u8; size];
            let digest = digest_reader::<Md5, _>(&data[..], &mut buffer).expect("digest");
            assert_eq!(digest, expected, "buffer size {size}");
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let data = b"interrupted but complete";
        let reader = Choppy {
            data,
            chunk: 5,
            interrupted: false,
        };
        let mut buffer = [0u8; 16];
        let digest = digest_reader::<Sha256, _>(reader, &mut buffer).expect("digest");
        assert_eq!(digest, Sha256::digest(data));
    }

    #[test]
    fn read_errors_propagate() {
        let mut buffer = [0u8; 8];
        let error = digest_reader::<Md5, _>(Failing, &mut buffer).expect_err("must fail");
        assert_eq!(error.to_string(), "disk on fire");
    }

    #[test]
    fn hex_digest_dispatches_on_algorithm() {
        let mut buffer = [0u8; 4];
        assert_eq!(
            hex_digest_reader(DigestAlgorithm::Md5, &b"abc"[..], &mut buffer).expect("md5"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            hex_digest_reader(DigestAlgorithm::Sha256, &b"abc"[..], &mut buffer).expect("sha256"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    #[should_panic(expected = "digest buffer must not be empty")]
    fn empty_buffer_panics() {
        let _ = digest_reader::<Md5, _>(&b"x"[..], &mut []);
    }
}
