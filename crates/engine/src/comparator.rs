//! Content equality by streaming digest.

use std::fs::File;
use std::path::Path;

use checksums::hex_digest_reader;
use checksums::strong::DigestAlgorithm;
use logging::trace_compare;

use crate::error::MirrorError;
use crate::options::DEFAULT_DIGEST_BUFFER_SIZE;

/// Outcome of a full-content comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentVerdict {
    /// Both files produced the same digest.
    Identical,
    /// The digests differ.
    Distinct,
}

/// Classification of a destination file against its source counterpart.
///
/// Everything except [`FileVerdict::Identical`] causes the destination file
/// to be deleted so the copy pass can recreate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileVerdict {
    /// No source entry exists at the same relative path.
    Missing,
    /// The source entry exists but is not a regular file, or the destination
    /// entry is not one.
    TypeMismatch,
    /// Sizes differ; decided without reading content.
    SizeMismatch,
    /// Sizes match but the digests differ.
    ContentMismatch,
    /// Same size and same digest.
    Identical,
}

impl FileVerdict {
    /// Returns `true` when the destination file must be left untouched.
    #[must_use]
    pub const fn keeps_destination(self) -> bool {
        matches!(self, Self::Identical)
    }
}

/// Streams pairs of files through a digest and compares the results.
///
/// The read buffer is allocated on first use and reused for every later
/// comparison, so a run with no same-size candidates never allocates it.
#[derive(Debug)]
pub struct ContentComparator {
    algorithm: DigestAlgorithm,
    buffer_size: usize,
    buffer: Vec<u8>,
}

impl Default for ContentComparator {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default(), DEFAULT_DIGEST_BUFFER_SIZE)
    }
}

impl ContentComparator {
    /// Creates a comparator. A zero buffer size is raised to one byte.
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm, buffer_size: usize) -> Self {
        Self {
            algorithm,
            buffer_size: buffer_size.max(1),
            buffer: Vec::new(),
        }
    }

    /// Compares the full contents of two existing files.
    ///
    /// Always digests both files completely; callers are expected to have
    /// ruled out a size mismatch already. Both handles are closed before this
    /// returns, on success and on failure.
    pub fn compare(&mut self, first: &Path, second: &Path) -> Result<ContentVerdict, MirrorError> {
        trace_compare!(
            "comparing {} with {} using {}",
            first.display(),
            second.display(),
            self.algorithm
        );

        let first_file = open_for_digest(first)?;
        let second_file = open_for_digest(second)?;

        if self.buffer.len() != self.buffer_size {
            self.buffer = vec![0u8; self.buffer_size];
        }

        let first_digest = hex_digest_reader(self.algorithm, first_file, &mut self.buffer)
            .map_err(|error| MirrorError::io("read file for digest", first, error))?;
        let second_digest = hex_digest_reader(self.algorithm, second_file, &mut self.buffer)
            .map_err(|error| MirrorError::io("read file for digest", second, error))?;

        let verdict = if first_digest == second_digest {
            ContentVerdict::Identical
        } else {
            ContentVerdict::Distinct
        };
        trace_compare!("{verdict:?}: {first_digest} vs {second_digest}");
        Ok(verdict)
    }
}

fn open_for_digest(path: &Path) -> Result<File, MirrorError> {
    File::open(path).map_err(|error| MirrorError::io("open file for digest", path, error))
}

/// Compares two files with the default digest and buffer size.
///
/// # Examples
///
/// ```
/// use engine::{ContentVerdict, compare_contents};
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let a = temp.path().join("a");
/// let b = temp.path().join("b");
/// std::fs::write(&a, b"hello")?;
/// std::fs::write(&b, b"world")?;
/// assert_eq!(compare_contents(&a, &b)?, ContentVerdict::Distinct);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn compare_contents(first: &Path, second: &Path) -> Result<ContentVerdict, MirrorError> {
    ContentComparator::default().compare(first, second)
}
