//! Root resolution and relative path mapping between the two trees.

use std::fs;
use std::io;
use std::path::{self, Component, Path, PathBuf};

use crate::error::MirrorError;

/// Absolute source and destination roots of one mirror run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootPair {
    source: PathBuf,
    destination: PathBuf,
}

impl RootPair {
    /// Canonical path of the source directory.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Absolute path of the destination directory, which may not exist yet.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Maps a path walked under the destination root to its source counterpart.
    pub fn source_counterpart(&self, destination_path: &Path) -> Result<PathBuf, MirrorError> {
        let relative = relative_to(&self.destination, destination_path)?;
        Ok(counterpart(&self.source, relative))
    }

    /// Maps a path walked under the source root to its destination counterpart.
    pub fn destination_counterpart(&self, source_path: &Path) -> Result<PathBuf, MirrorError> {
        let relative = relative_to(&self.source, source_path)?;
        Ok(counterpart(&self.destination, relative))
    }
}

/// Resolves both roots and checks that the source is a directory.
///
/// The source must exist and is canonicalized, so a source given through a
/// symlink is mirrored from its target. The destination is made absolute and
/// canonicalized only when it already exists. Nothing is created or modified.
pub fn resolve_roots(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<RootPair, MirrorError> {
    let source = resolve_existing(source.as_ref())?;
    let destination = resolve_maybe_missing(destination.as_ref())?;

    let metadata =
        fs::metadata(&source).map_err(|error| MirrorError::path_resolution(&source, error))?;
    if !metadata.is_dir() {
        return Err(MirrorError::NotADirectory { path: source });
    }

    Ok(RootPair {
        source,
        destination,
    })
}

fn resolve_existing(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = path::absolute(path).map_err(|error| MirrorError::path_resolution(path, error))?;
    fs::canonicalize(&absolute).map_err(|error| MirrorError::path_resolution(path, error))
}

fn resolve_maybe_missing(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = path::absolute(path).map_err(|error| MirrorError::path_resolution(path, error))?;
    match fs::canonicalize(&absolute) {
        Ok(canonical) => Ok(canonical),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(absolute),
        Err(error) => Err(MirrorError::path_resolution(path, error)),
    }
}

/// Returns `path` relative to `root`.
///
/// Matching is done per component, so `/data/src2/a` is not considered to be
/// under `/data/src`. The remainder must consist of plain names only.
///
/// # Examples
///
/// ```
/// use engine::relative_to;
/// use std::path::Path;
///
/// let rel = relative_to(Path::new("/data/src"), Path::new("/data/src/a/b.txt")).unwrap();
/// assert_eq!(rel, Path::new("a/b.txt"));
/// assert!(relative_to(Path::new("/data/src"), Path::new("/data/src2/a")).is_err());
/// ```
pub fn relative_to<'a>(root: &Path, path: &'a Path) -> Result<&'a Path, MirrorError> {
    let outside = || MirrorError::PathOutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };

    let relative = path.strip_prefix(root).map_err(|_| outside())?;
    if relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        Ok(relative)
    } else {
        Err(outside())
    }
}

/// Joins `relative` onto `root`, returning `root` itself for an empty path.
fn counterpart(root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}
