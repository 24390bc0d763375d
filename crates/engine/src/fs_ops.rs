//! Small filesystem primitives shared by the copy and root setup steps.

use std::fs::{self, File, OpenOptions, Permissions};
use std::io;
use std::path::Path;

/// Creates `path` and any missing ancestors, applying `permissions` to every
/// directory created by this call.
///
/// On Unix the mode is passed to `mkdir(2)` and is therefore subject to the
/// process umask. Elsewhere only the read-only bit is carried over afterwards.
pub(crate) fn create_dir_all_with_mode(path: &Path, permissions: &Permissions) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

        fs::DirBuilder::new()
            .recursive(true)
            .mode(permissions.mode() & 0o7777)
            .create(path)
    }

    #[cfg(not(unix))]
    {
        fs::create_dir_all(path)?;
        if permissions.readonly() {
            fs::set_permissions(path, permissions.clone())?;
        }
        Ok(())
    }
}

/// Copies the bytes of `source` into a newly created `destination`, then
/// applies `permissions` to it. Returns the number of bytes written.
///
/// The destination must not exist; an existing entry fails with
/// [`io::ErrorKind::AlreadyExists`] rather than being overwritten.
pub(crate) fn copy_file_with_mode(
    source: &Path,
    destination: &Path,
    permissions: &Permissions,
) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.sync_all()?;
    drop(writer);

    fs::set_permissions(destination, permissions.clone())?;
    Ok(bytes)
}
