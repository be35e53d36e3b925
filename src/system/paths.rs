//! Working directory, home, temp and path inspection helpers.

use std::path::{Path, PathBuf};

use crate::error::{KitError, Result};
use crate::files::dotted_extension;
use crate::utils::ensure_dir;

/// The process working directory.
///
/// # Errors
///
/// `Io` if it was removed or can't be read.
pub fn current_directory() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Change the process working directory. This is process-wide state.
///
/// # Errors
///
/// `NotFound` when `path` is not an existing directory.
pub fn change_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(KitError::NotFound(format!("directory {}", path.display())));
    }
    std::env::set_current_dir(path)?;
    Ok(())
}

/// The current user's home directory.
///
/// # Errors
///
/// `NotFound` when the platform reports none.
pub fn home_directory() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| KitError::NotFound("home directory".to_string()))
}

#[must_use]
pub fn path_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

#[must_use]
pub fn is_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

#[must_use]
pub fn is_directory(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Extension with its dot, e.g. `".gz"` for `archive.tar.gz`.
#[must_use]
pub fn file_extension(path: impl AsRef<Path>) -> String {
    dotted_extension(path)
}

/// Final path component, or its stem when `with_extension` is false.
#[must_use]
pub fn file_name(path: impl AsRef<Path>, with_extension: bool) -> Option<String> {
    let path = path.as_ref();
    let part = if with_extension {
        path.file_name()
    } else {
        path.file_stem()
    };
    part.map(|p| p.to_string_lossy().into_owned())
}

/// Create `path` and its parents if missing.
///
/// # Errors
///
/// `Conflict` if a non-directory is in the way, `Io` on failure.
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<()> {
    ensure_dir(path)
}

#[must_use]
pub fn temp_directory() -> PathBuf {
    std::env::temp_dir()
}

/// Create an empty file in the temp directory and keep it on disk.
///
/// # Errors
///
/// `Io` if the file can't be created.
pub fn create_temp_file(prefix: &str, suffix: &str) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()?;
    let (_, path) = file.keep().map_err(|err| KitError::Io(err.error))?;
    Ok(path)
}
