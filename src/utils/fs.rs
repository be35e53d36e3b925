//! Filesystem utilities.

use std::path::Path;

use crate::error::{KitError, Result};

/// Ensure a directory exists, creating it and any parents if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(KitError::Conflict(format!(
            "{} exists and is not a directory",
            path.display()
        )));
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Fail with `NotFound` unless `path` is an existing directory.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else if path.exists() {
        Err(KitError::invalid(format!(
            "{} is not a directory",
            path.display()
        )))
    } else {
        Err(KitError::NotFound(format!(
            "directory {}",
            path.display()
        )))
    }
}
