//! File metadata.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{KitError, Result};
use crate::utils::format_size;

/// Metadata snapshot for a single path.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub extension: String,
    pub size: u64,
    pub size_human: String,
    /// Not every filesystem records a creation time.
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub is_file: bool,
    pub is_dir: bool,
}

/// Collect metadata for `path`.
///
/// # Errors
///
/// `NotFound` when the path does not exist; `Io` if it can't be read.
pub fn file_info(path: impl AsRef<Path>) -> Result<FileInfo> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KitError::NotFound(format!("file {}", path.display())));
    }

    let meta = std::fs::metadata(path)?;
    let absolute = std::path::absolute(path)?;

    Ok(FileInfo {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: absolute.display().to_string(),
        extension: dotted_extension(path),
        size: meta.len(),
        size_human: format_size(meta.len()),
        created: meta.created().ok().map(DateTime::<Local>::from),
        modified: meta.modified().ok().map(DateTime::<Local>::from),
        is_file: meta.is_file(),
        is_dir: meta.is_dir(),
    })
}

/// The final extension with its leading dot (`".gz"` for `a.tar.gz`), or an
/// empty string when there is none. Dotfiles such as `.bashrc` have no
/// extension.
#[must_use]
pub fn dotted_extension(path: impl AsRef<Path>) -> String {
    match path.as_ref().extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy()),
        _ => String::new(),
    }
}
