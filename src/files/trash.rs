//! Deleting with an undo path.

use std::path::{Component, Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::error::{KitError, Result};
use crate::files::dotted_extension;
use crate::utils::ensure_dir;

/// Default trash folder name, created next to the deleted file.
pub const DEFAULT_TRASH_DIR: &str = ".trash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteMode {
    /// Move into `<parent>/<dir_name>/` with a timestamped name.
    Trash { dir_name: String },
    /// Remove a file for good.
    Permanent,
}

impl Default for DeleteMode {
    fn default() -> Self {
        Self::Trash {
            dir_name: DEFAULT_TRASH_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Trashed(PathBuf),
    Removed,
}

/// Delete `path`, by default moving it to a trash folder beside it.
///
/// Trashed entries are named `<stem>_<YYYYmmdd_HHMMSS><ext>`; a numeric
/// suffix is added if that name is taken. Permanent mode only removes files.
///
/// # Errors
///
/// `NotFound` when `path` is missing, `InvalidArgument` for a trash name
/// that isn't a single plain folder name or a permanent delete of a
/// directory.
pub fn safe_delete(path: impl AsRef<Path>, mode: &DeleteMode) -> Result<DeleteOutcome> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KitError::NotFound(format!("file {}", path.display())));
    }

    match mode {
        DeleteMode::Permanent => {
            if path.is_dir() {
                return Err(KitError::invalid(format!(
                    "{} is a directory; move it to the trash instead",
                    path.display()
                )));
            }
            std::fs::remove_file(path)?;
            info!(path = %path.display(), "deleted");
            Ok(DeleteOutcome::Removed)
        }
        DeleteMode::Trash { dir_name } => {
            validate_trash_name(dir_name)?;
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            let trash_dir = parent.join(dir_name);
            ensure_dir(&trash_dir)?;
            let destination = trash_destination(&trash_dir, path);
            std::fs::rename(path, &destination)?;
            info!(from = %path.display(), to = %destination.display(), "moved to trash");
            Ok(DeleteOutcome::Trashed(destination))
        }
    }
}

fn validate_trash_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(KitError::invalid(format!(
            "trash folder {name:?} must be a single folder name"
        ))),
    }
}

fn trash_destination(trash_dir: &Path, path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = dotted_extension(path);
    let stamp = Local::now().format("%Y%m%d_%H%M%S");

    let candidate = trash_dir.join(format!("{stem}_{stamp}{ext}"));
    if !candidate.exists() {
        return candidate;
    }
    (1u32..)
        .map(|n| trash_dir.join(format!("{stem}_{stamp}_{n}{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
