//! Disk space and large-file hunting.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use crate::error::{KitError, Result};
use crate::files::search::walk;
use crate::utils::{format_size, require_dir};

/// Space on the filesystem holding a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub total: String,
    pub used: String,
    pub free: String,
    /// Used share of the total, rounded to one decimal.
    pub percent: f64,
}

/// Report total, used and available space for the filesystem of `path`.
///
/// "Free" is the space available to the current user, so `used` includes
/// any blocks reserved for the superuser.
///
/// # Errors
///
/// `NotFound` when `path` doesn't exist, `Io` if the platform query fails.
pub fn disk_usage(path: impl AsRef<Path>) -> Result<DiskUsage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KitError::NotFound(format!("path {}", path.display())));
    }
    let total = fs2::total_space(path)?;
    let free = fs2::available_space(path)?;
    Ok(usage_from(total, free))
}

fn usage_from(total: u64, free: u64) -> DiskUsage {
    let used = total.saturating_sub(free);
    #[allow(clippy::cast_precision_loss)]
    let percent = if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64 * 1000.0).round() / 10.0
    };
    DiskUsage {
        total_bytes: total,
        used_bytes: used,
        free_bytes: free,
        total: format_size(total),
        used: format_size(used),
        free: format_size(free),
        percent,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LargeFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub size: String,
    pub modified: Option<DateTime<Local>>,
}

/// The largest regular files below `dir` that are at least `min_bytes`,
/// biggest first, at most `top_n` of them.
///
/// Entries that can't be read are skipped.
///
/// # Errors
///
/// `NotFound` if `dir` is missing.
pub fn find_large_files(dir: impl AsRef<Path>, min_bytes: u64, top_n: usize) -> Result<Vec<LargeFile>> {
    let dir = dir.as_ref();
    require_dir(dir)?;

    let mut found = Vec::new();
    for entry in walk(dir).filter(|e| e.file_type().is_file()) {
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                debug!(path = %entry.path().display(), error = %err, "skipping file");
                continue;
            }
        };
        if meta.len() < min_bytes {
            continue;
        }
        found.push(LargeFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size_bytes: meta.len(),
            size: format_size(meta.len()),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            path: entry.into_path(),
        });
    }

    found.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    found.truncate(top_n);
    Ok(found)
}
