//! Batch renaming of files in one directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{KitError, Result};
use crate::utils::require_dir;

/// One planned (or performed) rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOp {
    pub old: String,
    pub new: String,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// Replace `old` with `new` in the names of the regular files directly in
/// `dir`.
///
/// The plan is always returned, sorted by original name. With `dry_run`
/// nothing changes on disk. Otherwise every target is checked first: if any
/// target already exists or two files would end up with the same name,
/// nothing is renamed.
///
/// # Errors
///
/// `InvalidArgument` for an empty `old` or a `new` containing a path
/// separator, `NotFound` for a missing directory, `Conflict` for colliding
/// targets.
pub fn batch_rename(dir: impl AsRef<Path>, old: &str, new: &str, dry_run: bool) -> Result<Vec<RenameOp>> {
    let dir = dir.as_ref();
    if old.is_empty() {
        return Err(KitError::invalid("pattern to replace must not be empty"));
    }
    if new.contains(['/', '\\']) {
        return Err(KitError::invalid(format!(
            "replacement {new:?} must not contain a path separator"
        )));
    }
    require_dir(dir)?;

    let plan = plan_renames(dir, old, new)?;
    debug!(dir = %dir.display(), planned = plan.len(), dry_run, "batch_rename");
    if dry_run {
        return Ok(plan);
    }

    check_targets(&plan)?;
    for op in &plan {
        std::fs::rename(&op.old_path, &op.new_path)?;
        info!(from = %op.old, to = %op.new, "renamed");
    }
    Ok(plan)
}

fn plan_renames(dir: &Path, old: &str, new: &str) -> Result<Vec<RenameOp>> {
    let mut plan = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !name.contains(old) {
            continue;
        }
        let renamed = name.replace(old, new);
        if renamed == name {
            continue;
        }
        if renamed.is_empty() {
            return Err(KitError::invalid(format!("renaming {name:?} would leave an empty name")));
        }
        plan.push(RenameOp {
            old_path: entry.path(),
            new_path: dir.join(&renamed),
            old: name,
            new: renamed,
        });
    }
    plan.sort_by(|a, b| a.old.cmp(&b.old));
    Ok(plan)
}

fn check_targets(plan: &[RenameOp]) -> Result<()> {
    let mut seen = HashSet::new();
    for op in plan {
        if !seen.insert(&op.new) {
            return Err(KitError::Conflict(format!(
                "more than one file would be renamed to {}",
                op.new
            )));
        }
        if op.new_path.exists() {
            return Err(KitError::Conflict(format!(
                "{} already exists",
                op.new_path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn images() -> TempDir {
        let temp = TempDir::new().unwrap();
        for name in ["IMG_001.jpg", "IMG_002.jpg", "notes.txt"] {
            std::fs::write(temp.path().join(name), name).unwrap();
        }
        std::fs::create_dir(temp.path().join("IMG_dir")).unwrap();
        temp
    }

    #[test]
    fn test_batch_rename_dry_run() {
        let temp = images();
        let plan = batch_rename(temp.path(), "IMG_", "photo_", true).unwrap();
        let pairs: Vec<(&str, &str)> = plan.iter().map(|op| (op.old.as_str(), op.new.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("IMG_001.jpg", "photo_001.jpg"), ("IMG_002.jpg", "photo_002.jpg")]
        );
        assert!(temp.path().join("IMG_001.jpg").exists());
        assert!(!temp.path().join("photo_001.jpg").exists());
    }

    #[test]
    fn test_batch_rename_applies() {
        let temp = images();
        batch_rename(temp.path(), "IMG_", "photo_", false).unwrap();
        assert!(temp.path().join("photo_001.jpg").exists());
        assert!(temp.path().join("photo_002.jpg").exists());
        assert!(!temp.path().join("IMG_001.jpg").exists());
        // directories are left alone
        assert!(temp.path().join("IMG_dir").is_dir());
    }

    #[test]
    fn test_batch_rename_conflict_changes_nothing() {
        let temp = images();
        std::fs::write(temp.path().join("photo_002.jpg"), "existing").unwrap();
        let result = batch_rename(temp.path(), "IMG_", "photo_", false);
        assert!(matches!(result, Err(KitError::Conflict(_))));
        assert!(temp.path().join("IMG_001.jpg").exists());
        assert!(temp.path().join("IMG_002.jpg").exists());
    }

    #[test]
    fn test_batch_rename_duplicate_targets() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("aab.txt"), "").unwrap();
        std::fs::write(temp.path().join("ab.txt"), "").unwrap();
        // both become "b.txt"
        let result = batch_rename(temp.path(), "a", "", false);
        assert!(matches!(result, Err(KitError::Conflict(_))));
        assert!(temp.path().join("aab.txt").exists());
        assert!(temp.path().join("ab.txt").exists());
    }

    #[test]
    fn test_batch_rename_rejects_bad_arguments() {
        let temp = images();
        assert!(matches!(
            batch_rename(temp.path(), "", "x", true),
            Err(KitError::InvalidArgument(_))
        ));
        assert!(matches!(
            batch_rename(temp.path(), "IMG_", "../", true),
            Err(KitError::InvalidArgument(_))
        ));
    }
}
