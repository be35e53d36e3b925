//! Sort files into one folder per extension.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{KitError, Result};
use crate::files::dotted_extension;
use crate::utils::require_dir;

/// Group key for files without an extension.
pub const NO_EXTENSION: &str = "no_extension";

struct PlannedMove {
    from: PathBuf,
    folder: PathBuf,
    to: PathBuf,
}

/// Group the regular files directly in `source` by lower-cased extension
/// and, unless `dry_run`, move each into `<target>/<ext>/`.
///
/// `target` defaults to `source`. Keys in the returned map keep the dot
/// (`".pdf"`), folder names drop it (`pdf`). Before anything moves, every
/// destination is checked; a file already at a destination, or a plain file
/// where a folder must go, aborts with `Conflict`.
///
/// # Errors
///
/// `NotFound` for a missing `source`, `Conflict` as described above, `Io`
/// if a move fails. A failed move puts back the files already moved and
/// removes the folders this call created.
pub fn organize_by_extension(
    source: impl AsRef<Path>,
    target: Option<&Path>,
    dry_run: bool,
) -> Result<BTreeMap<String, Vec<String>>> {
    let source = source.as_ref();
    require_dir(source)?;
    let target = target.unwrap_or(source);

    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut moves = Vec::new();
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let ext = dotted_extension(&path).to_lowercase();
        let key = if ext.is_empty() { NO_EXTENSION.to_string() } else { ext };

        let folder = target.join(key.trim_start_matches('.'));
        moves.push(PlannedMove {
            to: folder.join(entry.file_name()),
            folder,
            from: path,
        });
        grouped.entry(key).or_default().push(name);
    }
    for names in grouped.values_mut() {
        names.sort();
    }
    moves.sort_by(|a, b| a.from.cmp(&b.from));
    debug!(source = %source.display(), groups = grouped.len(), dry_run, "organize_by_extension");

    if dry_run {
        return Ok(grouped);
    }

    check_moves(&moves)?;
    apply_moves(&moves, move_file)?;
    Ok(grouped)
}

/// Rename, or copy then remove when `from` and `to` are on different
/// filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            std::fs::copy(from, to)?;
            if let Err(err) = std::fs::remove_file(from) {
                let _ = std::fs::remove_file(to);
                return Err(err);
            }
            Ok(())
        }
        other => other,
    }
}

fn apply_moves(
    moves: &[PlannedMove],
    mut mover: impl FnMut(&Path, &Path) -> io::Result<()>,
) -> Result<()> {
    let mut created: Vec<PathBuf> = Vec::new();
    let mut done: Vec<&PlannedMove> = Vec::new();

    for planned in moves {
        let step = create_folder(&planned.folder, &mut created)
            .and_then(|()| mover(&planned.from, &planned.to));
        if let Err(err) = step {
            roll_back(&done, &created, &mut mover);
            return Err(err.into());
        }
        info!(from = %planned.from.display(), to = %planned.to.display(), "moved");
        done.push(planned);
    }
    Ok(())
}

/// `create_dir_all`, recording each directory that did not exist before.
fn create_folder(folder: &Path, created: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut missing: Vec<PathBuf> = folder
        .ancestors()
        .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
        .map(Path::to_path_buf)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    let result = std::fs::create_dir_all(folder);
    missing.reverse();
    created.extend(missing.into_iter().filter(|dir| dir.is_dir()));
    result
}

fn roll_back(
    done: &[&PlannedMove],
    created: &[PathBuf],
    mover: &mut impl FnMut(&Path, &Path) -> io::Result<()>,
) {
    for planned in done.iter().rev() {
        if let Err(err) = mover(&planned.to, &planned.from) {
            warn!(file = %planned.to.display(), error = %err, "could not move file back");
        }
    }
    for dir in created.iter().rev() {
        if let Err(err) = std::fs::remove_dir(dir) {
            warn!(dir = %dir.display(), error = %err, "could not remove folder");
        }
    }
}

fn check_moves(moves: &[PlannedMove]) -> Result<()> {
    for planned in moves {
        if planned.folder.exists() && !planned.folder.is_dir() {
            return Err(KitError::Conflict(format!(
                "{} exists and is not a directory",
                planned.folder.display()
            )));
        }
        if planned.to.exists() {
            return Err(KitError::Conflict(format!(
                "{} already exists",
                planned.to.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn downloads() -> TempDir {
        let temp = TempDir::new().unwrap();
        for name in ["doc1.pdf", "doc2.PDF", "img1.jpg", "Makefile"] {
            std::fs::write(temp.path().join(name), name).unwrap();
        }
        temp
    }

    #[test]
    fn test_organize_dry_run() {
        let temp = downloads();
        let grouped = organize_by_extension(temp.path(), None, true).unwrap();
        assert_eq!(grouped[".pdf"], vec!["doc1.pdf", "doc2.PDF"]);
        assert_eq!(grouped[".jpg"], vec!["img1.jpg"]);
        assert_eq!(grouped[NO_EXTENSION], vec!["Makefile"]);
        assert!(temp.path().join("doc1.pdf").exists());
    }

    #[test]
    fn test_organize_moves_into_target() {
        let temp = downloads();
        let target = TempDir::new().unwrap();
        organize_by_extension(temp.path(), Some(target.path()), false).unwrap();
        assert!(target.path().join("pdf/doc1.pdf").exists());
        assert!(target.path().join("pdf/doc2.PDF").exists());
        assert!(target.path().join("jpg/img1.jpg").exists());
        assert!(target.path().join("no_extension/Makefile").exists());
        assert!(!temp.path().join("doc1.pdf").exists());
    }

    #[test]
    fn test_organize_in_place() {
        let temp = downloads();
        organize_by_extension(temp.path(), None, false).unwrap();
        assert!(temp.path().join("pdf/doc1.pdf").exists());
        assert!(temp.path().join("no_extension/Makefile").exists());
    }

    #[test]
    fn test_organize_conflict_moves_nothing() {
        let temp = downloads();
        std::fs::create_dir(temp.path().join("jpg")).unwrap();
        std::fs::write(temp.path().join("jpg/img1.jpg"), "older").unwrap();
        let result = organize_by_extension(temp.path(), None, false);
        assert!(matches!(result, Err(KitError::Conflict(_))));
        assert!(temp.path().join("doc1.pdf").exists());
        assert!(!temp.path().join("pdf").exists());
    }

    #[test]
    fn test_organize_file_blocking_folder() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("txt"), "plain").unwrap();
        std::fs::write(temp.path().join("a.txt"), "a").unwrap();
        let result = organize_by_extension(temp.path(), None, false);
        assert!(matches!(result, Err(KitError::Conflict(_))));
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_failed_move_rolls_back() {
        let temp = downloads();
        let target = TempDir::new().unwrap();
        let nested = target.path().join("sorted/by-ext");
        let moves = plan(temp.path(), &nested);

        let mut calls = 0;
        let result = apply_moves(&moves, |from, to| {
            calls += 1;
            if calls == 3 {
                return Err(io::Error::other("disk full"));
            }
            move_file(from, to)
        });

        assert!(matches!(result, Err(KitError::Io(_))));
        for name in ["doc1.pdf", "doc2.PDF", "img1.jpg", "Makefile"] {
            assert!(temp.path().join(name).exists(), "{name} not restored");
        }
        assert_eq!(std::fs::read_dir(target.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_move_file_keeps_contents() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.txt");
        std::fs::write(&from, "payload").unwrap();
        std::fs::create_dir(temp.path().join("txt")).unwrap();
        let to = temp.path().join("txt/a.txt");

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "payload");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_organize_across_filesystems() {
        let shm = Path::new("/dev/shm");
        if !shm.is_dir() {
            return;
        }
        let source = TempDir::new_in(shm).unwrap();
        std::fs::write(source.path().join("a.txt"), "a").unwrap();
        std::fs::write(source.path().join("b.pdf"), "b").unwrap();
        let target = TempDir::new().unwrap();

        organize_by_extension(source.path(), Some(target.path()), false).unwrap();
        assert_eq!(std::fs::read_dir(source.path()).unwrap().count(), 0);
        assert_eq!(std::fs::read_to_string(target.path().join("txt/a.txt")).unwrap(), "a");
        assert!(target.path().join("pdf/b.pdf").exists());
    }

    fn plan(source: &Path, target: &Path) -> Vec<PlannedMove> {
        let mut moves: Vec<PlannedMove> = std::fs::read_dir(source)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                let ext = dotted_extension(&entry.path()).to_lowercase();
                let folder = target.join(if ext.is_empty() { NO_EXTENSION } else { &ext[1..] });
                PlannedMove {
                    to: folder.join(entry.file_name()),
                    folder,
                    from: entry.path(),
                }
            })
            .collect();
        moves.sort_by(|a, b| a.from.cmp(&b.from));
        moves
    }
}
