//! Recursive searches: glob matches, duplicates and directory totals.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{KitError, Result};
use crate::utils::{format_size, require_dir};

const HASH_CHUNK: usize = 8192;

/// How [`find_duplicates`] decides two files are the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKey {
    /// SHA-256 of the full contents.
    #[default]
    ContentHash,
    /// Byte size only. Cheap, but only a hint.
    Size,
}

impl std::str::FromStr for DuplicateKey {
    type Err = KitError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().replace('_', "-").as_str() {
            "content-hash" | "hash" => Ok(Self::ContentHash),
            "size" => Ok(Self::Size),
            _ => Err(KitError::invalid(format!(
                "invalid duplicate key {value} (expected content-hash|size)"
            ))),
        }
    }
}

/// Totals for [`directory_size`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySize {
    pub total_bytes: u64,
    pub total_human: String,
    pub file_count: usize,
}

/// Walk `dir` recursively, skipping entries that can't be read.
pub(crate) fn walk(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
}

/// Find every entry below `dir` whose file name matches the glob `pattern`
/// (for example `"*.rs"`). Directories match too, like a recursive glob.
///
/// # Errors
///
/// `NotFound` if `dir` is missing, `InvalidArgument` for a malformed pattern.
pub fn find_files(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    require_dir(dir)?;
    let pattern = glob::Pattern::new(pattern)
        .map_err(|err| KitError::invalid(format!("glob pattern {pattern:?}: {err}")))?;

    let matches: Vec<PathBuf> = walk(dir)
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
        .collect();
    debug!(dir = %dir.display(), count = matches.len(), "find_files");
    Ok(matches)
}

/// Group the regular files below `dir` by content hash or size, keeping
/// only groups with at least two members.
///
/// # Errors
///
/// `NotFound` if `dir` is missing; `Io` when a file can't be hashed.
pub fn find_duplicates(dir: impl AsRef<Path>, key: DuplicateKey) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    let dir = dir.as_ref();
    require_dir(dir)?;

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in walk(dir).filter(|e| e.file_type().is_file()) {
        let group = match key {
            DuplicateKey::ContentHash => hash_file(entry.path())?,
            DuplicateKey::Size => entry.metadata().map_err(std::io::Error::from)?.len().to_string(),
        };
        groups.entry(group).or_default().push(entry.into_path());
    }

    groups.retain(|_, paths| paths.len() > 1);
    Ok(groups)
}

/// Hex SHA-256 of a file, read in fixed-size chunks.
///
/// # Errors
///
/// `Io` if the file can't be opened or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Total size and count of regular files below `dir`.
///
/// # Errors
///
/// `NotFound` if `dir` is missing.
pub fn directory_size(dir: impl AsRef<Path>) -> Result<DirectorySize> {
    let dir = dir.as_ref();
    require_dir(dir)?;

    let mut total_bytes = 0u64;
    let mut file_count = 0usize;
    for entry in walk(dir).filter(|e| e.file_type().is_file()) {
        match entry.metadata() {
            Ok(meta) => {
                total_bytes += meta.len();
                file_count += 1;
            }
            Err(err) => debug!(path = %entry.path().display(), error = %err, "skipping file"),
        }
    }

    Ok(DirectorySize {
        total_bytes,
        total_human: format_size(total_bytes),
        file_count,
    })
}
