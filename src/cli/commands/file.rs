//! skit file - Find, inspect, rename, organise and delete files
//!
//! `rename` and `organize` check every target before touching the disk;
//! pass `--dry-run` to only print the plan.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use crate::app::AppContext;
use crate::cli::output::{emit, emit_list};
use crate::error::Result;
use crate::files::{
    DeleteMode, DeleteOutcome, DuplicateKey, batch_rename, directory_size, file_info,
    find_duplicates, find_files, organize_by_extension, safe_delete,
};

#[derive(Args, Debug)]
pub struct FileArgs {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Find files whose name matches a glob, recursively
    Find {
        dir: PathBuf,

        /// Glob matched against file names, e.g. "*.txt"
        pattern: String,
    },

    /// Show metadata for a path
    Info { path: PathBuf },

    /// Replace text in the names of the files in a directory
    Rename {
        dir: PathBuf,
        old: String,
        new: String,

        #[arg(long)]
        dry_run: bool,
    },

    /// Find duplicate files
    Dupes {
        dir: PathBuf,

        /// content-hash or size
        #[arg(long, default_value = "content-hash")]
        by: DuplicateKey,
    },

    /// Move files into one folder per extension
    Organize {
        source: PathBuf,

        /// Where the extension folders go [default: SOURCE]
        #[arg(long)]
        target: Option<PathBuf>,

        #[arg(long)]
        dry_run: bool,
    },

    /// Move a path to the trash folder beside it, or remove a file
    Delete {
        path: PathBuf,

        /// Remove the file instead of trashing it
        #[arg(long)]
        permanent: bool,

        /// Trash folder name [default: files.trash_dir]
        #[arg(long, conflicts_with = "permanent")]
        trash_dir: Option<String>,
    },

    /// Total size and file count of a directory
    Size { dir: PathBuf },
}

pub fn run(ctx: &AppContext, args: &FileArgs) -> Result<()> {
    match &args.command {
        FileCommand::Find { dir, pattern } => {
            let found: Vec<String> = find_files(dir, pattern)?
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            emit_list(ctx, "file find", &found)
        }
        FileCommand::Info { path } => {
            let info = file_info(path)?;
            emit(ctx, "file info", &info, |info, layout| {
                layout
                    .title(&info.name)
                    .kv("path", &info.path)
                    .kv("extension", &info.extension)
                    .kv("size", &info.size_human)
                    .kv("type", if info.is_dir { "directory" } else { "file" });
                if let Some(modified) = info.modified {
                    layout.kv("modified", &modified.format("%Y-%m-%d %H:%M:%S").to_string());
                }
                if let Some(created) = info.created {
                    layout.kv("created", &created.format("%Y-%m-%d %H:%M:%S").to_string());
                }
            })
        }
        FileCommand::Rename {
            dir,
            old,
            new,
            dry_run,
        } => {
            let ops = batch_rename(dir, old, new, *dry_run)?;
            let verb = if *dry_run { "would rename" } else { "renamed" };
            emit(ctx, "file rename", &ops, |ops, layout| {
                for op in ops {
                    layout.push_line(format!("{} -> {}", op.old, op.new));
                }
                layout.push_line(style(format!("{} {verb}", ops.len())).dim().to_string());
            })
        }
        FileCommand::Dupes { dir, by } => {
            let groups = find_duplicates(dir, *by)?;
            emit(ctx, "file dupes", &groups, |groups, layout| {
                if groups.is_empty() {
                    layout.push_line(style("no duplicates").dim().to_string());
                }
                for (key, paths) in groups {
                    layout.section(key);
                    for path in paths {
                        layout.bullet(&display(path));
                    }
                }
            })
        }
        FileCommand::Organize {
            source,
            target,
            dry_run,
        } => {
            let grouped = organize_by_extension(source, target.as_deref(), *dry_run)?;
            emit(ctx, "file organize", &grouped, |grouped, layout| {
                for (ext, names) in grouped {
                    layout.kv(ext, &names.join(", "));
                }
            })
        }
        FileCommand::Delete {
            path,
            permanent,
            trash_dir,
        } => {
            let mode = if *permanent {
                DeleteMode::Permanent
            } else {
                DeleteMode::Trash {
                    dir_name: trash_dir.clone().unwrap_or_else(|| ctx.config.files.trash_dir.clone()),
                }
            };
            let outcome = safe_delete(path, &mode)?;
            emit(ctx, "file delete", &outcome, |outcome, layout| match outcome {
                DeleteOutcome::Trashed(to) => {
                    layout.push_line(format!("moved to {}", to.display()));
                }
                DeleteOutcome::Removed => {
                    layout.push_line(format!("removed {}", path.display()));
                }
            })
        }
        FileCommand::Size { dir } => {
            let size = directory_size(dir)?;
            emit(ctx, "file size", &size, |size, layout| {
                layout
                    .kv("total", &size.total_human)
                    .kv("bytes", &size.total_bytes.to_string())
                    .kv("files", &size.file_count.to_string());
            })
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
