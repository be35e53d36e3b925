//! skit sys - System info, disk usage, environment and commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit, emit_value};
use crate::config::parse_timeout;
use crate::error::Result;
use crate::system::{
    CommandOptions, create_temp_file, current_directory, disk_usage, env_var, env_var_or, env_vars,
    find_large_files, home_directory, run_command, system_info, temp_directory,
};

#[derive(Args, Debug)]
pub struct SysArgs {
    #[command(subcommand)]
    pub command: SysCommand,
}

#[derive(Subcommand, Debug)]
pub enum SysCommand {
    /// Operating system, architecture and host
    Info,

    /// Disk usage of the filesystem holding a path
    Disk {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Largest files below a directory
    Large {
        dir: PathBuf,

        /// Minimum size in MiB [default: files.large_file_min_mb]
        #[arg(long)]
        min_mb: Option<u64>,

        /// How many to show [default: files.large_file_top_n]
        #[arg(long, short = 'n')]
        top: Option<usize>,
    },

    /// Read one environment variable, or list them all
    Env {
        name: Option<String>,

        /// Value to print when NAME is unset
        #[arg(long, requires = "name")]
        default: Option<String>,
    },

    /// Run a shell command
    Run {
        command: String,

        /// e.g. "10s", "2m" or "none" [default: commands.timeout]
        #[arg(long)]
        timeout: Option<String>,

        /// Working directory for the command
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Let the command write straight to the terminal
        #[arg(long)]
        no_capture: bool,
    },

    /// Current, home and temp directories
    Paths,

    /// Create an empty temp file that is kept after exit
    TempFile {
        #[arg(long, default_value = "skit")]
        prefix: String,

        #[arg(long, default_value = "")]
        suffix: String,
    },
}

#[derive(Serialize)]
struct Paths {
    current: PathBuf,
    home: Option<PathBuf>,
    temp: PathBuf,
}

pub fn run(ctx: &AppContext, args: &SysArgs) -> Result<()> {
    match &args.command {
        SysCommand::Info => {
            let info = system_info();
            emit(ctx, "sys info", &info, |info, layout| {
                layout
                    .kv("os", &info.os)
                    .kv("family", &info.family)
                    .kv("arch", &info.arch)
                    .kv("hostname", info.hostname.as_deref().unwrap_or("unknown"))
                    .kv("cpus", &info.cpu_count.to_string())
                    .kv("version", &info.toolkit_version);
                if let Some(release) = &info.os_release {
                    layout.kv("kernel", release);
                }
            })
        }
        SysCommand::Disk { path } => {
            let usage = disk_usage(path)?;
            emit(ctx, "sys disk", &usage, |usage, layout| {
                layout
                    .kv("total", &usage.total)
                    .kv("used", &format!("{} ({}%)", usage.used, usage.percent))
                    .kv("free", &usage.free);
            })
        }
        SysCommand::Large { dir, min_mb, top } => {
            let min_bytes = match min_mb {
                Some(mb) => mb.saturating_mul(1024 * 1024),
                None => ctx.config.files.large_file_min_bytes(),
            };
            let top_n = top.unwrap_or(ctx.config.files.large_file_top_n);
            let files = find_large_files(dir, min_bytes, top_n)?;
            emit(ctx, "sys large", &files, |files, layout| {
                if files.is_empty() {
                    layout.push_line(style("no files at or above the size limit").dim().to_string());
                }
                for file in files {
                    layout.push_line(format!("{:>10}  {}", file.size, file.path.display()));
                }
            })
        }
        SysCommand::Env { name, default } => match (name, default) {
            (Some(name), Some(default)) => emit_value(ctx, "sys env", &env_var_or(name, default)),
            (Some(name), None) => {
                let value = env_var(name);
                emit(ctx, "sys env", &value, |value, layout| {
                    layout.push_line(value.clone().unwrap_or_default());
                })
            }
            (None, _) => {
                let vars = env_vars();
                emit(ctx, "sys env", &vars, |vars, layout| {
                    for (key, value) in vars {
                        layout.push_line(format!("{key}={value}"));
                    }
                })
            }
        },
        SysCommand::Run {
            command,
            timeout,
            cwd,
            no_capture,
        } => {
            let timeout = match timeout {
                Some(value) => parse_timeout(value)?,
                None => ctx.config.commands.timeout,
            };
            let options = CommandOptions {
                timeout,
                capture_output: !no_capture,
                cwd: cwd.clone(),
            };
            let output = run_command(command, &options)?;
            emit(ctx, "sys run", &output, |output, layout| {
                if !output.stdout.is_empty() {
                    layout.push_line(output.stdout.clone());
                }
                if !output.stderr.is_empty() {
                    layout.push_line(style(&output.stderr).red().to_string());
                }
                if !output.success {
                    let code = output
                        .exit_code
                        .map_or_else(|| "signal".to_string(), |code| code.to_string());
                    layout.push_line(style(format!("exit status: {code}")).yellow().to_string());
                }
            })
        }
        SysCommand::Paths => {
            let paths = Paths {
                current: current_directory()?,
                home: home_directory().ok(),
                temp: temp_directory(),
            };
            emit(ctx, "sys paths", &paths, |paths, layout| {
                layout.kv("current", &paths.current.display().to_string());
                if let Some(home) = &paths.home {
                    layout.kv("home", &home.display().to_string());
                }
                layout.kv("temp", &paths.temp.display().to_string());
            })
        }
        SysCommand::TempFile { prefix, suffix } => {
            let path = create_temp_file(prefix, suffix)?;
            emit(ctx, "sys temp-file", &path, |path, layout| {
                layout.push_line(path.display().to_string());
            })
        }
    }
}
