//! Command-line interface for `skit`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

#[derive(Parser, Debug)]
#[command(name = "skit", version, about = "Everyday scripting helpers: text, dates, files, URLs and system")]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// No log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the global one
    #[arg(long, global = true, env = "SKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, transform and analyse text
    Text(commands::text::TextArgs),

    /// Relative times, business days and calendars
    Date(commands::date::DateArgs),

    /// Find, inspect, rename, organise and delete files
    File(commands::file::FileArgs),

    /// Parse, build and encode URLs
    Url(commands::url::UrlArgs),

    /// System info, disk usage, environment and commands
    Sys(commands::sys::SysArgs),

    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}
