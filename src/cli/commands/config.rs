//! skit config - Show the effective configuration

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::emit;
use crate::config::Config;
use crate::error::{KitError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print which config file was loaded
    #[arg(long)]
    pub path: bool,
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    path: Option<String>,
    config: &'a Config,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let report = ConfigReport {
        path: ctx
            .config_path
            .as_ref()
            .map(|path| path.display().to_string()),
        config: &ctx.config,
    };

    if args.path {
        return emit(ctx, "config", &report.path, |path, layout| {
            layout.push_line(path.as_deref().unwrap_or("(defaults)"));
        });
    }

    let rendered = toml::to_string_pretty(&ctx.config)
        .map_err(|err| KitError::Serialization(format!("render config: {err}")))?;
    emit(ctx, "config", &report, |report, layout| {
        layout.push_line(format!(
            "# {}",
            report.path.as_deref().unwrap_or("built-in defaults")
        ));
        layout.push_line(rendered.trim_end());
    })
}
