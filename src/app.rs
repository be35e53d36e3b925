use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let config_path = cli.config.clone().or_else(global_config_path);
        let robot_mode = cli.robot || config.output.robot;

        Ok(Self {
            config,
            config_path,
            robot_mode,
        })
    }

    #[must_use]
    pub const fn with_config(config: Config, robot_mode: bool) -> Self {
        Self {
            config,
            config_path: None,
            robot_mode,
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("scriptkit/config.toml"))
        .filter(|path| path.exists())
}
