//! CLI defaults loaded from TOML and the environment.
//!
//! Library helpers never read this; the `skit` binary resolves a [`Config`]
//! once and passes concrete values to each helper.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dates::{DEFAULT_DATE_FORMATS, WeekStart};
use crate::error::{KitError, Result};
use crate::files::DEFAULT_TRASH_DIR;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Defaults, then the global file or `explicit_path` (`--config` /
    /// `SKIT_CONFIG`), then `SKIT_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKIT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?
                .ok_or_else(|| KitError::Config(format!("config file {} not found", path.display())))?;
            config.merge_patch(patch)?;
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global)?;
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Parse a complete or partial TOML document on top of the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| KitError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch)?;
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("scriptkit/config.toml")),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| KitError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| KitError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) -> Result<()> {
        if let Some(patch) = patch.dates {
            self.dates.merge(patch);
        }
        if let Some(patch) = patch.files {
            self.files.merge(patch);
        }
        if let Some(patch) = patch.commands {
            self.commands.merge(patch)?;
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
        Ok(())
    }

    /// Apply `SKIT_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env_bool(&lookup, "SKIT_ROBOT") {
            self.output.robot = value;
        }

        if let Some(values) = env_list(&lookup, "SKIT_DATE_FORMATS") {
            self.dates.formats = values;
        }
        if let Some(value) = lookup("SKIT_WEEK_START") {
            self.dates.week_start = value
                .parse()
                .map_err(|err| KitError::Config(format!("SKIT_WEEK_START: {err}")))?;
        }
        if let Some(value) = env_parse::<usize, _>(&lookup, "SKIT_DURATION_GRANULARITY")? {
            self.dates.duration_granularity = value;
        }

        if let Some(value) = lookup("SKIT_TRASH_DIR") {
            self.files.trash_dir = value;
        }
        if let Some(value) = env_parse::<u64, _>(&lookup, "SKIT_LARGE_FILE_MIN_MB")? {
            self.files.large_file_min_mb = value;
        }
        if let Some(value) = env_parse::<usize, _>(&lookup, "SKIT_LARGE_FILE_TOP_N")? {
            self.files.large_file_top_n = value;
        }

        if let Some(value) = lookup("SKIT_COMMAND_TIMEOUT") {
            self.commands.timeout = parse_timeout(&value)?;
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.dates.formats.is_empty() {
            return Err(KitError::Config("dates.formats must not be empty".to_string()));
        }
        if self.dates.duration_granularity == 0 {
            return Err(KitError::Config(
                "dates.duration_granularity must be at least 1".to_string(),
            ));
        }
        if self.files.trash_dir.trim().is_empty() {
            return Err(KitError::Config("files.trash_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesConfig {
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub duration_granularity: usize,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| (*f).to_string()).collect(),
            week_start: WeekStart::Monday,
            duration_granularity: 2,
        }
    }
}

impl DatesConfig {
    fn merge(&mut self, patch: DatesPatch) {
        if let Some(values) = patch.formats {
            self.formats = values;
        }
        if let Some(value) = patch.week_start {
            self.week_start = value;
        }
        if let Some(value) = patch.duration_granularity {
            self.duration_granularity = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default)]
    pub trash_dir: String,
    #[serde(default)]
    pub large_file_min_mb: u64,
    #[serde(default)]
    pub large_file_top_n: usize,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            trash_dir: DEFAULT_TRASH_DIR.to_string(),
            large_file_min_mb: 100,
            large_file_top_n: 10,
        }
    }
}

impl FilesConfig {
    fn merge(&mut self, patch: FilesPatch) {
        if let Some(value) = patch.trash_dir {
            self.trash_dir = value;
        }
        if let Some(value) = patch.large_file_min_mb {
            self.large_file_min_mb = value;
        }
        if let Some(value) = patch.large_file_top_n {
            self.large_file_top_n = value;
        }
    }

    #[must_use]
    pub const fn large_file_min_bytes(&self) -> u64 {
        self.large_file_min_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// `None` waits forever.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl CommandsConfig {
    fn merge(&mut self, patch: CommandsPatch) -> Result<()> {
        if let Some(value) = patch.timeout {
            self.timeout = parse_timeout(&value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub robot: bool,
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.robot {
            self.robot = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub dates: Option<DatesPatch>,
    pub files: Option<FilesPatch>,
    pub commands: Option<CommandsPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatesPatch {
    pub formats: Option<Vec<String>>,
    pub week_start: Option<WeekStart>,
    pub duration_granularity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilesPatch {
    pub trash_dir: Option<String>,
    pub large_file_min_mb: Option<u64>,
    pub large_file_top_n: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CommandsPatch {
    /// `"45s"`, `"2m"` or `"none"`.
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub robot: Option<bool>,
}

/// Humantime duration, or `none`/`off`/`0` for no timeout.
pub fn parse_timeout(value: &str) -> Result<Option<Duration>> {
    match value.trim().to_lowercase().as_str() {
        "" | "none" | "off" | "0" => Ok(None),
        text => humantime_serde::re::humantime::parse_duration(text)
            .map(Some)
            .map_err(|err| KitError::Config(format!("invalid timeout {value}: {err}"))),
    }
}

fn env_bool<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<bool> {
    lookup(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| KitError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_list<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<Vec<String>> {
    lookup(key).map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
