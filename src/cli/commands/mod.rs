//! CLI command implementations
//!
//! Each command group has its own module with:
//! - Args struct and subcommand enum
//! - run() function to execute the command

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};

pub mod config;
pub mod date;
pub mod file;
pub mod sys;
pub mod text;
pub mod url;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::dates::parse_date;
use crate::error::{KitError, Result};

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Text(args) => text::run(ctx, args),
        Commands::Date(args) => date::run(ctx, args),
        Commands::File(args) => file::run(ctx, args),
        Commands::Url(args) => url::run(ctx, args),
        Commands::Sys(args) => sys::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

/// `-` reads all of stdin; anything else is used as is.
pub(crate) fn read_input(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Parse with the configured date formats.
pub(crate) fn parse_datetime(ctx: &AppContext, input: &str) -> Result<NaiveDateTime> {
    parse_date(input, &ctx.config.dates.formats)
}

pub(crate) fn parse_day(ctx: &AppContext, input: &str) -> Result<NaiveDate> {
    parse_datetime(ctx, input).map(|dt| dt.date())
}

pub(crate) fn parse_days(ctx: &AppContext, inputs: &[String]) -> Result<Vec<NaiveDate>> {
    inputs.iter().map(|input| parse_day(ctx, input)).collect()
}

/// Parse `key=value` pairs given on the command line.
pub(crate) fn parse_pairs(inputs: &[String]) -> Result<Vec<(String, String)>> {
    inputs
        .iter()
        .map(|input| {
            input
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| KitError::invalid(format!("expected key=value, got {input}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn pairs_split_on_first_equals() {
        let pairs = parse_pairs(&["q=a=b".to_string(), "page=".to_string()]).unwrap();
        assert_eq!(pairs[0], ("q".to_string(), "a=b".to_string()));
        assert_eq!(pairs[1], ("page".to_string(), String::new()));
        assert!(parse_pairs(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn days_use_configured_formats() {
        let mut config = Config::default();
        config.dates.formats = vec!["%d.%m.%Y".to_string()];
        let ctx = AppContext::with_config(config, false);
        let day = parse_day(&ctx, "24.12.2024").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 12, 24).unwrap());
        assert!(parse_day(&ctx, "2024-12-24").is_err());
    }

    #[test]
    fn plain_input_is_passed_through() {
        assert_eq!(read_input("hello").unwrap(), "hello");
    }
}
