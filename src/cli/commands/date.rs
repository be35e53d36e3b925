//! skit date - Relative times, business days and calendars
//!
//! Dates are parsed with `dates.formats` from the config; "now" and "today"
//! are local time.

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::{parse_datetime, parse_day, parse_days};
use crate::cli::output::{emit, emit_list, emit_value};
use crate::dates::{
    WeekStart, add_business_days, age, business_days_between, days_in_month, format_duration,
    is_leap_year, is_weekend, month_dates, parse_date, quarter, quarter_dates, time_ago,
    time_until, week_dates,
};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DateArgs {
    #[command(subcommand)]
    pub command: DateCommand,
}

#[derive(Subcommand, Debug)]
pub enum DateCommand {
    /// How long ago a date was ("3 days ago")
    Ago { date: String },

    /// How long until a date ("in 2 weeks")
    Until { date: String },

    /// Weekdays in [start, end) that aren't holidays
    BusinessDays {
        start: String,
        end: String,

        /// Date to skip (repeatable)
        #[arg(long = "holiday")]
        holidays: Vec<String>,
    },

    /// Step forward a number of business days
    AddBusinessDays {
        start: String,
        days: u32,

        /// Date to skip (repeatable)
        #[arg(long = "holiday")]
        holidays: Vec<String>,
    },

    /// Format seconds as "1 day, 2 hours"
    Duration {
        seconds: f64,

        /// Number of units to show [default: dates.duration_granularity]
        #[arg(long, short)]
        granularity: Option<usize>,
    },

    /// The seven dates of a week
    Week {
        /// Any date in the week [default: today]
        date: Option<String>,

        /// monday or sunday [default: dates.week_start]
        #[arg(long)]
        week_start: Option<WeekStart>,
    },

    /// Every date of a month
    Month { year: i32, month: u32 },

    /// Quarter of a date, or the bounds of a given quarter
    Quarter {
        /// Date to look up [default: today]
        date: Option<String>,

        /// Show the bounds of this quarter instead (needs --year)
        #[arg(long, requires = "year", conflicts_with = "date")]
        quarter: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Age in whole years
    Age {
        birth: String,

        /// Reference date [default: today]
        #[arg(long)]
        on: Option<String>,
    },

    /// Parse a date string
    Parse {
        input: String,

        /// strftime format to try instead of the configured ones (repeatable)
        #[arg(long = "format", short = 'f')]
        formats: Vec<String>,
    },

    /// Whether a year is a leap year
    LeapYear { year: i32 },
}

#[derive(Serialize)]
struct QuarterReport {
    year: i32,
    quarter: u32,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
struct MonthReport {
    days: u32,
    dates: Vec<NaiveDate>,
}

#[derive(Serialize)]
struct ParsedDate {
    datetime: String,
    date: NaiveDate,
    weekday: String,
    weekend: bool,
}

pub fn run(ctx: &AppContext, args: &DateArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let today = now.date();

    match &args.command {
        DateCommand::Ago { date } => {
            let text = time_ago(parse_datetime(ctx, date)?, now);
            emit_value(ctx, "date ago", &text)
        }
        DateCommand::Until { date } => {
            let text = time_until(parse_datetime(ctx, date)?, now);
            emit_value(ctx, "date until", &text)
        }
        DateCommand::BusinessDays {
            start,
            end,
            holidays,
        } => {
            let count = business_days_between(
                parse_day(ctx, start)?,
                parse_day(ctx, end)?,
                &parse_days(ctx, holidays)?,
            );
            emit_value(ctx, "date business-days", &count)
        }
        DateCommand::AddBusinessDays {
            start,
            days,
            holidays,
        } => {
            let result = add_business_days(parse_day(ctx, start)?, *days, &parse_days(ctx, holidays)?)?;
            emit_value(ctx, "date add-business-days", &result)
        }
        DateCommand::Duration {
            seconds,
            granularity,
        } => {
            let granularity = granularity.unwrap_or(ctx.config.dates.duration_granularity);
            let text = format_duration(*seconds, granularity)?;
            emit_value(ctx, "date duration", &text)
        }
        DateCommand::Week { date, week_start } => {
            let day = match date {
                Some(input) => parse_day(ctx, input)?,
                None => today,
            };
            let start = week_start.unwrap_or(ctx.config.dates.week_start);
            emit_list(ctx, "date week", &week_dates(day, start)?)
        }
        DateCommand::Month { year, month } => {
            let report = MonthReport {
                days: days_in_month(*year, *month)?,
                dates: month_dates(*year, *month)?,
            };
            emit(ctx, "date month", &report, |report, layout| {
                for day in &report.dates {
                    layout.push_line(day.format("%Y-%m-%d %a").to_string());
                }
            })
        }
        DateCommand::Quarter {
            date,
            quarter: which,
            year,
        } => {
            let (year, which) = match (which, year) {
                (Some(which), Some(year)) => (*year, *which),
                _ => {
                    let day = match date {
                        Some(input) => parse_day(ctx, input)?,
                        None => today,
                    };
                    (day.year(), quarter(day))
                }
            };
            let (start, end) = quarter_dates(year, which)?;
            let report = QuarterReport {
                year,
                quarter: which,
                start,
                end,
            };
            emit(ctx, "date quarter", &report, |report, layout| {
                layout
                    .kv("quarter", &format!("Q{} {}", report.quarter, report.year))
                    .kv("start", &report.start.to_string())
                    .kv("end", &report.end.to_string());
            })
        }
        DateCommand::Age { birth, on } => {
            let reference = match on {
                Some(input) => parse_day(ctx, input)?,
                None => today,
            };
            let years = age(parse_day(ctx, birth)?, reference)?;
            emit_value(ctx, "date age", &years)
        }
        DateCommand::Parse { input, formats } => {
            let parsed = if formats.is_empty() {
                parse_datetime(ctx, input)?
            } else {
                parse_date(input, formats)?
            };
            let date = parsed.date();
            let report = ParsedDate {
                datetime: parsed.format("%Y-%m-%dT%H:%M:%S").to_string(),
                date,
                weekday: date.format("%A").to_string(),
                weekend: is_weekend(date),
            };
            emit(ctx, "date parse", &report, |report, layout| {
                layout.push_line(report.datetime.clone());
            })
        }
        DateCommand::LeapYear { year } => emit_value(ctx, "date leap-year", &is_leap_year(*year)),
    }
}
