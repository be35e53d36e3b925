//! Calendar lookups: weeks, months, quarters, leap years and ages.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{KitError, Result};

/// First day of the week for [`week_dates`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl std::str::FromStr for WeekStart {
    type Err = KitError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(KitError::invalid(format!(
                "invalid week start {value} (expected monday|sunday)"
            ))),
        }
    }
}

/// The seven dates of the week containing `date`.
///
/// # Errors
///
/// `InvalidArgument` when the week runs past chrono's representable range.
pub fn week_dates(date: NaiveDate, start: WeekStart) -> Result<Vec<NaiveDate>> {
    let offset = match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    let first = date
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| KitError::invalid(format!("week of {date} is out of range")))?;
    let week: Vec<NaiveDate> = first.iter_days().take(7).collect();
    if week.len() != 7 {
        return Err(KitError::invalid(format!("week of {date} is out of range")));
    }
    Ok(week)
}

/// Number of days in the given month.
///
/// # Errors
///
/// `InvalidArgument` for a month outside `1..=12` or an unrepresentable year.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    Ok(last_of_month(year, month)?.day())
}

/// Every date of the given month.
///
/// # Errors
///
/// `InvalidArgument` for a month outside `1..=12` or an unrepresentable year.
pub fn month_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let first = first_of_month(year, month)?;
    let last = last_of_month(year, month)?;
    Ok(first.iter_days().take_while(|day| *day <= last).collect())
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| KitError::invalid(format!("invalid month {year}-{month}")))
}

fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next.and_then(|d| d.pred_opt()) {
        Some(last) => Ok(last),
        // December of the last representable year
        None => Ok(first.with_day(31).unwrap_or(first)),
    }
}

/// Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Age in whole years on `reference`.
///
/// # Errors
///
/// `InvalidArgument` when `birth` is after `reference`.
pub fn age(birth: NaiveDate, reference: NaiveDate) -> Result<u32> {
    if birth > reference {
        return Err(KitError::invalid(format!(
            "birth date {birth} is after reference date {reference}"
        )));
    }
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Ok(u32::try_from(years).unwrap_or(0))
}

/// Quarter of the year, `1..=4`.
#[must_use]
pub fn quarter(date: NaiveDate) -> u32 {
    (date.month0() / 3) + 1
}

/// First and last day of a quarter.
///
/// # Errors
///
/// `InvalidArgument` for a quarter outside `1..=4`.
pub fn quarter_dates(year: i32, quarter: u32) -> Result<(NaiveDate, NaiveDate)> {
    if !(1..=4).contains(&quarter) {
        return Err(KitError::invalid(format!(
            "quarter must be 1-4, got {quarter}"
        )));
    }
    let start_month = (quarter - 1) * 3 + 1;
    Ok((
        first_of_month(year, start_month)?,
        last_of_month(year, start_month + 2)?,
    ))
}
