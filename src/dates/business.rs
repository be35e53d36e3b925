//! Weekday and business-day arithmetic.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{KitError, Result};

/// Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn is_business_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !is_weekend(date) && !holidays.contains(&date)
}

/// Count weekdays in `[start, end)` that are not holidays.
///
/// Returns zero when `end` is not after `start`.
///
/// ```
/// use chrono::NaiveDate;
/// use scriptkit::dates::business_days_between;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let next_monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// assert_eq!(business_days_between(monday, next_monday, &[]), 5);
/// ```
#[must_use]
pub fn business_days_between(start: NaiveDate, end: NaiveDate, holidays: &[NaiveDate]) -> usize {
    let holidays: HashSet<NaiveDate> = holidays.iter().copied().collect();
    start
        .iter_days()
        .take_while(|day| *day < end)
        .filter(|day| is_business_day(*day, &holidays))
        .count()
}

/// Move forward from `start` by `days` business days, skipping weekends and
/// holidays. `start` itself is never counted.
///
/// # Errors
///
/// `InvalidArgument` if the result would fall past the last representable
/// date.
pub fn add_business_days(start: NaiveDate, days: u32, holidays: &[NaiveDate]) -> Result<NaiveDate> {
    let holidays: HashSet<NaiveDate> = holidays.iter().copied().collect();
    let mut current = start;
    let mut added = 0;
    while added < days {
        current = current
            .succ_opt()
            .ok_or_else(|| KitError::invalid(format!("{days} business days after {start} is out of range")))?;
        if is_business_day(current, &holidays) {
            added += 1;
        }
    }
    Ok(current)
}
