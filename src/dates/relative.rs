//! Human-readable relative times and durations.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{KitError, Result};

/// Unit lengths used for relative phrases. Months and years are the usual
/// 30 and 365 day approximations.
const INTERVALS: [(i64, &str); 7] = [
    (31_536_000, "year"),
    (2_592_000, "month"),
    (604_800, "week"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
    (1, "second"),
];

const DURATION_UNITS: [(u64, &str); 4] = [(86_400, "day"), (3_600, "hour"), (60, "minute"), (1, "second")];

/// Describe how long ago `dt` was, relative to `now`.
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use scriptkit::dates::time_ago;
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(time_ago(now - TimeDelta::hours(2), now), "2 hours ago");
/// assert_eq!(time_ago(now + TimeDelta::hours(2), now), "in the future");
/// ```
#[must_use]
pub fn time_ago(dt: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = now - dt;
    if diff < TimeDelta::zero() {
        return "in the future".to_string();
    }
    largest_unit(diff).map_or_else(
        || "just now".to_string(),
        |(count, unit)| format!("{count} {unit} ago"),
    )
}

/// Describe how long until `dt`, relative to `now`.
#[must_use]
pub fn time_until(dt: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = dt - now;
    if diff < TimeDelta::zero() {
        return "already passed".to_string();
    }
    largest_unit(diff).map_or_else(|| "now".to_string(), |(count, unit)| format!("in {count} {unit}"))
}

fn largest_unit(diff: TimeDelta) -> Option<(i64, String)> {
    let seconds = diff.num_seconds();
    INTERVALS.iter().find_map(|&(length, name)| {
        let count = seconds / length;
        (count >= 1).then(|| (count, plural(name, count)))
    })
}

fn plural(unit: &str, count: i64) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Format a number of seconds as `"1 hour, 1 minute"`.
///
/// The value is broken into days, hours, minutes and seconds; zero units
/// are skipped and only the first `granularity` non-zero units are kept.
/// Fractions of a second are dropped.
///
/// # Errors
///
/// `InvalidArgument` for negative or non-finite seconds, or a granularity
/// of zero.
pub fn format_duration(seconds: f64, granularity: usize) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(KitError::invalid(format!(
            "duration must be a non-negative number of seconds, got {seconds}"
        )));
    }
    if granularity == 0 {
        return Err(KitError::invalid("granularity must be at least 1"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut remaining = seconds.floor() as u64;
    let mut parts = Vec::new();
    for (length, name) in DURATION_UNITS {
        let value = remaining / length;
        if value > 0 {
            remaining -= value * length;
            let suffix = if value == 1 { "" } else { "s" };
            parts.push(format!("{value} {name}{suffix}"));
        }
    }

    if parts.is_empty() {
        return Ok("0 seconds".to_string());
    }
    parts.truncate(granularity);
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_ago() {
        let now = noon();
        assert_eq!(time_ago(now - TimeDelta::seconds(30), now), "30 seconds ago");
        assert_eq!(time_ago(now - TimeDelta::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - TimeDelta::hours(2), now), "2 hours ago");
        assert_eq!(time_ago(now - TimeDelta::days(1), now), "1 day ago");
        assert_eq!(time_ago(now - TimeDelta::days(14), now), "2 weeks ago");
        assert_eq!(time_ago(now - TimeDelta::days(400), now), "1 year ago");
    }

    #[test]
    fn test_time_ago_edges() {
        let now = noon();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - TimeDelta::milliseconds(500), now), "just now");
        assert_eq!(time_ago(now + TimeDelta::seconds(1), now), "in the future");
    }

    #[test]
    fn test_time_until() {
        let now = noon();
        assert_eq!(time_until(now + TimeDelta::hours(3), now), "in 3 hours");
        assert_eq!(time_until(now + TimeDelta::days(31), now), "in 1 month");
        assert_eq!(time_until(now - TimeDelta::seconds(1), now), "already passed");
        assert_eq!(time_until(now, now), "now");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45.0, 2).unwrap(), "45 seconds");
        assert_eq!(format_duration(90.0, 2).unwrap(), "1 minute, 30 seconds");
        assert_eq!(format_duration(3600.0, 2).unwrap(), "1 hour");
        assert_eq!(format_duration(3661.0, 2).unwrap(), "1 hour, 1 minute");
        assert_eq!(format_duration(90061.0, 3).unwrap(), "1 day, 1 hour, 1 minute");
    }

    #[test]
    fn test_format_duration_skips_zero_units() {
        assert_eq!(format_duration(3601.0, 2).unwrap(), "1 hour, 1 second");
        assert_eq!(format_duration(0.4, 2).unwrap(), "0 seconds");
    }

    #[test]
    fn test_format_duration_rejects_bad_input() {
        assert!(format_duration(-1.0, 2).is_err());
        assert!(format_duration(f64::NAN, 2).is_err());
        assert!(format_duration(10.0, 0).is_err());
    }
}
