//! Lenient date parsing over a list of `strftime` formats.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{KitError, Result};

/// Formats tried by [`parse_date_default`], in order.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse `input` with the first format that accepts it.
///
/// Date-only formats produce midnight.
///
/// # Errors
///
/// `InvalidArgument` when `formats` is empty or none of them match.
pub fn parse_date<S: AsRef<str>>(input: &str, formats: &[S]) -> Result<NaiveDateTime> {
    if formats.is_empty() {
        return Err(KitError::invalid("no date formats given"));
    }
    formats
        .iter()
        .find_map(|format| parse_with(input, format.as_ref()))
        .ok_or_else(|| {
            KitError::invalid(format!(
                "{input:?} does not match any of {} date formats",
                formats.len()
            ))
        })
}

/// [`parse_date`] with [`DEFAULT_DATE_FORMATS`].
///
/// # Errors
///
/// `InvalidArgument` when no default format matches.
pub fn parse_date_default(input: &str) -> Result<NaiveDateTime> {
    parse_date(input, DEFAULT_DATE_FORMATS)
}

fn parse_with(input: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, format)
                .ok()
                .map(|date| date.and_time(NaiveTime::default()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_date_defaults() {
        assert_eq!(parse_date_default("2024-03-15").unwrap(), at(2024, 3, 15, 0, 0, 0));
        assert_eq!(parse_date_default("25/12/2024").unwrap(), at(2024, 12, 25, 0, 0, 0));
        assert_eq!(parse_date_default("12/25/2024").unwrap(), at(2024, 12, 25, 0, 0, 0));
        assert_eq!(parse_date_default("2024/07/04").unwrap(), at(2024, 7, 4, 0, 0, 0));
        assert_eq!(parse_date_default("January 15, 2024").unwrap(), at(2024, 1, 15, 0, 0, 0));
        assert_eq!(parse_date_default("Feb 10, 2024").unwrap(), at(2024, 2, 10, 0, 0, 0));
        assert_eq!(
            parse_date_default("2024-03-15 08:30:00").unwrap(),
            at(2024, 3, 15, 8, 30, 0)
        );
        assert_eq!(
            parse_date_default("2024-03-15T08:30:05").unwrap(),
            at(2024, 3, 15, 8, 30, 5)
        );
    }

    #[test]
    fn test_parse_date_day_first_wins_when_ambiguous() {
        assert_eq!(parse_date_default("03/04/2024").unwrap(), at(2024, 4, 3, 0, 0, 0));
    }

    #[test]
    fn test_parse_date_custom_formats() {
        let formats = vec!["%d.%m.%Y".to_string()];
        assert_eq!(parse_date("31.01.2024", &formats).unwrap(), at(2024, 1, 31, 0, 0, 0));
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(matches!(
            parse_date_default("not a date"),
            Err(KitError::InvalidArgument(_))
        ));
        let empty: [&str; 0] = [];
        assert!(parse_date("2024-01-01", &empty).is_err());
    }
}
