//! Date handling shared by the store and the query layer.
//!
//! Dates are stored as `YYYY-MM-DD` strings so that lexicographic comparison in
//! Polars expressions matches chronological order. Everything outside the frames
//! works with [`NaiveDate`].

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// The on-disk and on-the-wire date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window used by the precipitation and tobs queries.
///
/// This is a fixed day count, not a calendar year: a window ending on
/// 2017-08-23 starts on 2016-08-23, but one ending on 2016-03-01 starts on
/// 2015-03-02 because of the leap day.
pub const WINDOW_DAYS: i64 = 365;

#[derive(Debug, Error)]
pub enum DateFormatError {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    #[error("'{0}' is not zero-padded")]
    NotPadded(String),
}

/// Parses a `YYYY-MM-DD` string.
///
/// Month and day must be two digits: `2017-8-3` is rejected even though it names
/// a valid day, since stored dates are compared as strings.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)?;
    if format_date(date) != value {
        return Err(DateFormatError::NotPadded(value.to_string()));
    }
    Ok(date)
}

/// Formats a date the way it is stored in the frames.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First day (inclusive) of the trailing window that ends on `max_date`.
pub fn window_start(max_date: NaiveDate) -> NaiveDate {
    max_date - Duration::days(WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_round_trip() {
        let date = parse_date("2017-08-23").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());
        assert_eq!(format_date(date), "2017-08-23");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2017-13-01").is_err());
        assert!(parse_date("2017/01/01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_requires_zero_padding() {
        assert!(matches!(
            parse_date("2017-8-3"),
            Err(DateFormatError::NotPadded(ref v)) if v == "2017-8-3"
        ));
        assert!(parse_date("2017-1-05").is_err());
        assert!(parse_date("2017-01-5").is_err());
        assert!(parse_date("17-01-05").is_err());
    }

    #[test]
    fn test_window_start_is_fixed_day_offset() {
        let end = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
        assert_eq!(
            window_start(end),
            NaiveDate::from_ymd_opt(2016, 8, 23).unwrap()
        );

        // 2016 is a leap year, so 365 days back does not land on the same month/day.
        let end = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        assert_eq!(
            window_start(end),
            NaiveDate::from_ymd_opt(2015, 3, 2).unwrap()
        );
    }
}
