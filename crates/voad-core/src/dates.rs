//! Inclusive calendar date ranges.

use chrono::NaiveDate;

use crate::error::DateRangeError;

/// Every date from `start` to `end`, both included. Rejects `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DateRangeError> {
    if end < start {
        return Err(DateRangeError::EndBeforeStart { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day() {
        assert_eq!(date_range(d(2024, 1, 1), d(2024, 1, 1)).unwrap(), vec![d(2024, 1, 1)]);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let days = date_range(d(2024, 2, 27), d(2024, 3, 2)).unwrap();
        assert_eq!(
            days,
            vec![d(2024, 2, 27), d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1), d(2024, 3, 2)]
        );
    }

    #[test]
    fn end_before_start_rejected() {
        let err = date_range(d(2024, 1, 2), d(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::EndBeforeStart {
                start: d(2024, 1, 2),
                end: d(2024, 1, 1)
            }
        );
    }

    #[test]
    fn parse() {
        assert_eq!(parse_date("2024-01-05").unwrap(), d(2024, 1, 5));
        assert!(parse_date("2024/01/05").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
