//! 조회기간 (inquiry date range) in the `yyyyMMdd` form the API expects

use chrono::{Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date '{0}': expected yyyyMMdd")]
    InvalidDate(String),

    #[error("Begin date {begin} is after end date {end}")]
    Reversed { begin: String, end: String },

    #[error("Cannot go back {0} months")]
    OutOfRange(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    begin: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if begin > end {
            return Err(DateRangeError::Reversed {
                begin: begin.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { begin, end })
    }

    /// Parse two `yyyyMMdd` strings
    pub fn parse(begin: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_compact_date(begin)?, parse_compact_date(end)?)
    }

    /// 최근 N개월: from `today` minus `months` up to `today`.
    /// Short target months clamp to their last day (e.g. 3/31 - 1 month = 2/29 or 2/28).
    pub fn recent_months(months: u32, today: NaiveDate) -> Result<Self, DateRangeError> {
        let begin = today
            .checked_sub_months(Months::new(months))
            .ok_or(DateRangeError::OutOfRange(months))?;
        Self::new(begin, today)
    }

    pub fn begin_param(&self) -> String {
        self.begin.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

fn parse_compact_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    let trimmed = raw.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateRangeError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_recent_months_formats_compact_dates() {
        let range = DateRange::recent_months(3, date(2024, 5, 15)).unwrap();
        assert_eq!(range.begin_param(), "20240215");
        assert_eq!(range.end_param(), "20240515");
    }

    #[test]
    fn test_recent_months_clamps_to_month_end() {
        let range = DateRange::recent_months(1, date(2024, 3, 31)).unwrap();
        assert_eq!(range.begin_param(), "20240229");
    }

    #[test]
    fn test_parse_rejects_bad_formats() {
        assert!(DateRange::parse("2024-01-01", "20240131").is_err());
        assert!(DateRange::parse("20240230", "20240301").is_err());
        assert!(DateRange::parse("2024011", "20240131").is_err());
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        let err = DateRange::parse("20240201", "20240101").unwrap_err();
        assert!(matches!(err, DateRangeError::Reversed { .. }));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range = DateRange::parse("20240101", "20240101").unwrap();
        assert_eq!(range.begin_param(), range.end_param());
    }
}
