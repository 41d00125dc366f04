//! Date type for risk calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{VerticeError, VerticeResult};

/// A calendar date for market-data lookups and tenor arithmetic.
///
/// Newtype wrapper around `chrono::NaiveDate`; serialized as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use vertice_core::types::Date;
///
/// let date = Date::from_ymd(2025, 5, 26).unwrap();
/// assert_eq!(date.add_days(7).day(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> VerticeResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| VerticeError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> VerticeResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| VerticeError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks if the date is a weekday (Monday through Friday).
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Returns the previous weekday on or before this date.
    #[must_use]
    pub fn prev_weekday(&self) -> Self {
        let mut date = *self;
        while date.is_weekend() {
            date = date.add_days(-1);
        }
        date
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl std::str::FromStr for Date {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Calendar days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 5, 26).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 5);
        assert_eq!(date.day(), 26);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::parse("2025-13-01").is_err());
        assert!(Date::parse("26/05/2025").is_err());
    }

    #[test]
    fn test_days_between_and_operators() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = Date::from_ymd(2025, 12, 31).unwrap();
        assert_eq!(d1.days_between(&d2), 364);
        assert_eq!(d2 - d1, 364);
        assert_eq!(d1 + 30, Date::from_ymd(2025, 1, 31).unwrap());
        assert_eq!((d1 + 30) - 30, d1);
    }

    #[test]
    fn test_weekday_helpers() {
        let saturday = Date::from_ymd(2025, 5, 24).unwrap();
        let friday = Date::from_ymd(2025, 5, 23).unwrap();
        assert!(saturday.is_weekend());
        assert!(friday.is_weekday());
        assert_eq!(saturday.prev_weekday(), friday);
        assert_eq!(friday.prev_weekday(), friday);
    }

    #[test]
    fn test_parse_and_serde() {
        let date: Date = "2025-05-26".parse().unwrap();
        assert_eq!(date.to_string(), "2025-05-26");

        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-05-26\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }
}
