//! Business day calendars and business-day counting.
//!
//! This module provides:
//! - the [`Calendar`] trait
//! - [`WeekendCalendar`] (Saturday/Sunday only)
//! - [`HolidayCalendar`] (weekends plus a supplied holiday set)
//! - [`business_days`], the signed business-day count used for DI tenors,
//!   option expiries and bond maturities

mod holiday;

pub use holiday::{CalendarData, HolidayCalendar};

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days in `(start, end]`. Zero when `end <= start`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}

/// Signed business-day count between two dates.
///
/// - `end > start`: business days in `(start, end]`
/// - `end == start`: `-1` (the reference day itself is never counted)
/// - `end < start`: minus the business days in `(end, start]`
///
/// A span covering only a weekend yields 0.
///
/// # Example
///
/// ```rust
/// use vertice_core::calendars::{business_days, WeekendCalendar};
/// use vertice_core::types::Date;
///
/// let friday = Date::from_ymd(2025, 5, 23).unwrap();
/// let monday = Date::from_ymd(2025, 5, 26).unwrap();
/// assert_eq!(business_days(friday, monday, &WeekendCalendar), 1);
/// assert_eq!(business_days(monday, monday, &WeekendCalendar), -1);
/// ```
pub fn business_days<C: Calendar + ?Sized>(start: Date, end: Date, calendar: &C) -> i64 {
    if end == start {
        -1
    } else if end > start {
        calendar.business_days_between(start, end)
    } else {
        -calendar.business_days_between(end, start)
    }
}
