//! Holiday calendar loaded from a list of dates.
//!
//! # Example
//!
//! ```
//! use vertice_core::calendars::{Calendar, HolidayCalendar};
//! use vertice_core::types::Date;
//!
//! let cal = HolidayCalendar::from_json(
//!     r#"{ "name": "B3", "holidays": ["2025-04-18", "2025-04-21"] }"#,
//! ).unwrap();
//!
//! assert!(!cal.is_business_day(Date::from_ymd(2025, 4, 21).unwrap()));
//! assert!(cal.is_business_day(Date::from_ymd(2025, 4, 22).unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Calendar;
use crate::error::{VerticeError, VerticeResult};
use crate::types::Date;

/// Weekends plus an explicit set of holidays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates an empty calendar (weekends only).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    /// Creates a calendar from a list of holiday dates.
    pub fn from_dates(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        let mut cal = Self::new(name);
        cal.add_holidays(holidays);
        cal
    }

    /// Loads a calendar from JSON.
    ///
    /// ```json
    /// { "name": "B3", "holidays": ["2025-01-01", "2025-03-03"] }
    /// ```
    pub fn from_json(json: &str) -> VerticeResult<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| VerticeError::Calendar {
                reason: format!("Failed to parse calendar JSON: {e}"),
            })?;
        data.build()
    }

    /// Serializes the calendar to JSON.
    pub fn to_json(&self) -> VerticeResult<String> {
        let data = CalendarData {
            name: self.name.clone(),
            holidays: self.holidays.iter().map(ToString::to_string).collect(),
        };
        serde_json::to_string_pretty(&data).map_err(|e| VerticeError::Calendar {
            reason: format!("Failed to serialize calendar: {e}"),
        })
    }

    /// Adds a single holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Adds several holidays.
    pub fn add_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        self.holidays.extend(dates);
    }

    /// Number of registered holidays (weekend dates included if supplied).
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// Iterates over the registered holidays in date order.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday() && !self.holidays.contains(&date)
    }
}

/// Serializable calendar description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarData {
    /// Calendar name.
    #[serde(default)]
    pub name: String,
    /// Holiday dates as `YYYY-MM-DD` strings.
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl CalendarData {
    /// Builds the calendar, validating every date.
    pub fn build(self) -> VerticeResult<HolidayCalendar> {
        let mut cal = HolidayCalendar::new(self.name);
        for raw in &self.holidays {
            let date = Date::parse(raw).map_err(|_| VerticeError::Calendar {
                reason: format!("Invalid holiday date '{raw}'"),
            })?;
            cal.add_holiday(date);
        }
        Ok(cal)
    }
}
