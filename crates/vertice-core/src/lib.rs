//! # Vertice Core
//!
//! Core types and abstractions for the Vertice market risk library.
//!
//! This crate provides the foundational building blocks used throughout Vertice:
//!
//! - **Types**: `Date`, `Tenor`, `ConfidenceLevel` and the instrument taxonomy
//! - **Business Day Calendars**: weekend and holiday calendars, signed
//!   business-day counts
//! - **Market Data**: the read-only snapshot of prices, FX, rate curves and
//!   reference tables every calculation reads from
//!
//! ## Example
//!
//! ```rust
//! use vertice_core::prelude::*;
//!
//! let reference = Date::from_ymd(2025, 5, 26).unwrap();
//! let expiry = Date::from_ymd(2025, 6, 2).unwrap();
//! assert_eq!(business_days(reference, expiry, &WeekendCalendar), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod calendars;
pub mod error;
pub mod market;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{business_days, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::error::{VerticeError, VerticeResult};
    pub use crate::market::{
        BondSpec, FutureSpec, MarketData, MarketDataBuilder, OptionSpec, ReferenceData,
    };
    pub use crate::types::{
        BondKind, ConfidenceLevel, Date, FutureKind, Locale, OptionKind, RiskFactorKind, Tenor,
    };
}

// Re-export commonly used types at crate root
pub use error::{VerticeError, VerticeResult};
pub use types::{ConfidenceLevel, Date, Locale};
