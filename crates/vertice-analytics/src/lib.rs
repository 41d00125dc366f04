//! # Vertice Analytics
//!
//! Instrument valuation for the Vertice market risk library.
//!
//! ## Modules
//!
//! - [`options`]: Black-Scholes-Merton premium, delta, vega and implied
//!   volatility, with rates and volatilities quoted in percent
//! - [`fixed_income`]: semiannual bond PU, Macaulay and modified duration,
//!   DI futures
//!
//! ## Example
//!
//! ```rust
//! use vertice_analytics::prelude::*;
//! use vertice_core::types::OptionKind;
//!
//! let bs = BlackScholes::new(32.0, 30.0, 0.25, 14.5, 0.0).unwrap();
//! let premium = bs.price(35.0, OptionKind::Call);
//! let vol = bs.implied_vol(premium, OptionKind::Call, DEFAULT_IMPLIED_VOL_TOLERANCE);
//! assert!((vol - 35.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod fixed_income;
pub mod options;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixed_income::{
        di_future_price, BondCurve, BondValuer, DiFutureValuer, PeriodMetric,
    };
    pub use crate::options::{
        is_unpriceable, rate_conversion, BlackScholes, DEFAULT_IMPLIED_VOL_TOLERANCE,
        NO_SOLUTION,
    };
}

pub use fixed_income::{BondValuer, DiFutureValuer};
pub use options::BlackScholes;
