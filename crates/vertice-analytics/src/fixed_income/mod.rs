//! Fixed-income valuation.
//!
//! - [`BondValuer`]: PU, Macaulay and modified duration of NTN-B, NTN-F and
//!   Treasury notes
//! - [`DiFutureValuer`] and [`di_future_price`]: DI futures off the
//!   domestic curve

mod bond;
mod di_future;

pub use bond::{BondCurve, BondValuer, PeriodMetric, BUSINESS_DAYS_PER_YEAR, DAYS_PER_PERIOD};
pub use di_future::{di_future_price, DiFutureValuer};
