//! Equity option pricing.
//!
//! - [`BlackScholes`]: premium, delta and vega of a European option
//! - [`BlackScholes::implied_vol`]: volatility backed out of an observed
//!   premium, with the [`NO_SOLUTION`] sentinel when none exists
//! - [`rate_conversion`]: discrete to continuous compounding

mod black_scholes;
mod implied_vol;

pub use black_scholes::{rate_conversion, BlackScholes};
pub use implied_vol::{is_unpriceable, DEFAULT_IMPLIED_VOL_TOLERANCE, NO_SOLUTION};
