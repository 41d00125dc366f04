//! # Vertice Curves
//!
//! Read access to the two rate curves of the market-data snapshot:
//!
//! - the domestic **DI curve**, keyed by business-day tenor and linearly
//!   interpolated between observed vertices
//! - the **US Treasury curve**, keyed by tenor label, read at the vertex
//!   nearest to a bond's remaining life
//!
//! Both are exposed through the [`RateCurve`] trait, which yields the dated
//! rate history (percent) of a single vertex up to a reference date, and a
//! risk-factor name for that vertex.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod domestic;
mod treasury;

pub use domestic::{interpolated_rate_curve, DomesticCurve};
pub use treasury::{nearest_treasury_vertex, TreasuryCurve};

use vertice_core::types::Date;
use vertice_core::VerticeResult;

/// A single rate vertex with a dated history.
pub trait RateCurve {
    /// Risk-factor name of the vertex (`DI_378`, `UST_10Y`).
    fn name(&self) -> String;

    /// Chronological `(date, rate %)` observations on or before `as_of`.
    fn history(&self, as_of: Date) -> VerticeResult<Vec<(Date, f64)>>;

    /// Latest rate on or before `as_of`.
    fn latest(&self, as_of: Date) -> VerticeResult<f64> {
        self.history(as_of)?
            .last()
            .map(|(_, rate)| *rate)
            .ok_or_else(|| {
                vertice_core::VerticeError::missing_market_data(
                    self.name(),
                    format!("no rate on or before {as_of}"),
                )
            })
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        interpolated_rate_curve, nearest_treasury_vertex, DomesticCurve, RateCurve,
        TreasuryCurve,
    };
}
