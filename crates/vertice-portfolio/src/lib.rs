//! # Vertice Portfolio
//!
//! Positions, risk factors and BRL exposures for mixed BR/US portfolios.
//!
//! ## Design
//!
//! - **Closed instrument type**: equities, options, futures and bonds are
//!   variants of [`Instrument`], resolved once from reference data
//! - **Ordered positions**: a [`Portfolio`] iterates in insertion order
//! - **Explicit market data**: every calculation takes the snapshot it
//!   reads from; nothing dated after the reference date is used
//!
//! ## Quick Start
//!
//! ```rust
//! use vertice_core::prelude::*;
//! use vertice_portfolio::prelude::*;
//!
//! let today = Date::from_ymd(2025, 5, 26).unwrap();
//! let market = MarketData::builder()
//!     .br_equity("PETR4", today, 32.0)
//!     .us_equity("AAPL", today, 200.0)
//!     .fx("USDBRL", today, 5.5)
//!     .build()
//!     .unwrap();
//!
//! let portfolio = Portfolio::builder()
//!     .reference_date(today)
//!     .add_position(Position::new(Instrument::br_equity("PETR4"), 1000.0).unwrap())
//!     .add_position(Position::new(Instrument::us_equity("AAPL"), 10.0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let exposure = ExposureEngine::new(&market, today)
//!     .portfolio_exposure(&portfolio)
//!     .unwrap();
//! assert_eq!(exposure.names(), vec!["PETR4", "AAPL", "USDBRL"]);
//! assert!((exposure.get("USDBRL").unwrap() - 11_000.0).abs() < 1e-9);
//! ```
//!
//! ## Module Overview
//!
//! - [`instrument`] - instrument identifiers and resolved instruments
//! - [`factor`] - risk factors and their source series
//! - [`position`] - positions and factor mapping
//! - [`portfolio`] - portfolio and builder
//! - [`options`] - Black-Scholes inputs of option positions
//! - [`exposure`] - exposure vectors and the exposure engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod exposure;
pub mod factor;
pub mod instrument;
pub mod options;
pub mod portfolio;
pub mod position;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::exposure::{Exposure, ExposureEngine, ExposureVector, DEFAULT_EWMA_LAMBDA};
    pub use crate::factor::{FactorSource, RiskFactor};
    pub use crate::instrument::{Instrument, InstrumentCategory, InstrumentId, IBOV_TICKER};
    pub use crate::options::{underlying_volatility, OptionInputs, VolatilitySource};
    pub use crate::portfolio::{Portfolio, PortfolioBuilder, PositionSpec};
    pub use crate::position::Position;
}

pub use exposure::{ExposureEngine, ExposureVector};
pub use factor::{FactorSource, RiskFactor};
pub use instrument::{Instrument, InstrumentId};
pub use options::OptionInputs;
pub use portfolio::{Portfolio, PortfolioBuilder, PositionSpec};
pub use position::Position;
