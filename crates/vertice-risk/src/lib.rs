//! # Vertice Risk
//!
//! Factor returns, covariance estimation, Value-at-Risk and backtesting
//! for mixed BR/US portfolios.
//!
//! ## Features
//!
//! - **Factor returns**: dated variations of equity, FX, rate and
//!   volatility factors, inner-joined into a date × factor matrix
//! - **Covariance**: EWMA and GARCH(1,1)
//! - **Parametric VaR**: delta-normal VaR with marginal, component and
//!   percentage decomposition by factor and by position
//! - **Historical VaR**: full-repricing scenarios with simple, age-weighted,
//!   peaks-over-threshold and volatility-scaled estimators, expected
//!   shortfall and stress loss
//! - **Backtesting**: Kupiec and Christoffersen likelihood-ratio tests
//!
//! ## Quick Start
//!
//! ```rust
//! use vertice_config::RiskConfig;
//! use vertice_core::prelude::*;
//! use vertice_math::statistics::{ewma_volatility, simple_returns};
//! use vertice_portfolio::prelude::*;
//! use vertice_risk::RiskEngine;
//!
//! let start = Date::from_ymd(2025, 5, 19).unwrap();
//! let prices = [50.0, 51.0, 49.8, 50.6, 50.0];
//! let today = start.add_days(4);
//! let market = MarketData::builder()
//!     .br_equity_series(
//!         "PETR4",
//!         prices.iter().enumerate().map(|(i, p)| (start.add_days(i as i64), *p)),
//!     )
//!     .build()
//!     .unwrap();
//! let portfolio = Portfolio::builder()
//!     .reference_date(today)
//!     .add_position(Position::new(Instrument::br_equity("PETR4"), 1000.0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let engine = RiskEngine::new(&portfolio, &market, RiskConfig::standard()).unwrap();
//! let var = engine.parametric_var(ConfidenceLevel::P99).unwrap();
//!
//! let sigma = ewma_volatility(&simple_returns(&prices), 0.94).unwrap();
//! assert!((var - 2.3263 * 50_000.0 * sigma).abs() < 1e-6);
//! ```
//!
//! ## Module Overview
//!
//! - [`factors`] - factor variation series and the aligned return matrix
//! - [`covariance`] - EWMA and GARCH covariance matrices
//! - [`var`] - parametric and historical VaR
//! - [`backtest`] - VaR model backtests
//! - [`engine`] - the [`RiskEngine`] facade

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod backtest;
pub mod covariance;
pub mod engine;
pub mod factors;
pub mod var;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backtest::{backtest, violations, BacktestResult};
    pub use crate::covariance::{
        ewma_covariance, fit_garch, garch_covariance, CovarianceMatrix, GarchFit,
        GarchParameters,
    };
    pub use crate::engine::RiskEngine;
    pub use crate::factors::{
        factor_variations, portfolio_factors, RiskFactorReturns, SeriesSettings,
    };
    pub use crate::var::{
        expected_shortfall, historical_var, parametric_var, stress_loss, FactorContribution,
        HistoricalVarResult, Scenario, ScenarioGenerator, ScenarioSet, TailFit,
        VarDecomposition,
    };
}

pub use backtest::BacktestResult;
pub use covariance::CovarianceMatrix;
pub use engine::RiskEngine;
pub use factors::RiskFactorReturns;
pub use var::{HistoricalVarResult, VarDecomposition};
