//! # Vertice
//!
//! Market risk for mixed Brazilian and US portfolios: equities, equity
//! options, listed futures and government bonds, priced in BRL.
//!
//! This crate re-exports the workspace crates under one name:
//!
//! - [`core`] - dates, calendars, confidence levels, market data, errors
//! - [`math`] - interpolation, solvers, optimization, statistics
//! - [`curves`] - DI and treasury rate curves
//! - [`analytics`] - Black-Scholes, implied volatility, bonds, DI futures
//! - [`config`] - risk run settings
//! - [`portfolio`] - instruments, positions, risk factors, exposures
//! - [`risk`] - factor returns, covariance, VaR, backtests
//!
//! ```rust
//! use vertice::prelude::*;
//!
//! let config = RiskConfig::standard();
//! assert_eq!(config.confidence, ConfidenceLevel::P99);
//! assert_eq!(config.covariance_method, CovarianceMethod::Ewma);
//! ```

#![warn(missing_docs)]

pub use vertice_analytics as analytics;
pub use vertice_config as config;
pub use vertice_core as core;
pub use vertice_curves as curves;
pub use vertice_math as math;
pub use vertice_portfolio as portfolio;
pub use vertice_risk as risk;

/// Everything needed to run a risk report.
pub mod prelude {
    pub use vertice_analytics::prelude::*;
    pub use vertice_config::prelude::*;
    pub use vertice_core::prelude::*;
    pub use vertice_portfolio::prelude::*;
    pub use vertice_risk::prelude::*;
}
