//! # Vertice Configuration Layer
//!
//! Settings for a risk run: the EWMA decay, the covariance estimator, the
//! default confidence tier, the historical scenario window and estimator,
//! and solver budgets.
//!
//! Configurations are plain serde structs with per-field defaults, so they
//! load from partial JSON or TOML documents, and implement [`Validate`] to
//! report every out-of-range parameter at once.
//!
//! # Example
//!
//! ```rust
//! use vertice_config::{HistoricalMethod, RiskConfig, Validate};
//! use vertice_core::ConfidenceLevel;
//!
//! let config = RiskConfig::standard()
//!     .with_confidence(ConfidenceLevel::P95)
//!     .with_historical_method(HistoricalMethod::Boudoukh { lambda: 0.97 });
//!
//! assert!(config.validate_or_error().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod risk;

pub use error::{ConfigError, ConfigFormat, ConfigResult, Rule, Validate, ValidationError};
pub use risk::{CovarianceMethod, HistoricalMethod, RiskConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::risk::{CovarianceMethod, HistoricalMethod, RiskConfig};
}
