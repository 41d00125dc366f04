//! Error types for the Vertice library.
//!
//! Every fallible operation in the workspace eventually surfaces one of these
//! variants. The three that callers usually match on:
//!
//! - [`VerticeError::Configuration`]: malformed or missing reference metadata
//! - [`VerticeError::MissingMarketData`]: a required price, rate or curve row is absent
//! - [`VerticeError::DomainRange`]: a numeric input lies outside its valid domain
//!
//! None of these are retried. Implied-volatility non-convergence is not an
//! error at all: it is reported as a sentinel value by the option pricer.

use thiserror::Error;

/// A specialized Result type for Vertice operations.
pub type VerticeResult<T> = Result<T, VerticeError>;

/// The main error type for Vertice operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerticeError {
    /// Malformed or missing reference metadata for an instrument.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the configuration problem.
        reason: String,
    },

    /// A required market-data observation is not available.
    #[error("Missing market data for {series}: {reason}")]
    MissingMarketData {
        /// The series (ticker, pair, curve) that was queried.
        series: String,
        /// What exactly was missing.
        reason: String,
    },

    /// Numeric input outside of its valid domain.
    #[error("Domain error for {parameter} = {value}: {reason}")]
    DomainRange {
        /// Name of the offending parameter.
        parameter: String,
        /// The offending value.
        value: f64,
        /// Description of the valid domain.
        reason: String,
    },

    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    Calendar {
        /// Description of the error.
        reason: String,
    },

    /// Numerical routine failure (interpolation, linear algebra, solvers).
    #[error("Numerical error: {reason}")]
    Numerical {
        /// Description of the failure.
        reason: String,
    },

    /// Not enough observations to estimate a quantity.
    #[error("Insufficient data: need at least {required}, got {actual} ({context})")]
    InsufficientData {
        /// What was being estimated.
        context: String,
        /// Minimum number of observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },
}

impl VerticeError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a missing market data error.
    #[must_use]
    pub fn missing_market_data(series: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingMarketData {
            series: series.into(),
            reason: reason.into(),
        }
    }

    /// Creates a domain range error.
    #[must_use]
    pub fn domain_range(parameter: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::DomainRange {
            parameter: parameter.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a numerical error.
    #[must_use]
    pub fn numerical(reason: impl Into<String>) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }

    /// Returns true for errors caused by bad reference metadata or missing rows.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::MissingMarketData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VerticeError::missing_market_data("PETR4", "no price on or before 2025-05-26");
        assert!(err.to_string().contains("PETR4"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_domain_error() {
        let err = VerticeError::domain_range("lambda", 1.5, "must lie in [0, 1]");
        assert!(err.to_string().contains("lambda = 1.5"));
        assert!(!err.is_configuration());
    }
}
