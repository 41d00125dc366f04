//! Confidence tiers for Value-at-Risk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VerticeError;

/// One-tailed confidence level used for VaR.
///
/// Only the three tiers quoted by the desk are supported; the z-scores are
/// the rounded standard normal quantiles used throughout the risk reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ConfidenceLevel {
    /// 90% one-tailed.
    P90,
    /// 95% one-tailed.
    P95,
    /// 99% one-tailed.
    #[default]
    P99,
}

impl ConfidenceLevel {
    /// All tiers in increasing order.
    pub const ALL: [ConfidenceLevel; 3] = [Self::P90, Self::P95, Self::P99];

    /// Standard normal quantile for the tier.
    #[must_use]
    pub fn z(self) -> f64 {
        match self {
            Self::P90 => 1.2816,
            Self::P95 => 1.6449,
            Self::P99 => 2.3263,
        }
    }

    /// Confidence as a probability, e.g. 0.99.
    #[must_use]
    pub fn probability(self) -> f64 {
        match self {
            Self::P90 => 0.90,
            Self::P95 => 0.95,
            Self::P99 => 0.99,
        }
    }

    /// Tail probability `1 - confidence`.
    #[must_use]
    pub fn tail(self) -> f64 {
        1.0 - self.probability()
    }

    /// Looks up a tier from a probability.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::DomainRange` for any value other than 0.90, 0.95 or 0.99.
    pub fn from_probability(p: f64) -> Result<Self, VerticeError> {
        Self::ALL
            .into_iter()
            .find(|level| (level.probability() - p).abs() < 1e-12)
            .ok_or_else(|| {
                VerticeError::domain_range("confidence", p, "supported tiers are 0.90, 0.95, 0.99")
            })
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::P90 => "90%",
            Self::P95 => "95%",
            Self::P99 => "99%",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ConfidenceLevel {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('%').to_ascii_uppercase().as_str() {
            "P90" | "90" | "0.90" | "0.9" => Ok(Self::P90),
            "P95" | "95" | "0.95" => Ok(Self::P95),
            "P99" | "99" | "0.99" => Ok(Self::P99),
            other => Err(VerticeError::domain_range(
                "confidence",
                other.parse().unwrap_or(f64::NAN),
                format!("unsupported confidence tier '{s}'"),
            )),
        }
    }
}
