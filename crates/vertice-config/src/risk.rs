//! Risk calculation settings.

use serde::{Deserialize, Serialize};
use vertice_core::types::ConfidenceLevel;

use crate::error::{ConfigError, ConfigFormat, ConfigResult, Rule, Validate, ValidationError};

/// Estimator for the factor covariance matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceMethod {
    /// Exponentially weighted moving average.
    #[default]
    Ewma,
    /// Per-factor GARCH(1,1) volatilities with the sample correlation.
    Garch,
}

/// Estimator applied to historical P&L scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum HistoricalMethod {
    /// Linear-interpolated empirical quantile.
    #[default]
    Simple,
    /// Age-weighted quantile, newest scenario heaviest.
    Boudoukh {
        /// Decay per day of age.
        lambda: f64,
    },
    /// Peaks over threshold with a fixed-shape tail.
    PeaksOverThreshold,
    /// EWMA volatility-scaled quantile.
    HullWhite {
        /// EWMA decay of the P&L variance.
        lambda: f64,
    },
}

impl HistoricalMethod {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Boudoukh { .. } => "boudoukh",
            Self::PeaksOverThreshold => "pot",
            Self::HullWhite { .. } => "hull_white",
        }
    }

    fn lambda(&self) -> Option<f64> {
        match self {
            Self::Boudoukh { lambda } | Self::HullWhite { lambda } => Some(*lambda),
            Self::Simple | Self::PeaksOverThreshold => None,
        }
    }
}

/// Parameters of a risk run.
///
/// Every field has a serde default, so a config file only needs to name
/// what it changes.
///
/// ```rust
/// use vertice_config::{CovarianceMethod, RiskConfig, Validate};
///
/// let config = RiskConfig::from_toml(
///     r#"
///     name = "DESK"
///     covariance_method = "garch"
///     scenario_count = 500
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.covariance_method, CovarianceMethod::Garch);
/// assert_eq!(config.ewma_lambda, 0.94);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Configuration name/identifier.
    #[serde(default = "default_name")]
    pub name: String,

    /// Description of this configuration.
    #[serde(default)]
    pub description: Option<String>,

    /// EWMA decay for covariance and volatility factors.
    #[serde(default = "default_ewma_lambda")]
    pub ewma_lambda: f64,

    /// Covariance estimator for parametric VaR.
    #[serde(default)]
    pub covariance_method: CovarianceMethod,

    /// Default confidence level.
    #[serde(default)]
    pub confidence: ConfidenceLevel,

    /// Number of most recent historical dates used as scenarios.
    #[serde(default = "default_scenario_count")]
    pub scenario_count: usize,

    /// Default historical VaR estimator.
    #[serde(default)]
    pub historical_method: HistoricalMethod,

    /// Annualization basis for domestic volatilities.
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,

    /// Implied volatility solver tolerance.
    #[serde(default = "default_implied_vol_tolerance")]
    pub implied_vol_tolerance: f64,

    /// Iteration cap of each GARCH likelihood search.
    #[serde(default = "default_garch_max_iterations")]
    pub garch_max_iterations: u32,
}

fn default_name() -> String {
    "STANDARD".to_string()
}

fn default_ewma_lambda() -> f64 {
    0.94
}

fn default_scenario_count() -> usize {
    252
}

fn default_trading_days() -> u32 {
    252
}

fn default_implied_vol_tolerance() -> f64 {
    1e-9
}

fn default_garch_max_iterations() -> u32 {
    2000
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RiskConfig {
    /// Creates a configuration with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ewma_lambda: default_ewma_lambda(),
            covariance_method: CovarianceMethod::default(),
            confidence: ConfidenceLevel::default(),
            scenario_count: default_scenario_count(),
            historical_method: HistoricalMethod::default(),
            trading_days_per_year: default_trading_days(),
            implied_vol_tolerance: default_implied_vol_tolerance(),
            garch_max_iterations: default_garch_max_iterations(),
        }
    }

    /// RiskMetrics-style settings: EWMA λ = 0.94, 99%, one year of
    /// scenarios.
    pub fn standard() -> Self {
        Self::new(default_name())
            .with_description("EWMA 0.94, 99% one-day VaR over 252 scenarios")
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::parse(ConfigFormat::Json, e))
    }

    /// Parses a configuration from TOML.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::parse(ConfigFormat::Toml, e))
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::write(ConfigFormat::Json, e))
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::write(ConfigFormat::Toml, e))
    }

    /// Builder method to set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the EWMA decay.
    #[must_use]
    pub fn with_ewma_lambda(mut self, lambda: f64) -> Self {
        self.ewma_lambda = lambda;
        self
    }

    /// Builder method to set the covariance estimator.
    #[must_use]
    pub fn with_covariance_method(mut self, method: CovarianceMethod) -> Self {
        self.covariance_method = method;
        self
    }

    /// Builder method to set the default confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: ConfidenceLevel) -> Self {
        self.confidence = confidence;
        self
    }

    /// Builder method to set the scenario window.
    #[must_use]
    pub fn with_scenario_count(mut self, count: usize) -> Self {
        self.scenario_count = count;
        self
    }

    /// Builder method to set the historical estimator.
    #[must_use]
    pub fn with_historical_method(mut self, method: HistoricalMethod) -> Self {
        self.historical_method = method;
        self
    }

    /// Builder method to set the GARCH iteration cap.
    #[must_use]
    pub fn with_garch_max_iterations(mut self, iterations: u32) -> Self {
        self.garch_max_iterations = iterations;
        self
    }

    /// Builder method to set the implied volatility tolerance.
    #[must_use]
    pub fn with_implied_vol_tolerance(mut self, tolerance: f64) -> Self {
        self.implied_vol_tolerance = tolerance;
        self
    }
}

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", Rule::Required, "cannot be empty"));
        }

        if !in_unit_interval(self.ewma_lambda) {
            errors.push(ValidationError::out_of_range(
                "ewma_lambda",
                Rule::UnitInterval,
                self.ewma_lambda,
                "decay factor must lie in [0, 1]",
            ));
        }

        if let Some(lambda) = self.historical_method.lambda() {
            if !in_unit_interval(lambda) {
                errors.push(ValidationError::out_of_range(
                    "historical_method.lambda",
                    Rule::UnitInterval,
                    lambda,
                    "decay factor must lie in [0, 1]",
                ));
            }
        }

        if self.scenario_count == 0 {
            errors.push(ValidationError::new(
                "scenario_count",
                Rule::PositiveCount,
                "at least one scenario is required",
            ));
        }

        if self.trading_days_per_year == 0 {
            errors.push(ValidationError::new(
                "trading_days_per_year",
                Rule::PositiveCount,
                "annualization basis must be positive",
            ));
        }

        if !(self.implied_vol_tolerance > 0.0 && self.implied_vol_tolerance.is_finite()) {
            errors.push(ValidationError::out_of_range(
                "implied_vol_tolerance",
                Rule::PositiveTolerance,
                self.implied_vol_tolerance,
                "tolerance must be finite and positive",
            ));
        }

        if self.garch_max_iterations == 0 {
            errors.push(ValidationError::new(
                "garch_max_iterations",
                Rule::PositiveCount,
                "iteration cap must be positive",
            ));
        }

        errors
    }
}
