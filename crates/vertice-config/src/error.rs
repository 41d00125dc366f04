//! Errors raised while loading and checking risk settings.

use std::fmt;

use thiserror::Error;
use vertice_core::VerticeError;

/// Result alias for the configuration layer.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Text format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON.
    Json,
    /// TOML.
    Toml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// Failure to load, write or accept a risk configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// One setting is out of range.
    #[error("invalid risk setting {field}: {message}")]
    InvalidSetting {
        /// Offending field.
        field: String,
        /// Rejected value, when the setting is numeric.
        value: Option<f64>,
        /// What is wrong with it.
        message: String,
    },

    /// Several settings are out of range.
    #[error("{} invalid risk settings: {}", .0.len(), describe(.0))]
    InvalidSettings(Vec<ValidationError>),

    /// The document could not be read.
    #[error("cannot read {format} risk config: {message}")]
    Parse {
        /// Document format.
        format: ConfigFormat,
        /// Parser message.
        message: String,
    },

    /// The configuration could not be written.
    #[error("cannot write {format} risk config: {message}")]
    Write {
        /// Document format.
        format: ConfigFormat,
        /// Serializer message.
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn parse(format: ConfigFormat, err: impl fmt::Display) -> Self {
        Self::Parse {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn write(format: ConfigFormat, err: impl fmt::Display) -> Self {
        Self::Write {
            format,
            message: err.to_string(),
        }
    }
}

fn describe(errors: &[ValidationError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

/// A single numeric setting outside its domain is a `DomainRange` error;
/// everything else is a `Configuration` error.
impl From<ConfigError> for VerticeError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidSetting {
                field,
                value: Some(value),
                message,
            } => VerticeError::domain_range(field, value, message),
            other => VerticeError::configuration(other.to_string()),
        }
    }
}

/// Range rule a setting must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty text.
    Required,
    /// A decay factor in `[0, 1]`.
    UnitInterval,
    /// A count greater than zero.
    PositiveCount,
    /// A finite value greater than zero.
    PositiveTolerance,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Required => "required",
            Self::UnitInterval => "unit_interval",
            Self::PositiveCount => "positive_count",
            Self::PositiveTolerance => "positive_tolerance",
        };
        write!(f, "{s}")
    }
}

/// A setting that breaks its rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field path, e.g. `historical_method.lambda`.
    pub field: &'static str,
    /// Rejected value, when the setting is numeric.
    pub value: Option<f64>,
    /// Human-readable reason.
    pub message: String,
    /// The broken rule.
    pub rule: Rule,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            value: None,
            message: message.into(),
            rule,
        }
    }

    /// Creates a validation error for a numeric value outside its domain.
    pub fn out_of_range(
        field: &'static str,
        rule: Rule,
        value: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            value: Some(value),
            ..Self::new(field, rule, message)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.field, self.message, self.rule)
    }
}

/// Settings that can check their own ranges.
pub trait Validate {
    /// Every broken rule, empty when the settings are usable.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if no rule is broken.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Collapses [`Validate::validate`] into a single result.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        if errors.len() > 1 {
            return Err(ConfigError::InvalidSettings(errors));
        }
        match errors.pop() {
            None => Ok(()),
            Some(err) => Err(ConfigError::InvalidSetting {
                field: err.field.to_string(),
                value: err.value,
                message: err.message,
            }),
        }
    }
}
