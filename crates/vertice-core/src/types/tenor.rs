//! Treasury curve tenors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VerticeError;

/// A labelled curve vertex such as `3M` or `10Y`.
///
/// The label is kept verbatim because it doubles as the column key of the
/// treasury curve table and as part of the risk-factor name (`UST_10Y`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenor {
    label: String,
    years: f64,
}

impl Tenor {
    /// Parses a tenor label: a positive integer followed by `D`, `W`, `M` or `Y`.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::Configuration` for malformed labels.
    pub fn parse(label: &str) -> Result<Self, VerticeError> {
        let trimmed = label.trim();
        let invalid = || VerticeError::configuration(format!("invalid tenor label '{label}'"));

        let unit = trimmed.chars().last().ok_or_else(invalid)?;
        let count: u32 = trimmed[..trimmed.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        if count == 0 {
            return Err(invalid());
        }

        let years = match unit.to_ascii_uppercase() {
            'D' => f64::from(count) / 365.0,
            'W' => f64::from(count) * 7.0 / 365.0,
            'M' => f64::from(count) / 12.0,
            'Y' => f64::from(count),
            _ => return Err(invalid()),
        };

        Ok(Self {
            label: trimmed.to_ascii_uppercase(),
            years,
        })
    }

    /// The canonical label, e.g. `10Y`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Length of the tenor in years.
    #[must_use]
    pub fn years(&self) -> f64 {
        self.years
    }
}

impl FromStr for Tenor {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_tenors() {
        assert_relative_eq!(Tenor::parse("1M").unwrap().years(), 1.0 / 12.0);
        assert_relative_eq!(Tenor::parse("6M").unwrap().years(), 0.5);
        assert_relative_eq!(Tenor::parse("10Y").unwrap().years(), 10.0);
        assert_eq!(Tenor::parse("30y").unwrap().label(), "30Y");
    }

    #[test]
    fn test_invalid_tenors() {
        assert!(Tenor::parse("").is_err());
        assert!(Tenor::parse("Y").is_err());
        assert!(Tenor::parse("0Y").is_err());
        assert!(Tenor::parse("5Q").is_err());
        assert!(Tenor::parse("ten years").is_err());
    }
}
