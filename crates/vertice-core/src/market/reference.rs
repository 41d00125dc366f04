//! Static reference data for derivatives and bonds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{VerticeError, VerticeResult};
use crate::types::{BondKind, Date, FutureKind, Locale, OptionKind};

fn default_multiplier() -> f64 {
    1.0
}

fn default_face() -> f64 {
    1000.0
}

fn default_locale() -> Locale {
    Locale::Br
}

/// Terms of a listed equity option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Reference id, e.g. `Opção 9`.
    pub id: String,
    /// Underlying ticker.
    pub underlying: String,
    /// Market of the underlying.
    #[serde(default = "default_locale")]
    pub underlying_locale: Locale,
    /// Strike price.
    pub strike: f64,
    /// Expiry date.
    pub expiry: Date,
    /// Call or put.
    pub kind: OptionKind,
    /// Contract multiplier.
    #[serde(default = "default_multiplier")]
    pub notional: f64,
    /// Risk-free rate, percent per annum.
    pub rate: f64,
    /// Dividend yield, percent per annum.
    #[serde(default)]
    pub dividend_yield: f64,
    /// Observed premium used to back out implied volatility.
    #[serde(default)]
    pub premium: Option<f64>,
}

/// Terms of a listed future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureSpec {
    /// Reference id, e.g. `Futuro 15`.
    pub id: String,
    /// Underlying family.
    pub kind: FutureKind,
    /// Contract size (notional per contract).
    pub contract_size: f64,
    /// Maturity date, mandatory for DI futures.
    #[serde(default)]
    pub maturity: Option<Date>,
}

impl FutureSpec {
    /// Checks that the entry is complete for its kind.
    pub fn validate(&self) -> VerticeResult<()> {
        if self.kind == FutureKind::Di && self.maturity.is_none() {
            return Err(VerticeError::configuration(format!(
                "DI future '{}' has no maturity",
                self.id
            )));
        }
        Ok(())
    }
}

/// Terms of a government bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Reference id, e.g. `Título 9`.
    pub id: String,
    /// Bond family.
    pub kind: BondKind,
    /// Annual coupon, percent.
    pub coupon: f64,
    /// Annual yield to maturity, percent.
    pub rate: f64,
    /// Maturity date.
    pub maturity: Date,
    /// Face value.
    #[serde(default = "default_face")]
    pub face: f64,
}

impl BondSpec {
    /// Market of the issuer.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.kind.locale()
    }
}

/// Reference tables for options, futures and bonds, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Option terms.
    #[serde(default)]
    pub options: BTreeMap<String, OptionSpec>,
    /// Future terms.
    #[serde(default)]
    pub futures: BTreeMap<String, FutureSpec>,
    /// Bond terms.
    #[serde(default)]
    pub bonds: BTreeMap<String, BondSpec>,
}

impl ReferenceData {
    /// Creates empty reference tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses reference tables from JSON.
    pub fn from_json(json: &str) -> VerticeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VerticeError::configuration(format!("invalid reference data: {e}")))
    }

    /// Registers an option.
    pub fn add_option(&mut self, spec: OptionSpec) {
        self.options.insert(spec.id.clone(), spec);
    }

    /// Registers a future.
    pub fn add_future(&mut self, spec: FutureSpec) {
        self.futures.insert(spec.id.clone(), spec);
    }

    /// Registers a bond.
    pub fn add_bond(&mut self, spec: BondSpec) {
        self.bonds.insert(spec.id.clone(), spec);
    }

    /// Looks up an option by id.
    pub fn option(&self, id: &str) -> VerticeResult<&OptionSpec> {
        self.options
            .get(id)
            .ok_or_else(|| VerticeError::configuration(format!("unknown option id '{id}'")))
    }

    /// Looks up a future by id.
    pub fn future(&self, id: &str) -> VerticeResult<&FutureSpec> {
        self.futures
            .get(id)
            .ok_or_else(|| VerticeError::configuration(format!("unknown future id '{id}'")))
    }

    /// Looks up a bond by id.
    pub fn bond(&self, id: &str) -> VerticeResult<&BondSpec> {
        self.bonds
            .get(id)
            .ok_or_else(|| VerticeError::configuration(format!("unknown bond id '{id}'")))
    }
}
