//! Instruments resolved from identifiers and reference tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use vertice_core::market::{BondSpec, FutureSpec, OptionSpec, ReferenceData};
use vertice_core::types::{FutureKind, Locale};
use vertice_core::{VerticeError, VerticeResult};

/// Ticker of the Ibovespa index series in the BR equity table.
pub const IBOV_TICKER: &str = "IBOV";

/// Category of an instrument identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentCategory {
    /// Brazilian listed equity.
    BrEquity,
    /// US listed equity.
    UsEquity,
    /// Listed equity option.
    Option,
    /// Listed future.
    Future,
    /// Government bond.
    Bond,
}

impl InstrumentCategory {
    /// Returns true if the category needs a reference-table lookup.
    #[must_use]
    pub fn needs_reference(self) -> bool {
        matches!(self, Self::Option | Self::Future | Self::Bond)
    }
}

/// An instrument as named in a position list: category plus code.
///
/// Equity codes are tickers; option, future and bond codes are reference
/// ids such as `Opção 9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId {
    /// Instrument category.
    pub category: InstrumentCategory,
    /// Ticker or reference id.
    pub code: String,
}

impl InstrumentId {
    /// Creates an identifier.
    pub fn new(category: InstrumentCategory, code: impl Into<String>) -> Self {
        Self {
            category,
            code: code.into(),
        }
    }

    /// A Brazilian equity ticker.
    pub fn br_equity(ticker: impl Into<String>) -> Self {
        Self::new(InstrumentCategory::BrEquity, ticker)
    }

    /// A US equity ticker.
    pub fn us_equity(ticker: impl Into<String>) -> Self {
        Self::new(InstrumentCategory::UsEquity, ticker)
    }

    /// An option reference id.
    pub fn option(id: impl Into<String>) -> Self {
        Self::new(InstrumentCategory::Option, id)
    }

    /// A future reference id.
    pub fn future(id: impl Into<String>) -> Self {
        Self::new(InstrumentCategory::Future, id)
    }

    /// A bond reference id.
    pub fn bond(id: impl Into<String>) -> Self {
        Self::new(InstrumentCategory::Bond, id)
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.category, self.code)
    }
}

/// An instrument with its static terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// Cash equity.
    Equity {
        /// Ticker.
        ticker: String,
        /// Listing market.
        locale: Locale,
    },
    /// Equity option.
    Option(OptionSpec),
    /// Listed future.
    Future(FutureSpec),
    /// Government bond.
    Bond(BondSpec),
}

impl Instrument {
    /// Resolves an identifier against the reference tables.
    ///
    /// # Errors
    ///
    /// `Configuration` when an option, future or bond is given no reference
    /// tables or an id missing from them, or when a DI future lacks its
    /// maturity.
    pub fn resolve(id: &InstrumentId, reference: Option<&ReferenceData>) -> VerticeResult<Self> {
        let lookup = || {
            reference.ok_or_else(|| {
                VerticeError::configuration(format!("{id} needs reference data to resolve"))
            })
        };

        match id.category {
            InstrumentCategory::BrEquity => Ok(Self::br_equity(&id.code)),
            InstrumentCategory::UsEquity => Ok(Self::us_equity(&id.code)),
            InstrumentCategory::Option => Ok(Self::Option(lookup()?.option(&id.code)?.clone())),
            InstrumentCategory::Future => {
                let spec = lookup()?.future(&id.code)?;
                spec.validate()?;
                Ok(Self::Future(spec.clone()))
            }
            InstrumentCategory::Bond => Ok(Self::Bond(lookup()?.bond(&id.code)?.clone())),
        }
    }

    /// A Brazilian equity.
    pub fn br_equity(ticker: impl Into<String>) -> Self {
        Self::Equity {
            ticker: ticker.into(),
            locale: Locale::Br,
        }
    }

    /// A US equity.
    pub fn us_equity(ticker: impl Into<String>) -> Self {
        Self::Equity {
            ticker: ticker.into(),
            locale: Locale::Us,
        }
    }

    /// Ticker or reference id.
    pub fn code(&self) -> &str {
        match self {
            Self::Equity { ticker, .. } => ticker,
            Self::Option(spec) => &spec.id,
            Self::Future(spec) => &spec.id,
            Self::Bond(spec) => &spec.id,
        }
    }

    /// Market the position is booked in: US for US equities and Treasury
    /// notes, BR for everything else.
    pub fn locale(&self) -> Locale {
        match self {
            Self::Equity { locale, .. } => *locale,
            Self::Bond(spec) => spec.locale(),
            Self::Option(_) | Self::Future(_) => Locale::Br,
        }
    }

    /// Future family, if this is a future.
    pub fn future_kind(&self) -> Option<FutureKind> {
        match self {
            Self::Future(spec) => Some(spec.kind),
            _ => None,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equity { ticker, locale } => write!(f, "{ticker} ({locale})"),
            Self::Option(spec) => write!(f, "{} on {}", spec.id, spec.underlying),
            Self::Future(spec) => write!(f, "{} ({})", spec.id, spec.kind),
            Self::Bond(spec) => write!(f, "{} ({:?})", spec.id, spec.kind),
        }
    }
}
