//! Risk factors and the market series behind them.

use serde::{Deserialize, Serialize};
use std::fmt;

use vertice_core::market::USDBRL;
use vertice_core::types::{Locale, RiskFactorKind, Tenor};

/// The market series a risk factor is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FactorSource {
    /// Closing prices of an equity or index.
    EquityPrice {
        /// Ticker.
        ticker: String,
        /// Listing market.
        locale: Locale,
    },
    /// EWMA volatility of an equity's returns.
    EquityVolatility {
        /// Ticker of the underlying.
        ticker: String,
        /// Listing market.
        locale: Locale,
    },
    /// An FX rate, e.g. `USDBRL` or `EURUSD`.
    FxRate {
        /// Currency pair without separator.
        pair: String,
    },
    /// A DI curve vertex.
    DomesticRate {
        /// Tenor in business days.
        business_days: u32,
    },
    /// A treasury curve vertex.
    TreasuryRate {
        /// Tenor.
        tenor: Tenor,
    },
}

/// A standardized risk factor.
///
/// Two factors with the same [`name`](Self::name) are the same factor, so
/// positions sharing a curve vertex or an underlying share its exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor class.
    pub kind: RiskFactorKind,
    /// Series feeding the factor.
    pub source: FactorSource,
}

impl RiskFactor {
    /// Equity price factor.
    pub fn equity(ticker: impl Into<String>, locale: Locale) -> Self {
        Self {
            kind: RiskFactorKind::Equity,
            source: FactorSource::EquityPrice {
                ticker: ticker.into(),
                locale,
            },
        }
    }

    /// Volatility factor of an option underlying.
    pub fn volatility(ticker: impl Into<String>, locale: Locale) -> Self {
        Self {
            kind: RiskFactorKind::Volatility,
            source: FactorSource::EquityVolatility {
                ticker: ticker.into(),
                locale,
            },
        }
    }

    /// The USD/BRL factor.
    pub fn usdbrl() -> Self {
        Self {
            kind: RiskFactorKind::FxUsdBrl,
            source: FactorSource::FxRate {
                pair: USDBRL.to_string(),
            },
        }
    }

    /// A cross FX factor against USD.
    pub fn fx_cross(pair: impl Into<String>) -> Self {
        Self {
            kind: RiskFactorKind::FxCross,
            source: FactorSource::FxRate { pair: pair.into() },
        }
    }

    /// A DI curve vertex.
    pub fn domestic_rate(business_days: u32) -> Self {
        Self {
            kind: RiskFactorKind::Rate,
            source: FactorSource::DomesticRate { business_days },
        }
    }

    /// A treasury curve vertex.
    pub fn treasury_rate(tenor: Tenor) -> Self {
        Self {
            kind: RiskFactorKind::Rate,
            source: FactorSource::TreasuryRate { tenor },
        }
    }

    /// Canonical factor name: the ticker, `<ticker>_VOL`, the FX pair,
    /// `DI_<bd>` or `UST_<tenor>`.
    pub fn name(&self) -> String {
        match &self.source {
            FactorSource::EquityPrice { ticker, .. } => ticker.clone(),
            FactorSource::EquityVolatility { ticker, .. } => format!("{ticker}_VOL"),
            FactorSource::FxRate { pair } => pair.clone(),
            FactorSource::DomesticRate { business_days } => format!("DI_{business_days}"),
            FactorSource::TreasuryRate { tenor } => format!("UST_{}", tenor.label()),
        }
    }

    /// Returns true for factors whose variation is a simple return.
    pub fn is_price_like(&self) -> bool {
        matches!(
            self.kind,
            RiskFactorKind::Equity | RiskFactorKind::FxUsdBrl | RiskFactorKind::FxCross
        )
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
