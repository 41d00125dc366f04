//! Instrument taxonomy: markets, risk-factor kinds and reference-data labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VerticeError;

/// Market a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazil (BRL-denominated).
    Br,
    /// United States (USD-denominated, converted through USDBRL).
    Us,
}

impl Locale {
    /// Returns true for the domestic (BRL) market.
    #[must_use]
    pub fn is_domestic(self) -> bool {
        matches!(self, Self::Br)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Br => write!(f, "BR"),
            Self::Us => write!(f, "US"),
        }
    }
}

/// Kind of market risk a factor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskFactorKind {
    /// Equity or equity-index price.
    Equity,
    /// Implied or realized volatility of an underlying.
    Volatility,
    /// Interest rate vertex.
    Rate,
    /// USD/BRL exchange rate.
    FxUsdBrl,
    /// Exchange rate of a non-BRL currency pair.
    FxCross,
}

impl RiskFactorKind {
    /// Returns true for either FX kind.
    #[must_use]
    pub fn is_fx(self) -> bool {
        matches!(self, Self::FxUsdBrl | Self::FxCross)
    }
}

impl fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equity => "Equity",
            Self::Volatility => "Volatility",
            Self::Rate => "Rate",
            Self::FxUsdBrl => "FX USD/BRL",
            Self::FxCross => "FX Cross",
        };
        write!(f, "{s}")
    }
}

/// Option right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl FromStr for OptionKind {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            _ => Err(VerticeError::configuration(format!("unknown option kind '{s}'"))),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

/// Underlying of a listed future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FutureKind {
    /// Ibovespa index future.
    Ibov,
    /// DI (interbank deposit rate) future.
    Di,
    /// USD/BRL dollar future.
    UsdBrl,
    /// EUR/USD cross.
    EurUsd,
    /// USD/CAD cross.
    UsdCad,
    /// USD/JPY cross.
    UsdJpy,
    /// USD/MXN cross.
    UsdMxn,
}

impl FutureKind {
    /// Reference-table label, e.g. `USD/BRL`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ibov => "IBOV",
            Self::Di => "DI",
            Self::UsdBrl => "USD/BRL",
            Self::EurUsd => "EUR/USD",
            Self::UsdCad => "USD/CAD",
            Self::UsdJpy => "USD/JPY",
            Self::UsdMxn => "USD/MXN",
        }
    }

    /// FX series key for currency futures (`USDBRL`, `EURUSD`, ...).
    #[must_use]
    pub fn fx_pair(self) -> Option<&'static str> {
        match self {
            Self::Ibov | Self::Di => None,
            Self::UsdBrl => Some("USDBRL"),
            Self::EurUsd => Some("EURUSD"),
            Self::UsdCad => Some("USDCAD"),
            Self::UsdJpy => Some("USDJPY"),
            Self::UsdMxn => Some("USDMXN"),
        }
    }

    /// Returns true for currency pairs that do not involve BRL.
    #[must_use]
    pub fn is_cross(self) -> bool {
        matches!(
            self,
            Self::EurUsd | Self::UsdCad | Self::UsdJpy | Self::UsdMxn
        )
    }
}

impl FromStr for FutureKind {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IBOV" => Ok(Self::Ibov),
            "DI" => Ok(Self::Di),
            "USD/BRL" => Ok(Self::UsdBrl),
            "EUR/USD" => Ok(Self::EurUsd),
            "USD/CAD" => Ok(Self::UsdCad),
            "USD/JPY" => Ok(Self::UsdJpy),
            "USD/MXN" => Ok(Self::UsdMxn),
            _ => Err(VerticeError::configuration(format!("unknown future type '{s}'"))),
        }
    }
}

impl fmt::Display for FutureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Government bond family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondKind {
    /// Brazilian inflation-linked treasury.
    NtnB,
    /// Brazilian fixed-rate treasury.
    NtnF,
    /// US Treasury note.
    TreasuryNote,
}

impl BondKind {
    /// Market of the issuer.
    #[must_use]
    pub fn locale(self) -> Locale {
        match self {
            Self::NtnB | Self::NtnF => Locale::Br,
            Self::TreasuryNote => Locale::Us,
        }
    }
}

impl FromStr for BondKind {
    type Err = VerticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        match label.to_ascii_uppercase().as_str() {
            "NTN-B" | "NTNB" => Ok(Self::NtnB),
            "NTN-F" | "NTNF" => Ok(Self::NtnF),
            _ if label.contains("Note") => Ok(Self::TreasuryNote),
            _ => Err(VerticeError::configuration(format!("unknown bond type '{s}'"))),
        }
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NtnB => write!(f, "NTN-B"),
            Self::NtnF => write!(f, "NTN-F"),
            Self::TreasuryNote => write!(f, "Treasury Note"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_labels() {
        assert_eq!("USD/BRL".parse::<FutureKind>().unwrap(), FutureKind::UsdBrl);
        assert_eq!("di".parse::<FutureKind>().unwrap(), FutureKind::Di);
        assert!("BTC/USD".parse::<FutureKind>().is_err());

        assert!(FutureKind::UsdJpy.is_cross());
        assert!(!FutureKind::UsdBrl.is_cross());
        assert_eq!(FutureKind::EurUsd.fx_pair(), Some("EURUSD"));
        assert_eq!(FutureKind::Ibov.fx_pair(), None);
    }

    #[test]
    fn test_bond_labels() {
        assert_eq!("NTN-B".parse::<BondKind>().unwrap(), BondKind::NtnB);
        // Misspelled labels still resolve as long as they name a Note.
        assert_eq!(
            "Teasury Note".parse::<BondKind>().unwrap(),
            BondKind::TreasuryNote
        );
        assert!("LTN".parse::<BondKind>().is_err());
        assert_eq!(BondKind::TreasuryNote.locale(), Locale::Us);
        assert!(BondKind::NtnF.locale().is_domestic());
    }

    #[test]
    fn test_option_kind() {
        assert_eq!("Call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("PUT".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert!("straddle".parse::<OptionKind>().is_err());
    }
}
