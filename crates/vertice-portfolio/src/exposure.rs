//! Signed BRL exposures per risk factor.
//!
//! ```text
//! equity      q · price · fx · delta · notional
//! volatility  q · notional · vega
//! fx          q · size · USDBRL                 (USD/BRL future)
//!             q · (size / cross) · USDBRL       (cross future)
//! rate        q · PU · D_mod · fx               (bond)
//!             q · size                          (DI future)
//! ```
//!
//! The USD/BRL factor of a multi-factor position inherits the BRL value of
//! the position's primary leg rather than being recomputed; only a
//! position whose sole factor is USD/BRL prices it directly.

use tracing::{debug, info};

use vertice_analytics::fixed_income::BondValuer;
use vertice_core::market::{BondSpec, FutureSpec, MarketData, OptionSpec};
use vertice_core::types::{Date, FutureKind, Locale};
use vertice_core::{VerticeError, VerticeResult};

use crate::factor::RiskFactor;
use crate::instrument::Instrument;
use crate::options::OptionInputs;
use crate::portfolio::Portfolio;
use crate::position::Position;

/// Default EWMA decay.
pub const DEFAULT_EWMA_LAMBDA: f64 = 0.94;

/// One factor's exposure.
#[derive(Debug, Clone, PartialEq)]
pub struct Exposure {
    /// The factor.
    pub factor: RiskFactor,
    /// Signed BRL exposure.
    pub value: f64,
}

/// Exposures keyed by factor name, in order of first appearance.
///
/// Adding a factor that is already present sums into the existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureVector {
    entries: Vec<Exposure>,
}

impl ExposureVector {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to `factor`, creating the entry if needed.
    pub fn add(&mut self, factor: RiskFactor, value: f64) {
        let name = factor.name();
        match self.entries.iter_mut().find(|e| e.factor.name() == name) {
            Some(entry) => entry.value += value,
            None => self.entries.push(Exposure { factor, value }),
        }
    }

    /// Adds every entry of `other`.
    pub fn merge(&mut self, other: ExposureVector) {
        for exposure in other.entries {
            self.add(exposure.factor, exposure.value);
        }
    }

    /// Exposure to the factor called `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.factor.name() == name)
            .map(|e| e.value)
    }

    /// Factor names in order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.factor.name()).collect()
    }

    /// Factors in order.
    pub fn factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.entries.iter().map(|e| &e.factor)
    }

    /// Exposure values in order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &Exposure> {
        self.entries.iter()
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no factors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values reordered to `names`; names without exposure get zero.
    ///
    /// # Errors
    ///
    /// `Configuration` if an exposure factor is missing from `names`.
    pub fn aligned_to(&self, names: &[String]) -> VerticeResult<Vec<f64>> {
        if let Some(missing) = self.entries.iter().find(|e| !names.contains(&e.factor.name())) {
            return Err(VerticeError::configuration(format!(
                "exposure factor '{}' has no covariance entry",
                missing.factor.name()
            )));
        }
        Ok(names
            .iter()
            .map(|name| self.get(name).unwrap_or(0.0))
            .collect())
    }
}

impl<'a> IntoIterator for &'a ExposureVector {
    type Item = &'a Exposure;
    type IntoIter = std::slice::Iter<'a, Exposure>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Computes exposures from a market snapshot as of a reference date.
#[derive(Debug, Clone, Copy)]
pub struct ExposureEngine<'a> {
    market: &'a MarketData,
    reference_date: Date,
    ewma_lambda: f64,
    implied_vol_tolerance: f64,
}

impl<'a> ExposureEngine<'a> {
    /// Creates an engine with the default EWMA decay and solver tolerance.
    pub fn new(market: &'a MarketData, reference_date: Date) -> Self {
        Self {
            market,
            reference_date,
            ewma_lambda: DEFAULT_EWMA_LAMBDA,
            implied_vol_tolerance: vertice_analytics::options::DEFAULT_IMPLIED_VOL_TOLERANCE,
        }
    }

    /// Sets the EWMA decay used for option volatility fallbacks.
    #[must_use]
    pub fn with_ewma_lambda(mut self, lambda: f64) -> Self {
        self.ewma_lambda = lambda;
        self
    }

    /// Sets the implied volatility solver tolerance.
    #[must_use]
    pub fn with_implied_vol_tolerance(mut self, tolerance: f64) -> Self {
        self.implied_vol_tolerance = tolerance;
        self
    }

    /// Resolves an option's Black-Scholes inputs.
    pub fn option_inputs(&self, spec: &OptionSpec) -> VerticeResult<OptionInputs> {
        OptionInputs::resolve(
            spec,
            self.market,
            self.reference_date,
            self.ewma_lambda,
            self.implied_vol_tolerance,
        )
    }

    /// Exposures of the whole portfolio, summed by factor.
    pub fn portfolio_exposure(&self, portfolio: &Portfolio) -> VerticeResult<ExposureVector> {
        let mut total = ExposureVector::new();
        for position in portfolio.positions() {
            total.merge(self.position_exposure(position)?);
        }
        info!(
            positions = portfolio.len(),
            factors = total.len(),
            "portfolio exposure computed"
        );
        Ok(total)
    }

    /// Exposures of a single position.
    pub fn position_exposure(&self, position: &Position) -> VerticeResult<ExposureVector> {
        let q = position.quantity();
        let factors = position.risk_factors(self.market, self.reference_date)?;
        let mut exposures = ExposureVector::new();

        match position.instrument() {
            Instrument::Equity { ticker, locale } => {
                let value = q * self.equity_value(ticker, *locale)?;
                for factor in factors {
                    // US equities inherit the equity leg's BRL value on USDBRL
                    exposures.add(factor, value);
                }
            }
            Instrument::Option(spec) => {
                let inputs = self.option_inputs(spec)?;
                let fx = self.market.fx_to_brl(spec.underlying_locale, self.reference_date)?;
                let mut factors = factors.into_iter();
                if let Some(equity) = factors.next() {
                    let value = q * inputs.model.spot * fx * inputs.delta() * spec.notional;
                    exposures.add(equity, value);
                }
                if let Some(volatility) = factors.next() {
                    exposures.add(volatility, q * spec.notional * inputs.vega());
                }
            }
            Instrument::Future(spec) => {
                let value = self.future_value(spec, q)?;
                for factor in factors {
                    exposures.add(factor, value);
                }
            }
            Instrument::Bond(spec) => {
                let (rate_value, market_value) = self.bond_values(spec, q)?;
                let mut factors = factors.into_iter();
                if let Some(rate) = factors.next() {
                    exposures.add(rate, rate_value);
                }
                if let Some(usdbrl) = factors.next() {
                    exposures.add(usdbrl, market_value);
                }
            }
        }

        debug!(
            instrument = %position.instrument(),
            quantity = q,
            factors = ?exposures.names(),
            "position exposure computed"
        );
        Ok(exposures)
    }

    fn equity_value(&self, ticker: &str, locale: Locale) -> VerticeResult<f64> {
        let price = self.market.equity_price(ticker, locale, self.reference_date)?;
        let fx = self.market.fx_to_brl(locale, self.reference_date)?;
        Ok(price * fx)
    }

    /// BRL exposure of a future's primary leg.
    fn future_value(&self, spec: &FutureSpec, q: f64) -> VerticeResult<f64> {
        let base = q * spec.contract_size;
        match spec.kind {
            FutureKind::Ibov | FutureKind::Di => Ok(base),
            FutureKind::UsdBrl => Ok(base * self.market.usdbrl(self.reference_date)?),
            kind => {
                let pair = kind.fx_pair().ok_or_else(|| {
                    VerticeError::configuration(format!("future '{}' has no FX pair", spec.id))
                })?;
                let cross = self.market.fx_rate(pair, self.reference_date)?;
                let usdbrl = self.market.usdbrl(self.reference_date)?;
                Ok(q * (spec.contract_size / cross) * usdbrl)
            }
        }
    }

    /// `(rate exposure, BRL market value)` of a bond position.
    fn bond_values(&self, spec: &BondSpec, q: f64) -> VerticeResult<(f64, f64)> {
        let valuer = BondValuer::new(spec, self.reference_date, self.market)?;
        let pu = valuer.present_value()?;
        let duration = valuer.modified_duration()?;
        let fx = self.market.fx_to_brl(spec.locale(), self.reference_date)?;
        Ok((q * pu * duration * fx, q * pu * fx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_sums_duplicates_in_first_order() {
        let mut v = ExposureVector::new();
        v.add(RiskFactor::equity("AAPL", Locale::Us), 100.0);
        v.add(RiskFactor::usdbrl(), 100.0);
        v.add(RiskFactor::equity("PETR4", Locale::Br), 50.0);
        v.add(RiskFactor::usdbrl(), -30.0);

        assert_eq!(v.names(), vec!["AAPL", "USDBRL", "PETR4"]);
        assert_relative_eq!(v.get("USDBRL").unwrap(), 70.0);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_aligned_to() {
        let mut v = ExposureVector::new();
        v.add(RiskFactor::equity("PETR4", Locale::Br), 1.0);
        v.add(RiskFactor::usdbrl(), 2.0);

        let names = vec!["USDBRL".to_string(), "VALE3".to_string(), "PETR4".to_string()];
        assert_eq!(v.aligned_to(&names).unwrap(), vec![2.0, 0.0, 1.0]);

        let short = vec!["PETR4".to_string()];
        assert!(matches!(
            v.aligned_to(&short),
            Err(VerticeError::Configuration { .. })
        ));
    }
}
