//! Positions and their risk-factor mapping.

use vertice_analytics::fixed_income::{BondValuer, DiFutureValuer, PeriodMetric};
use vertice_core::market::{MarketData, ReferenceData};
use vertice_core::types::{Date, FutureKind, Locale, RiskFactorKind};
use vertice_core::{VerticeError, VerticeResult};

use crate::factor::RiskFactor;
use crate::instrument::{Instrument, InstrumentId, IBOV_TICKER};

/// A signed holding of one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    instrument: Instrument,
    quantity: f64,
}

impl Position {
    /// Creates a position in an already resolved instrument.
    ///
    /// # Errors
    ///
    /// `DomainRange` if the quantity is not finite.
    pub fn new(instrument: Instrument, quantity: f64) -> VerticeResult<Self> {
        if !quantity.is_finite() {
            return Err(VerticeError::domain_range(
                "quantity",
                quantity,
                format!("position in {instrument} needs a finite quantity"),
            ));
        }
        Ok(Self {
            instrument,
            quantity,
        })
    }

    /// Resolves `id` against the reference tables and opens a position.
    pub fn resolve(
        id: &InstrumentId,
        quantity: f64,
        reference: Option<&ReferenceData>,
    ) -> VerticeResult<Self> {
        Self::new(Instrument::resolve(id, reference)?, quantity)
    }

    /// The instrument held.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Signed quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Booking market.
    pub fn locale(&self) -> Locale {
        self.instrument.locale()
    }

    /// Factor classes the position is exposed to, primary leg first.
    pub fn factor_kinds(&self) -> Vec<RiskFactorKind> {
        use RiskFactorKind::{Equity, FxCross, FxUsdBrl, Rate, Volatility};

        match &self.instrument {
            Instrument::Equity { locale, .. } => match locale {
                Locale::Br => vec![Equity],
                Locale::Us => vec![Equity, FxUsdBrl],
            },
            Instrument::Option(_) => vec![Equity, Volatility],
            Instrument::Bond(spec) => match spec.locale() {
                Locale::Br => vec![Rate],
                Locale::Us => vec![Rate, FxUsdBrl],
            },
            Instrument::Future(spec) => match spec.kind {
                FutureKind::Ibov => vec![Equity],
                FutureKind::Di => vec![Rate],
                FutureKind::UsdBrl => vec![FxUsdBrl],
                FutureKind::EurUsd | FutureKind::UsdCad | FutureKind::UsdJpy | FutureKind::UsdMxn => {
                    vec![FxCross, FxUsdBrl]
                }
            },
        }
    }

    /// Concrete risk factors as of `reference_date`, one per entry of
    /// [`factor_kinds`](Self::factor_kinds) and in the same order.
    ///
    /// Rate factors depend on the remaining life of the instrument, so
    /// bonds and DI futures are resolved against the market snapshot.
    pub fn risk_factors(
        &self,
        market: &MarketData,
        reference_date: Date,
    ) -> VerticeResult<Vec<RiskFactor>> {
        self.factor_kinds()
            .into_iter()
            .map(|kind| self.resolve_factor(kind, market, reference_date))
            .collect()
    }

    fn resolve_factor(
        &self,
        kind: RiskFactorKind,
        market: &MarketData,
        reference_date: Date,
    ) -> VerticeResult<RiskFactor> {
        let unmapped = || {
            VerticeError::configuration(format!("{} has no {kind} factor", self.instrument))
        };

        let factor = match (kind, &self.instrument) {
            (RiskFactorKind::FxUsdBrl, _) => RiskFactor::usdbrl(),
            (RiskFactorKind::Equity, Instrument::Equity { ticker, locale }) => {
                RiskFactor::equity(ticker, *locale)
            }
            (RiskFactorKind::Equity, Instrument::Option(spec)) => {
                RiskFactor::equity(&spec.underlying, spec.underlying_locale)
            }
            (RiskFactorKind::Equity, Instrument::Future(_)) => {
                RiskFactor::equity(IBOV_TICKER, Locale::Br)
            }
            (RiskFactorKind::Volatility, Instrument::Option(spec)) => {
                RiskFactor::volatility(&spec.underlying, spec.underlying_locale)
            }
            (RiskFactorKind::Rate, Instrument::Bond(spec)) => {
                let valuer = BondValuer::new(spec, reference_date, market)?;
                match valuer.period_metric() {
                    PeriodMetric::BusinessDays(bd) => RiskFactor::domestic_rate(*bd),
                    PeriodMetric::TreasuryVertex(tenor) => {
                        RiskFactor::treasury_rate(tenor.clone())
                    }
                }
            }
            (RiskFactorKind::Rate, Instrument::Future(spec)) => {
                let valuer = DiFutureValuer::new(spec, reference_date, market)?;
                RiskFactor::domestic_rate(valuer.business_days())
            }
            (RiskFactorKind::FxCross, Instrument::Future(spec)) => {
                RiskFactor::fx_cross(spec.kind.fx_pair().ok_or_else(unmapped)?)
            }
            _ => return Err(unmapped()),
        };
        Ok(factor)
    }
}
