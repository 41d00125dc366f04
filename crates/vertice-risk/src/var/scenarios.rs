//! Historical P&L scenarios.
//!
//! Each position is repriced under every dated row of factor variations:
//!
//! ```text
//! equity   V · ((1 + r_eq)(1 + r_fx) - 1)
//! option   q · notional · fx · (BS(S(1 + r), σ + 100Δσ, t - 1/252) - P)
//! index    q · size · r            USD/BRL   q · size · USDBRL · r
//! cross    V · ((1 + r_usdbrl) / (1 + r_cross) - 1)
//! DI       q · (F(r + 100Δ) - F(r))
//! bond     q · PU · fx · ((PU' / PU)(1 + r_fx) - 1),  PU' at y + 100Δ
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use vertice_analytics::fixed_income::{BondValuer, DiFutureValuer};
use vertice_analytics::options::is_unpriceable;
use vertice_core::market::MarketData;
use vertice_core::types::{Date, FutureKind, Locale};
use vertice_core::{VerticeError, VerticeResult};
use vertice_portfolio::{ExposureEngine, Instrument, OptionInputs, Portfolio, Position};

use crate::factors::RiskFactorReturns;

/// P&L of one position on one historical date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// Date of the factor shock.
    pub date: Date,
    /// Position index in the portfolio.
    pub position: usize,
    /// Profit (positive) or loss (negative) in BRL.
    pub pnl: f64,
}

/// Scenarios of a portfolio over a window of dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioSet {
    dates: Vec<Date>,
    scenarios: Vec<Scenario>,
    flagged: Vec<(Date, usize)>,
}

impl ScenarioSet {
    /// Dates of the window, oldest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Priced scenarios.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// `(date, position)` pairs that could not be priced and are left out
    /// of the date totals.
    pub fn flagged(&self) -> &[(Date, usize)] {
        &self.flagged
    }

    /// Portfolio P&L per date, oldest first.
    pub fn portfolio_pnl(&self) -> Vec<(Date, f64)> {
        self.dates
            .iter()
            .map(|date| {
                let total = self
                    .scenarios
                    .iter()
                    .filter(|s| s.date == *date)
                    .map(|s| s.pnl)
                    .sum();
                (*date, total)
            })
            .collect()
    }

    /// Portfolio P&L values, oldest first.
    pub fn pnl(&self) -> Vec<f64> {
        self.portfolio_pnl().into_iter().map(|(_, v)| v).collect()
    }

    /// P&L of one position, oldest first.
    pub fn position_pnl(&self, position: usize) -> Vec<(Date, f64)> {
        self.scenarios
            .iter()
            .filter(|s| s.position == position)
            .map(|s| (s.date, s.pnl))
            .collect()
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true for an empty window.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Column of a factor in the return matrix, with today's level where the
/// repricing needs it.
type Column = usize;

/// Today's state of a position, ready to be shocked.
enum Repricer<'a> {
    Linear {
        value: f64,
        primary: Column,
        fx: Option<Column>,
    },
    Option {
        inputs: OptionInputs,
        units: f64,
        fx: f64,
        spot: Column,
        volatility: Column,
    },
    Scaled {
        value: f64,
        factor: Column,
    },
    Cross {
        value: f64,
        cross: Column,
        usdbrl: Column,
    },
    Di {
        valuer: DiFutureValuer<'a>,
        quantity: f64,
        rate: f64,
        price: f64,
        factor: Column,
    },
    Bond {
        valuer: BondValuer<'a>,
        value: f64,
        price: f64,
        factor: Column,
        fx: Option<Column>,
    },
}

/// Why a scenario has no P&L.
enum Outcome {
    Priced(f64),
    Unpriceable,
}

impl Repricer<'_> {
    fn shock(&self, row: &[f64]) -> VerticeResult<Outcome> {
        let pnl = match self {
            Self::Linear { value, primary, fx } => {
                let r_fx = fx.map_or(0.0, |c| row[c]);
                value * ((1.0 + row[*primary]) * (1.0 + r_fx) - 1.0)
            }
            Self::Option {
                inputs,
                units,
                fx,
                spot,
                volatility,
            } => {
                let shocked_spot = inputs.model.spot * (1.0 + row[*spot]);
                let shocked_vol = inputs.volatility + 100.0 * row[*volatility];
                if !(shocked_vol > 0.0) || is_unpriceable(shocked_vol) {
                    return Ok(Outcome::Unpriceable);
                }
                let price = inputs.reprice(shocked_spot, shocked_vol);
                if !price.is_finite() {
                    return Ok(Outcome::Unpriceable);
                }
                units * fx * (price - inputs.price())
            }
            Self::Scaled { value, factor } => value * row[*factor],
            Self::Cross {
                value,
                cross,
                usdbrl,
            } => value * ((1.0 + row[*usdbrl]) / (1.0 + row[*cross]) - 1.0),
            Self::Di {
                valuer,
                quantity,
                rate,
                price,
                factor,
            } => quantity * (valuer.price_at(rate + 100.0 * row[*factor])? - price),
            Self::Bond {
                valuer,
                value,
                price,
                factor,
                fx,
            } => {
                let shocked = valuer.present_value_at(valuer.spec().rate + 100.0 * row[*factor])?;
                let r_fx = fx.map_or(0.0, |c| row[c]);
                value * (shocked / price * (1.0 + r_fx) - 1.0)
            }
        };
        Ok(Outcome::Priced(pnl))
    }
}

/// Reprices portfolio positions under historical factor variations.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator<'a> {
    market: &'a MarketData,
    engine: ExposureEngine<'a>,
    reference_date: Date,
}

impl<'a> ScenarioGenerator<'a> {
    /// Creates a generator reading today's state through `engine`.
    pub fn new(market: &'a MarketData, engine: ExposureEngine<'a>, reference_date: Date) -> Self {
        Self {
            market,
            engine,
            reference_date,
        }
    }

    /// P&L of every position on every row of `returns`.
    ///
    /// # Errors
    ///
    /// `Configuration` if a position factor is missing from `returns`;
    /// market-data and domain errors of the valuers are propagated.
    pub fn generate(
        &self,
        portfolio: &'a Portfolio,
        returns: &RiskFactorReturns,
    ) -> VerticeResult<ScenarioSet> {
        let repricers = portfolio
            .positions()
            .iter()
            .map(|p| self.repricer(p, returns))
            .collect::<VerticeResult<Vec<_>>>()?;

        let mut set = ScenarioSet {
            dates: returns.dates().to_vec(),
            ..ScenarioSet::default()
        };
        for (i, date) in returns.dates().iter().enumerate() {
            let row: Vec<f64> = returns.matrix().row(i).iter().copied().collect();
            for (position, repricer) in repricers.iter().enumerate() {
                match repricer.shock(&row)? {
                    Outcome::Priced(pnl) => set.scenarios.push(Scenario {
                        date: *date,
                        position,
                        pnl,
                    }),
                    Outcome::Unpriceable => {
                        warn!(%date, position, "unpriceable option scenario excluded");
                        set.flagged.push((*date, position));
                    }
                }
            }
        }

        debug!(
            dates = set.len(),
            scenarios = set.scenarios.len(),
            flagged = set.flagged.len(),
            "historical scenarios generated"
        );
        Ok(set)
    }

    fn repricer(
        &self,
        position: &'a Position,
        returns: &RiskFactorReturns,
    ) -> VerticeResult<Repricer<'a>> {
        let factors = position.risk_factors(self.market, self.reference_date)?;
        let column = |k: usize| -> VerticeResult<Column> {
            let name = factors.get(k).map(ToString::to_string).ok_or_else(|| {
                VerticeError::configuration(format!(
                    "{} has no factor leg {k}",
                    position.instrument()
                ))
            })?;
            returns.index_of(&name).ok_or_else(|| {
                VerticeError::configuration(format!("factor '{name}' has no return series"))
            })
        };
        let q = position.quantity();
        let date = self.reference_date;

        let repricer = match position.instrument() {
            Instrument::Equity { ticker, locale } => {
                let price = self.market.equity_price(ticker, *locale, date)?;
                let fx = self.market.fx_to_brl(*locale, date)?;
                Repricer::Linear {
                    value: q * price * fx,
                    primary: column(0)?,
                    fx: match locale {
                        Locale::Br => None,
                        Locale::Us => Some(column(1)?),
                    },
                }
            }
            // no USDBRL leg: US premiums convert at today's rate
            Instrument::Option(spec) => Repricer::Option {
                inputs: self.engine.option_inputs(spec)?,
                units: q * spec.notional,
                fx: self.market.fx_to_brl(spec.underlying_locale, date)?,
                spot: column(0)?,
                volatility: column(1)?,
            },
            Instrument::Future(spec) => match spec.kind {
                FutureKind::Ibov => Repricer::Scaled {
                    value: q * spec.contract_size,
                    factor: column(0)?,
                },
                FutureKind::UsdBrl => Repricer::Scaled {
                    value: q * spec.contract_size * self.market.usdbrl(date)?,
                    factor: column(0)?,
                },
                FutureKind::Di => {
                    let valuer = DiFutureValuer::new(spec, date, self.market)?;
                    let rate = valuer.rate()?;
                    Repricer::Di {
                        price: valuer.price_at(rate)?,
                        valuer,
                        quantity: q,
                        rate,
                        factor: column(0)?,
                    }
                }
                FutureKind::EurUsd | FutureKind::UsdCad | FutureKind::UsdJpy | FutureKind::UsdMxn => {
                    let exposure = self.engine.position_exposure(position)?;
                    Repricer::Cross {
                        value: exposure.values().first().copied().unwrap_or(0.0),
                        cross: column(0)?,
                        usdbrl: column(1)?,
                    }
                }
            },
            Instrument::Bond(spec) => {
                let valuer = BondValuer::new(spec, date, self.market)?;
                let price = valuer.present_value()?;
                let fx = self.market.fx_to_brl(spec.locale(), date)?;
                Repricer::Bond {
                    value: q * price * fx,
                    price,
                    factor: column(0)?,
                    fx: match spec.locale() {
                        Locale::Br => None,
                        Locale::Us => Some(column(1)?),
                    },
                    valuer,
                }
            }
        };
        Ok(repricer)
    }
}
