//! Risk-factor return matrices.
//!
//! Every factor of a portfolio is turned into a dated variation series
//! (see [`factor_variations`]) and the series are inner-joined on date into
//! a date × factor matrix.

mod series;

pub use series::{factor_variations, SeriesSettings};

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use tracing::{debug, info};

use vertice_core::market::MarketData;
use vertice_core::types::Date;
use vertice_core::{VerticeError, VerticeResult};
use vertice_portfolio::{Portfolio, RiskFactor};

/// Aligned factor variations: one row per date (chronological), one column
/// per factor.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactorReturns {
    factors: Vec<RiskFactor>,
    names: Vec<String>,
    dates: Vec<Date>,
    data: DMatrix<f64>,
}

impl RiskFactorReturns {
    /// Inner-joins dated series on date.
    ///
    /// Factors keep the order of `series`; a factor appearing twice is
    /// kept once.
    ///
    /// # Errors
    ///
    /// `MissingMarketData` if no date is shared by every series.
    pub fn from_series(series: Vec<(RiskFactor, Vec<(Date, f64)>)>) -> VerticeResult<Self> {
        let mut factors: Vec<RiskFactor> = Vec::with_capacity(series.len());
        let mut columns: Vec<BTreeMap<Date, f64>> = Vec::with_capacity(series.len());
        for (factor, points) in series {
            if factors.iter().any(|f| f.name() == factor.name()) {
                continue;
            }
            factors.push(factor);
            columns.push(points.into_iter().collect());
        }
        if factors.is_empty() {
            return Err(VerticeError::configuration("no risk factors to align"));
        }

        let dates: Vec<Date> = columns[0]
            .keys()
            .filter(|d| columns[1..].iter().all(|c| c.contains_key(d)))
            .copied()
            .collect();
        let names: Vec<String> = factors.iter().map(RiskFactor::name).collect();
        if dates.is_empty() {
            return Err(VerticeError::missing_market_data(
                names.join(", "),
                "factor series share no common date",
            ));
        }

        let data = DMatrix::from_fn(dates.len(), factors.len(), |i, j| {
            columns[j].get(&dates[i]).copied().unwrap_or(f64::NAN)
        });
        Ok(Self {
            factors,
            names,
            dates,
            data,
        })
    }

    /// Builds the aligned returns of `factors` from the market snapshot.
    pub fn build(
        factors: &[RiskFactor],
        market: &MarketData,
        as_of: Date,
        settings: SeriesSettings,
    ) -> VerticeResult<Self> {
        let series = factors
            .iter()
            .map(|f| Ok((f.clone(), factor_variations(f, market, as_of, settings)?)))
            .collect::<VerticeResult<Vec<_>>>()?;
        let returns = Self::from_series(series)?;
        info!(
            factors = returns.factor_count(),
            dates = returns.len(),
            "factor returns aligned"
        );
        Ok(returns)
    }

    /// Aligned returns of every factor the portfolio is exposed to, in
    /// order of first appearance.
    pub fn for_portfolio(
        portfolio: &Portfolio,
        market: &MarketData,
        settings: SeriesSettings,
    ) -> VerticeResult<Self> {
        let factors = portfolio_factors(portfolio, market)?;
        debug!(portfolio = portfolio.name(), factors = factors.len(), "portfolio factors");
        Self::build(&factors, market, portfolio.reference_date(), settings)
    }

    /// Factors in column order.
    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    /// Factor names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row dates, oldest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The date × factor matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of factors.
    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// Column of the factor called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Variations of one factor, oldest first.
    pub fn column(&self, name: &str) -> VerticeResult<Vec<f64>> {
        let j = self.index_of(name).ok_or_else(|| {
            VerticeError::configuration(format!("factor '{name}' is not in the return matrix"))
        })?;
        Ok(self.data.column(j).iter().copied().collect())
    }

    /// Keeps the `n` most recent rows.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let n = n.min(self.len());
        let start = self.len() - n;
        Self {
            factors: self.factors.clone(),
            names: self.names.clone(),
            dates: self.dates[start..].to_vec(),
            data: self.data.rows(start, n).into_owned(),
        }
    }
}

/// Distinct risk factors of a portfolio, in order of first appearance.
pub fn portfolio_factors(portfolio: &Portfolio, market: &MarketData) -> VerticeResult<Vec<RiskFactor>> {
    let mut factors: Vec<RiskFactor> = Vec::new();
    for position in portfolio.positions() {
        for factor in position.risk_factors(market, portfolio.reference_date())? {
            if !factors.iter().any(|f| f.name() == factor.name()) {
                factors.push(factor);
            }
        }
    }
    Ok(factors)
}
