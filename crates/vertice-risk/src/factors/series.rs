//! Variation series of a single risk factor.

use tracing::debug;

use vertice_core::market::MarketData;
use vertice_core::types::{Date, Locale};
use vertice_core::{VerticeError, VerticeResult};
use vertice_curves::{DomesticCurve, RateCurve, TreasuryCurve};
use vertice_math::statistics::{differences, ewma_variance, simple_returns};
use vertice_portfolio::{FactorSource, RiskFactor};

/// Settings shared by every factor series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSettings {
    /// EWMA decay of the volatility factors.
    pub ewma_lambda: f64,
    /// Annualization basis of domestic volatility factors.
    pub trading_days_per_year: u32,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            ewma_lambda: 0.94,
            trading_days_per_year: 252,
        }
    }
}

/// Dated day-over-day variations of `factor`, using observations on or
/// before `as_of` only.
///
/// | factor      | variation                                           |
/// |-------------|-----------------------------------------------------|
/// | equity, FX  | `p[t] / p[t-1] - 1`                                 |
/// | rate        | `(r[t] - r[t-1]) / 100`                             |
/// | volatility  | difference of `√(EWMA variance)`, `×√252` for BR    |
///
/// Each variation is dated at the later of its two observations.
pub fn factor_variations(
    factor: &RiskFactor,
    market: &MarketData,
    as_of: Date,
    settings: SeriesSettings,
) -> VerticeResult<Vec<(Date, f64)>> {
    let series = match &factor.source {
        FactorSource::EquityPrice { ticker, locale } => {
            returns(&market.equities(*locale).history_until(ticker, as_of)?)
        }
        FactorSource::FxRate { pair } => returns(&market.fx().history_until(pair, as_of)?),
        FactorSource::EquityVolatility { ticker, locale } => {
            let prices = market.equities(*locale).history_until(ticker, as_of)?;
            volatility_changes(&prices, *locale, settings)?
        }
        FactorSource::DomesticRate { business_days } => {
            rate_changes(&DomesticCurve::new(market.di_curve(), *business_days).history(as_of)?)
        }
        FactorSource::TreasuryRate { tenor } => rate_changes(
            &TreasuryCurve::new(market.treasury_curve(), tenor.clone()).history(as_of)?,
        ),
    };

    if series.is_empty() {
        return Err(VerticeError::missing_market_data(
            factor.name(),
            format!("fewer than two observations on or before {as_of}"),
        ));
    }
    debug!(factor = %factor, observations = series.len(), "factor series built");
    Ok(series)
}

fn returns(history: &[(Date, f64)]) -> Vec<(Date, f64)> {
    let values: Vec<f64> = history.iter().map(|(_, v)| *v).collect();
    dated(history.get(1..).unwrap_or(&[]), simple_returns(&values))
}

fn rate_changes(history: &[(Date, f64)]) -> Vec<(Date, f64)> {
    let values: Vec<f64> = history.iter().map(|(_, v)| *v).collect();
    let changes = differences(&values).into_iter().map(|d| d / 100.0).collect();
    dated(history.get(1..).unwrap_or(&[]), changes)
}

/// EWMA volatility of the price returns, then its day-over-day change.
fn volatility_changes(
    prices: &[(Date, f64)],
    locale: Locale,
    settings: SeriesSettings,
) -> VerticeResult<Vec<(Date, f64)>> {
    let returns = returns(prices);
    if returns.len() < 2 {
        return Ok(Vec::new());
    }
    let values: Vec<f64> = returns.iter().map(|(_, r)| *r).collect();
    let scale = match locale {
        Locale::Br => f64::from(settings.trading_days_per_year).sqrt(),
        Locale::Us => 1.0,
    };
    let vols: Vec<f64> = ewma_variance(&values, settings.ewma_lambda)?
        .into_iter()
        .map(|v| v.sqrt() * scale)
        .collect();
    Ok(dated(&returns[1..], differences(&vols)))
}

fn dated(dates: &[(Date, f64)], values: Vec<f64>) -> Vec<(Date, f64)> {
    dates.iter().map(|(d, _)| *d).zip(values).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 5, day).unwrap()
    }

    fn market() -> MarketData {
        MarketData::builder()
            .br_equity_series("PETR4", [(d(20), 30.0), (d(21), 30.6), (d(22), 30.3), (d(23), 31.2)])
            .fx_series("USDBRL", [(d(20), 5.60), (d(21), 5.66), (d(27), 5.70)])
            .di_rate(d(21), 252, 14.40)
            .di_rate(d(22), 252, 14.55)
            .build()
            .unwrap()
    }

    #[test]
    fn test_price_returns_dated_at_later_observation() {
        let market = market();
        let series = factor_variations(
            &RiskFactor::equity("PETR4", Locale::Br),
            &market,
            d(26),
            SeriesSettings::default(),
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].0, d(21));
        assert_relative_eq!(series[0].1, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_date_gates_history() {
        let market = market();
        let series =
            factor_variations(&RiskFactor::usdbrl(), &market, d(26), SeriesSettings::default())
                .unwrap();
        assert_eq!(series.len(), 1);

        let none = factor_variations(&RiskFactor::usdbrl(), &market, d(20), SeriesSettings::default());
        assert!(matches!(none, Err(VerticeError::MissingMarketData { .. })));
    }

    #[test]
    fn test_rate_changes_in_decimal() {
        let market = market();
        let series = factor_variations(
            &RiskFactor::domestic_rate(252),
            &market,
            d(26),
            SeriesSettings::default(),
        )
        .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, d(22));
        assert_relative_eq!(series[0].1, 0.0015, epsilon = 1e-12);
    }

    #[test]
    fn test_volatility_factor() {
        let market = market();
        let settings = SeriesSettings::default();
        let series = factor_variations(
            &RiskFactor::volatility("PETR4", Locale::Br),
            &market,
            d(26),
            settings,
        )
        .unwrap();

        let r = [30.6 / 30.0 - 1.0, 30.3 / 30.6 - 1.0, 31.2 / 30.3 - 1.0];
        let path = ewma_variance(&r, 0.94).unwrap();
        let annual = 252.0_f64.sqrt();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, d(22));
        assert_relative_eq!(
            series[1].1,
            (path[2].sqrt() - path[1].sqrt()) * annual,
            epsilon = 1e-12
        );
    }
}
