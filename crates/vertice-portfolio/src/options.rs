//! Black-Scholes inputs of an option position.

use tracing::{debug, warn};

use vertice_analytics::fixed_income::BUSINESS_DAYS_PER_YEAR;
use vertice_analytics::options::{is_unpriceable, BlackScholes};
use vertice_core::calendars::business_days;
use vertice_core::market::{MarketData, OptionSpec};
use vertice_core::types::{Date, Locale};
use vertice_core::{VerticeError, VerticeResult};
use vertice_math::statistics::{ewma_volatility, simple_returns};

/// Where an option's volatility input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatilitySource {
    /// Backed out of the observed premium.
    Implied,
    /// Annualized EWMA volatility of the underlying.
    Ewma,
}

/// A priced option: model, volatility and contract terms.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionInputs {
    /// Model at the reference date.
    pub model: BlackScholes,
    /// Volatility in percent.
    pub volatility: f64,
    /// Origin of [`volatility`](Self::volatility).
    pub source: VolatilitySource,
    /// Option terms.
    pub spec: OptionSpec,
}

impl OptionInputs {
    /// Builds the model from the latest underlying price and resolves the
    /// volatility: implied from the premium when one is quoted and
    /// solvable, else the EWMA volatility of the underlying.
    ///
    /// # Errors
    ///
    /// `DomainRange` for an expired option; `MissingMarketData` if the
    /// underlying has no price; `InsufficientData` if the EWMA fallback
    /// has fewer than two returns.
    pub fn resolve(
        spec: &OptionSpec,
        market: &MarketData,
        reference_date: Date,
        ewma_lambda: f64,
        tolerance: f64,
    ) -> VerticeResult<Self> {
        if spec.expiry < reference_date {
            return Err(VerticeError::domain_range(
                "expiry",
                reference_date.days_between(&spec.expiry) as f64,
                format!("option '{}' expired on {}", spec.id, spec.expiry),
            ));
        }
        let bd = business_days(reference_date, spec.expiry, market.calendar()).max(0);
        let spot = market.equity_price(&spec.underlying, spec.underlying_locale, reference_date)?;
        let model = BlackScholes::new(
            spot,
            spec.strike,
            bd as f64 / BUSINESS_DAYS_PER_YEAR,
            spec.rate,
            spec.dividend_yield,
        )?;

        if let Some(premium) = spec.premium {
            let implied = model.implied_vol(premium, spec.kind, tolerance);
            if !is_unpriceable(implied) {
                debug!(option = %spec.id, vol = implied, "implied volatility from premium");
                return Ok(Self {
                    model,
                    volatility: implied,
                    source: VolatilitySource::Implied,
                    spec: spec.clone(),
                });
            }
            warn!(
                option = %spec.id,
                premium,
                "premium has no implied volatility, falling back to EWMA"
            );
        }

        let volatility = underlying_volatility(
            market,
            &spec.underlying,
            spec.underlying_locale,
            reference_date,
            ewma_lambda,
        )?;
        Ok(Self {
            model,
            volatility,
            source: VolatilitySource::Ewma,
            spec: spec.clone(),
        })
    }

    /// Premium per unit.
    pub fn price(&self) -> f64 {
        self.model.price(self.volatility, self.spec.kind)
    }

    /// Delta per unit.
    pub fn delta(&self) -> f64 {
        self.model.delta(self.volatility, self.spec.kind)
    }

    /// Vega per unit (decimal volatility).
    pub fn vega(&self) -> f64 {
        self.model.vega(self.volatility)
    }

    /// Premium after a spot and volatility move, one trading day later.
    pub fn reprice(&self, spot: f64, volatility: f64) -> f64 {
        self.model
            .with_spot(spot)
            .with_time_to_expiry(self.model.time_to_expiry - 1.0 / BUSINESS_DAYS_PER_YEAR)
            .price(volatility, self.spec.kind)
    }
}

/// Latest EWMA volatility of an equity, annualized with `√252` and
/// expressed in percent.
pub fn underlying_volatility(
    market: &MarketData,
    ticker: &str,
    locale: Locale,
    reference_date: Date,
    lambda: f64,
) -> VerticeResult<f64> {
    let prices: Vec<f64> = market
        .equities(locale)
        .history_until(ticker, reference_date)?
        .into_iter()
        .map(|(_, price)| price)
        .collect();
    let daily = ewma_volatility(&simple_returns(&prices), lambda)?;
    Ok(daily * BUSINESS_DAYS_PER_YEAR.sqrt() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vertice_core::types::OptionKind;

    fn today() -> Date {
        Date::from_ymd(2025, 5, 26).unwrap()
    }

    fn market() -> MarketData {
        let prices = [30.0, 30.6, 30.3, 31.0, 30.7, 31.2, 31.5, 31.1];
        let start = Date::from_ymd(2025, 5, 14).unwrap();
        let series: Vec<(Date, f64)> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| (start.add_days(i as i64), *p))
            .collect();
        MarketData::builder()
            .br_equity_series("PETR4", series)
            .build()
            .unwrap()
    }

    fn spec(premium: Option<f64>) -> OptionSpec {
        OptionSpec {
            id: "Opção 1".into(),
            underlying: "PETR4".into(),
            underlying_locale: Locale::Br,
            strike: 30.0,
            expiry: Date::from_ymd(2025, 8, 25).unwrap(),
            kind: OptionKind::Call,
            notional: 100.0,
            rate: 14.5,
            dividend_yield: 0.0,
            premium,
        }
    }

    #[test]
    fn test_implied_volatility_from_premium() {
        let market = market();
        let at_32 = OptionInputs::resolve(&spec(None), &market, today(), 0.94, 1e-9).unwrap();
        let premium = at_32.model.price(32.0, OptionKind::Call);

        let inputs =
            OptionInputs::resolve(&spec(Some(premium)), &market, today(), 0.94, 1e-9).unwrap();
        assert_eq!(inputs.source, VolatilitySource::Implied);
        assert_relative_eq!(inputs.volatility, 32.0, epsilon = 1e-6);
        assert_relative_eq!(inputs.model.spot, 31.1);
    }

    #[test]
    fn test_unsolvable_premium_falls_back_to_ewma() {
        let market = market();
        let inputs =
            OptionInputs::resolve(&spec(Some(1_000.0)), &market, today(), 0.94, 1e-9).unwrap();
        assert_eq!(inputs.source, VolatilitySource::Ewma);
        let expected =
            underlying_volatility(&market, "PETR4", Locale::Br, today(), 0.94).unwrap();
        assert_relative_eq!(inputs.volatility, expected);
    }

    #[test]
    fn test_reprice_rolls_one_day() {
        let market = market();
        let inputs = OptionInputs::resolve(&spec(None), &market, today(), 0.94, 1e-9).unwrap();
        let same = inputs.reprice(inputs.model.spot, inputs.volatility);
        // theta only
        assert!((same - inputs.price()).abs() < 0.05);
        assert!(inputs.reprice(33.0, inputs.volatility) > same);
    }

    #[test]
    fn test_expired_option() {
        let market = market();
        let mut expired = spec(None);
        expired.expiry = Date::from_ymd(2025, 5, 1).unwrap();
        assert!(OptionInputs::resolve(&expired, &market, today(), 0.94, 1e-9).is_err());
    }
}
