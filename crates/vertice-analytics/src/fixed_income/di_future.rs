//! DI futures, priced off the domestic curve.

use vertice_core::calendars::business_days;
use vertice_core::market::{FutureSpec, MarketData};
use vertice_core::types::{Date, FutureKind};
use vertice_core::{VerticeError, VerticeResult};
use vertice_curves::{DomesticCurve, RateCurve};

use super::bond::BUSINESS_DAYS_PER_YEAR;

/// Price of a DI contract: `size / (1 + rate/100)^(bd/252)`.
///
/// ```rust
/// use vertice_analytics::fixed_income::di_future_price;
///
/// let pu = di_future_price(100_000.0, 10.0, 252).unwrap();
/// assert!((pu - 100_000.0 / 1.1).abs() < 1e-6);
/// ```
pub fn di_future_price(contract_size: f64, rate: f64, business_days: u32) -> VerticeResult<f64> {
    let growth = 1.0 + rate / 100.0;
    if growth <= 0.0 {
        return Err(VerticeError::domain_range(
            "rate",
            rate,
            "DI rate must be above -100%",
        ));
    }
    Ok(contract_size / growth.powf(f64::from(business_days) / BUSINESS_DAYS_PER_YEAR))
}

/// A DI future position's contract terms resolved against a reference date.
#[derive(Debug, Clone)]
pub struct DiFutureValuer<'a> {
    spec: &'a FutureSpec,
    reference_date: Date,
    market: &'a MarketData,
    business_days: u32,
}

impl<'a> DiFutureValuer<'a> {
    /// Resolves business days to maturity.
    ///
    /// # Errors
    ///
    /// `Configuration` for a non-DI future or one without maturity;
    /// `DomainRange` when the contract has expired.
    pub fn new(
        spec: &'a FutureSpec,
        reference_date: Date,
        market: &'a MarketData,
    ) -> VerticeResult<Self> {
        if spec.kind != FutureKind::Di {
            return Err(VerticeError::configuration(format!(
                "future '{}' is {}, not DI",
                spec.id,
                spec.kind.label()
            )));
        }
        let maturity = spec.maturity.ok_or_else(|| {
            VerticeError::configuration(format!("DI future '{}' has no maturity", spec.id))
        })?;
        let bd = business_days(reference_date, maturity, market.calendar());
        let business_days = u32::try_from(bd).ok().filter(|bd| *bd > 0).ok_or_else(|| {
            VerticeError::domain_range(
                "business_days_to_maturity",
                bd as f64,
                format!("DI future '{}' has expired", spec.id),
            )
        })?;

        Ok(Self {
            spec,
            reference_date,
            market,
            business_days,
        })
    }

    /// Business days from the reference date to maturity.
    pub fn business_days(&self) -> u32 {
        self.business_days
    }

    /// The DI vertex at the contract's maturity.
    pub fn curve(&self) -> DomesticCurve<'a> {
        DomesticCurve::new(self.market.di_curve(), self.business_days)
    }

    /// Latest curve rate at the contract's vertex.
    pub fn rate(&self) -> VerticeResult<f64> {
        self.curve().latest(self.reference_date)
    }

    /// Contract price at `rate` percent.
    pub fn price_at(&self, rate: f64) -> VerticeResult<f64> {
        di_future_price(self.spec.contract_size, rate, self.business_days)
    }

    /// Contract price at the current curve rate.
    pub fn present_value(&self) -> VerticeResult<f64> {
        self.price_at(self.rate()?)
    }
}
