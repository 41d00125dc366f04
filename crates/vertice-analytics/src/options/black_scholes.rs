//! Black-Scholes-Merton pricing with percent-quoted inputs.
//!
//! Rates, dividend yields and volatilities are all quoted in percent per
//! annum (`14.5` means 14.5%); time to expiry is in years.
//!
//! ## Formula
//!
//! ```text
//! d1 = (ln(S/K) + (r - q + σ²/2)·t) / (σ·√t)
//! d2 = d1 - σ·√t
//! C  = S·e^(-q·t)·N(d1) - K·e^(-r·t)·N(d2)
//! P  = K·e^(-r·t)·N(-d2) - S·e^(-q·t)·N(-d1)
//! ```

use vertice_core::types::OptionKind;
use vertice_core::{VerticeError, VerticeResult};
use vertice_math::statistics::{normal_cdf, normal_pdf};

/// Converts a rate compounded `frequency` times a year into its continuously
/// compounded equivalent, both in percent.
///
/// A frequency of zero means the rate is already continuous and is returned
/// unchanged.
///
/// ```rust
/// use vertice_analytics::options::rate_conversion;
///
/// assert_eq!(rate_conversion(10.0, 0), 10.0);
/// assert!((rate_conversion(10.0, 1) - 9.531_017_98).abs() < 1e-8);
/// ```
#[must_use]
pub fn rate_conversion(rate: f64, frequency: u32) -> f64 {
    if frequency == 0 {
        return rate;
    }
    let f = f64::from(frequency);
    100.0 * f * (1.0 + rate / (100.0 * f)).ln()
}

/// A European option under Black-Scholes-Merton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Risk-free rate, percent per annum.
    pub rate: f64,
    /// Dividend yield, percent per annum.
    pub dividend_yield: f64,
    /// Compounding frequency of `rate` and `dividend_yield` (0 = continuous).
    pub compounding: u32,
}

impl BlackScholes {
    /// Creates a model with continuously compounded rates.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::DomainRange` for a non-positive spot or strike,
    /// or a negative or non-finite time to expiry.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> VerticeResult<Self> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(VerticeError::domain_range("spot", spot, "must be positive"));
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(VerticeError::domain_range("strike", strike, "must be positive"));
        }
        if !(time_to_expiry.is_finite() && time_to_expiry >= 0.0) {
            return Err(VerticeError::domain_range(
                "time_to_expiry",
                time_to_expiry,
                "must be non-negative",
            ));
        }
        Ok(Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            dividend_yield,
            compounding: 0,
        })
    }

    /// Sets the compounding frequency of the quoted rates.
    #[must_use]
    pub fn with_compounding(mut self, frequency: u32) -> Self {
        self.compounding = frequency;
        self
    }

    /// Same option with a different spot.
    #[must_use]
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Same option with a different time to expiry, floored at zero.
    #[must_use]
    pub fn with_time_to_expiry(mut self, time_to_expiry: f64) -> Self {
        self.time_to_expiry = time_to_expiry.max(0.0);
        self
    }

    fn continuous_rates(&self) -> (f64, f64) {
        (
            rate_conversion(self.rate, self.compounding) / 100.0,
            rate_conversion(self.dividend_yield, self.compounding) / 100.0,
        )
    }

    /// `(d1, d2)` for a volatility in percent; `None` at expiry or zero vol.
    fn d1_d2(&self, vol: f64) -> Option<(f64, f64)> {
        let sigma = vol / 100.0;
        let t = self.time_to_expiry;
        if t <= 0.0 || sigma <= 0.0 {
            return None;
        }
        let (r, q) = self.continuous_rates();
        let sd = sigma * t.sqrt();
        let d1 = ((self.spot / self.strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / sd;
        Some((d1, d1 - sd))
    }

    fn intrinsic(&self, kind: OptionKind) -> f64 {
        match kind {
            OptionKind::Call => (self.spot - self.strike).max(0.0),
            OptionKind::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Option premium for a volatility in percent.
    ///
    /// At expiry (or zero volatility) the premium is the intrinsic value.
    #[must_use]
    pub fn price(&self, vol: f64, kind: OptionKind) -> f64 {
        let Some((d1, d2)) = self.d1_d2(vol) else {
            return self.intrinsic(kind);
        };
        let (r, q) = self.continuous_rates();
        let t = self.time_to_expiry;
        let spot_df = self.spot * (-q * t).exp();
        let strike_df = self.strike * (-r * t).exp();
        match kind {
            OptionKind::Call => spot_df * normal_cdf(d1) - strike_df * normal_cdf(d2),
            OptionKind::Put => strike_df * normal_cdf(-d2) - spot_df * normal_cdf(-d1),
        }
    }

    /// Sensitivity of the premium to the spot.
    #[must_use]
    pub fn delta(&self, vol: f64, kind: OptionKind) -> f64 {
        let Some((d1, _)) = self.d1_d2(vol) else {
            let itm = self.intrinsic(kind) > 0.0;
            return match (kind, itm) {
                (OptionKind::Call, true) => 1.0,
                (OptionKind::Put, true) => -1.0,
                _ => 0.0,
            };
        };
        let (_, q) = self.continuous_rates();
        let carry = (-q * self.time_to_expiry).exp();
        match kind {
            OptionKind::Call => carry * normal_cdf(d1),
            OptionKind::Put => -carry * normal_cdf(-d1),
        }
    }

    /// Sensitivity of the premium to volatility expressed as a decimal
    /// (a move from 0.20 to 0.21 changes the premium by about `vega / 100`).
    ///
    /// Identical for calls and puts.
    #[must_use]
    pub fn vega(&self, vol: f64) -> f64 {
        let Some((d1, _)) = self.d1_d2(vol) else {
            return 0.0;
        };
        let (_, q) = self.continuous_rates();
        let t = self.time_to_expiry;
        self.spot * t.sqrt() * normal_pdf(d1) * (-q * t).exp()
    }
}
