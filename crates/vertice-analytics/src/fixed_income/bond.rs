//! Government bond valuation on a semiannual coupon schedule.

use vertice_core::calendars::business_days;
use vertice_core::market::{BondSpec, MarketData};
use vertice_core::types::{Date, Tenor};
use vertice_core::{VerticeError, VerticeResult};
use vertice_curves::{nearest_treasury_vertex, DomesticCurve, RateCurve, TreasuryCurve};

/// Calendar days per coupon period.
pub const DAYS_PER_PERIOD: i64 = 180;

/// Business days per year on the domestic basis.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// How the remaining life of a bond maps onto its rate curve.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodMetric {
    /// Domestic bonds: business days to maturity, read off the DI curve.
    BusinessDays(u32),
    /// Foreign bonds: the treasury vertex nearest to the remaining life.
    TreasuryVertex(Tenor),
}

/// The rate vertex a bond is sensitive to.
#[derive(Debug, Clone)]
pub enum BondCurve<'a> {
    /// A DI curve vertex.
    Domestic(DomesticCurve<'a>),
    /// A treasury curve vertex.
    Treasury(TreasuryCurve<'a>),
}

impl RateCurve for BondCurve<'_> {
    fn name(&self) -> String {
        match self {
            Self::Domestic(curve) => curve.name(),
            Self::Treasury(curve) => curve.name(),
        }
    }

    fn history(&self, as_of: Date) -> VerticeResult<Vec<(Date, f64)>> {
        match self {
            Self::Domestic(curve) => curve.history(as_of),
            Self::Treasury(curve) => curve.history(as_of),
        }
    }
}

/// Present value and duration of a bond as of a reference date.
///
/// # Example
///
/// ```rust
/// use vertice_analytics::fixed_income::BondValuer;
/// use vertice_core::market::{BondSpec, MarketData};
/// use vertice_core::types::{BondKind, Date};
///
/// let today = Date::from_ymd(2025, 5, 26).unwrap();
/// let spec = BondSpec {
///     id: "T1".into(),
///     kind: BondKind::TreasuryNote,
///     coupon: 4.0,
///     rate: 4.0,
///     maturity: Date::from_ymd(2030, 5, 26).unwrap(),
///     face: 1000.0,
/// };
/// let market = MarketData::builder()
///     .treasury_rate(today, "5Y", 4.1)
///     .build()
///     .unwrap();
///
/// let valuer = BondValuer::new(&spec, today, &market).unwrap();
/// // coupon equal to yield prices at par
/// assert!((valuer.present_value().unwrap() - 1000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BondValuer<'a> {
    spec: &'a BondSpec,
    reference_date: Date,
    market: &'a MarketData,
    calendar_days: i64,
    metric: PeriodMetric,
}

impl<'a> BondValuer<'a> {
    /// Resolves the period metric of `spec` as of `reference_date`.
    ///
    /// # Errors
    ///
    /// `DomainRange` if the bond has matured (no calendar or business days
    /// left); `MissingMarketData` if a foreign bond finds no treasury tenors.
    pub fn new(
        spec: &'a BondSpec,
        reference_date: Date,
        market: &'a MarketData,
    ) -> VerticeResult<Self> {
        let calendar_days = reference_date.days_between(&spec.maturity);
        if calendar_days <= 0 {
            return Err(VerticeError::domain_range(
                "days_to_maturity",
                calendar_days as f64,
                format!("bond '{}' has matured", spec.id),
            ));
        }

        let metric = if spec.locale().is_domestic() {
            let bd = business_days(reference_date, spec.maturity, market.calendar());
            let bd = u32::try_from(bd).ok().filter(|bd| *bd > 0).ok_or_else(|| {
                VerticeError::domain_range(
                    "business_days_to_maturity",
                    bd as f64,
                    format!("bond '{}' has no business days left", spec.id),
                )
            })?;
            PeriodMetric::BusinessDays(bd)
        } else {
            let years = calendar_days as f64 / 365.0;
            PeriodMetric::TreasuryVertex(
                nearest_treasury_vertex(years, market.treasury_tenors())?.clone(),
            )
        };

        Ok(Self {
            spec,
            reference_date,
            market,
            calendar_days,
            metric,
        })
    }

    /// The bond terms.
    pub fn spec(&self) -> &BondSpec {
        self.spec
    }

    /// Business days (domestic) or treasury vertex (foreign).
    pub fn period_metric(&self) -> &PeriodMetric {
        &self.metric
    }

    /// Calendar days from the reference date to maturity.
    pub fn calendar_days(&self) -> i64 {
        self.calendar_days
    }

    /// Number of whole semiannual periods left.
    pub fn periods(&self) -> u32 {
        u32::try_from(self.calendar_days / DAYS_PER_PERIOD).unwrap_or(u32::MAX)
    }

    /// The curve vertex driving this bond's yield.
    pub fn curve(&self) -> BondCurve<'a> {
        match &self.metric {
            PeriodMetric::BusinessDays(bd) => {
                BondCurve::Domestic(DomesticCurve::new(self.market.di_curve(), *bd))
            }
            PeriodMetric::TreasuryVertex(tenor) => BondCurve::Treasury(TreasuryCurve::new(
                self.market.treasury_curve(),
                tenor.clone(),
            )),
        }
    }

    /// Dated yield history (percent) of the bond's vertex, up to the
    /// reference date.
    pub fn yield_curve(&self) -> VerticeResult<Vec<(Date, f64)>> {
        self.curve().history(self.reference_date)
    }

    /// Price (PU) at the bond's own yield.
    pub fn present_value(&self) -> VerticeResult<f64> {
        self.present_value_at(self.spec.rate)
    }

    /// Price (PU) at an annual yield in percent.
    ///
    /// ```text
    /// PU = Σ_{k=1..N} c / (1+y)^k + F / (1+y)^N
    /// ```
    ///
    /// with `c = F·coupon/200`, `y = yield/200` and `N` whole 180-day periods.
    pub fn present_value_at(&self, annual_yield: f64) -> VerticeResult<f64> {
        let y = periodic_rate(annual_yield)?;
        let coupon = self.semiannual_coupon();
        let n = self.periods();

        let coupons: f64 = (1..=n).map(|k| coupon / (1.0 + y).powf(f64::from(k))).sum();
        Ok(coupons + self.spec.face / (1.0 + y).powf(f64::from(n)))
    }

    /// Macaulay duration in years.
    ///
    /// Domestic bonds use `business_days / 252`, treating the bond as a
    /// zero-coupon equivalent. Foreign bonds weight each coupon period by
    /// the present value of its coupon and halve the result; with no coupon
    /// flows the duration is `N / 2`.
    pub fn macaulay_duration(&self) -> VerticeResult<f64> {
        match &self.metric {
            PeriodMetric::BusinessDays(bd) => Ok(f64::from(*bd) / BUSINESS_DAYS_PER_YEAR),
            PeriodMetric::TreasuryVertex(_) => {
                let y = periodic_rate(self.spec.rate)?;
                let coupon = self.semiannual_coupon();
                let n = self.periods();

                let (weighted, total) = (1..=n).fold((0.0, 0.0), |(w, t), k| {
                    let k = f64::from(k);
                    let pv = coupon / (1.0 + y).powf(k);
                    (w + k * pv, t + pv)
                });
                if total > 0.0 {
                    Ok(weighted / total / 2.0)
                } else {
                    Ok(f64::from(n) / 2.0)
                }
            }
        }
    }

    /// Modified duration: `macaulay / (1 + yield/100)`.
    pub fn modified_duration(&self) -> VerticeResult<f64> {
        Ok(self.macaulay_duration()? / (1.0 + self.spec.rate / 100.0))
    }

    fn semiannual_coupon(&self) -> f64 {
        self.spec.face * self.spec.coupon / 100.0 / 2.0
    }
}

/// Semiannual decimal rate of an annual percent yield, checked to lie in
/// `(0, 1]`.
fn periodic_rate(annual_yield: f64) -> VerticeResult<f64> {
    let y = annual_yield / 100.0 / 2.0;
    if y > 0.0 && y <= 1.0 {
        Ok(y)
    } else {
        Err(VerticeError::domain_range(
            "periodic_discount_rate",
            y,
            "must lie in (0, 1]; check the yield is an annual percentage",
        ))
    }
}
