//! Read-only market-data snapshot.
//!
//! [`MarketData`] bundles everything the valuation and risk layers read:
//! equity prices per market, FX rates, the domestic DI curve, the treasury
//! curve, the holiday calendar and the reference tables. It is assembled once
//! with [`MarketDataBuilder`] and then passed by reference.

mod reference;
mod table;

pub use reference::{BondSpec, FutureSpec, OptionSpec, ReferenceData};
pub use table::{CurveTable, PriceTable};

use crate::calendars::HolidayCalendar;
use crate::error::{VerticeError, VerticeResult};
use crate::types::{Date, Locale, Tenor};

/// FX series key of the USD/BRL rate.
pub const USDBRL: &str = "USDBRL";

/// Immutable market-data snapshot.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    br_equities: PriceTable,
    us_equities: PriceTable,
    fx: PriceTable,
    di_curve: CurveTable<u32>,
    treasury_curve: CurveTable<String>,
    treasury_tenors: Vec<Tenor>,
    calendar: HolidayCalendar,
    reference: ReferenceData,
}

impl MarketData {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> MarketDataBuilder {
        MarketDataBuilder::new()
    }

    /// Equity prices of a market.
    #[must_use]
    pub fn equities(&self, locale: Locale) -> &PriceTable {
        match locale {
            Locale::Br => &self.br_equities,
            Locale::Us => &self.us_equities,
        }
    }

    /// FX rates keyed by pair (`USDBRL`, `EURUSD`, ...).
    #[must_use]
    pub fn fx(&self) -> &PriceTable {
        &self.fx
    }

    /// DI curve keyed by business-day tenor, rates in percent.
    #[must_use]
    pub fn di_curve(&self) -> &CurveTable<u32> {
        &self.di_curve
    }

    /// Treasury curve keyed by tenor label, rates in percent.
    #[must_use]
    pub fn treasury_curve(&self) -> &CurveTable<String> {
        &self.treasury_curve
    }

    /// Treasury tenors in the order they were loaded.
    #[must_use]
    pub fn treasury_tenors(&self) -> &[Tenor] {
        &self.treasury_tenors
    }

    /// Holiday calendar used for business-day counts.
    #[must_use]
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Reference tables.
    #[must_use]
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Latest equity price on or before `date`.
    pub fn equity_price(&self, ticker: &str, locale: Locale, date: Date) -> VerticeResult<f64> {
        self.equities(locale).latest_on_or_before(ticker, date)
    }

    /// Latest FX rate on or before `date`.
    pub fn fx_rate(&self, pair: &str, date: Date) -> VerticeResult<f64> {
        self.fx.latest_on_or_before(pair, date)
    }

    /// Latest USD/BRL rate on or before `date`.
    pub fn usdbrl(&self, date: Date) -> VerticeResult<f64> {
        self.fx_rate(USDBRL, date)
    }

    /// BRL conversion factor for a market: USD/BRL for US, 1 for BR.
    pub fn fx_to_brl(&self, locale: Locale, date: Date) -> VerticeResult<f64> {
        match locale {
            Locale::Br => Ok(1.0),
            Locale::Us => self.usdbrl(date),
        }
    }
}

/// Builder for [`MarketData`].
///
/// # Example
///
/// ```rust
/// use vertice_core::market::MarketData;
/// use vertice_core::types::Date;
///
/// let d = Date::from_ymd(2025, 5, 26).unwrap();
/// let market = MarketData::builder()
///     .br_equity("PETR4", d, 32.1)
///     .fx("USDBRL", d, 5.65)
///     .di_rate(d, 252, 14.6)
///     .treasury_rate(d, "10Y", 4.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(market.usdbrl(d).unwrap(), 5.65);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketDataBuilder {
    br_equities: PriceTable,
    us_equities: PriceTable,
    fx: PriceTable,
    di_curve: CurveTable<u32>,
    treasury_rows: Vec<(Date, String, f64)>,
    treasury_labels: Vec<String>,
    calendar: HolidayCalendar,
    reference: ReferenceData,
}

impl MarketDataBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a Brazilian equity price.
    #[must_use]
    pub fn br_equity(mut self, ticker: impl Into<String>, date: Date, price: f64) -> Self {
        self.br_equities.insert(ticker, date, price);
        self
    }

    /// Adds a Brazilian equity history.
    #[must_use]
    pub fn br_equity_series(
        mut self,
        ticker: impl Into<String>,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        self.br_equities.extend(ticker, points);
        self
    }

    /// Adds a US equity price (USD).
    #[must_use]
    pub fn us_equity(mut self, ticker: impl Into<String>, date: Date, price: f64) -> Self {
        self.us_equities.insert(ticker, date, price);
        self
    }

    /// Adds a US equity history (USD).
    #[must_use]
    pub fn us_equity_series(
        mut self,
        ticker: impl Into<String>,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        self.us_equities.extend(ticker, points);
        self
    }

    /// Adds an FX observation.
    #[must_use]
    pub fn fx(mut self, pair: impl Into<String>, date: Date, rate: f64) -> Self {
        self.fx.insert(pair, date, rate);
        self
    }

    /// Adds an FX history.
    #[must_use]
    pub fn fx_series(
        mut self,
        pair: impl Into<String>,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        self.fx.extend(pair, points);
        self
    }

    /// Adds a DI curve vertex (tenor in business days, rate in percent).
    #[must_use]
    pub fn di_rate(mut self, date: Date, business_days: u32, rate: f64) -> Self {
        self.di_curve.insert(date, business_days, rate);
        self
    }

    /// Adds a treasury curve vertex (tenor label such as `10Y`, rate in percent).
    ///
    /// The tenor order of the snapshot follows first appearance.
    #[must_use]
    pub fn treasury_rate(mut self, date: Date, tenor: impl Into<String>, rate: f64) -> Self {
        let label = tenor.into().trim().to_ascii_uppercase();
        if !self.treasury_labels.contains(&label) {
            self.treasury_labels.push(label.clone());
        }
        self.treasury_rows.push((date, label, rate));
        self
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets all reference tables (replacing any existing).
    #[must_use]
    pub fn reference(mut self, reference: ReferenceData) -> Self {
        self.reference = reference;
        self
    }

    /// Registers an option.
    #[must_use]
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.reference.add_option(spec);
        self
    }

    /// Registers a future.
    #[must_use]
    pub fn future(mut self, spec: FutureSpec) -> Self {
        self.reference.add_future(spec);
        self
    }

    /// Registers a bond.
    #[must_use]
    pub fn bond(mut self, spec: BondSpec) -> Self {
        self.reference.add_bond(spec);
        self
    }

    /// Builds the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `VerticeError::Configuration` for malformed treasury tenor
    /// labels or incomplete future terms.
    pub fn build(self) -> VerticeResult<MarketData> {
        let treasury_tenors = self
            .treasury_labels
            .iter()
            .map(|label| Tenor::parse(label))
            .collect::<VerticeResult<Vec<_>>>()?;

        let mut treasury_curve = CurveTable::new();
        for (date, label, rate) in self.treasury_rows {
            treasury_curve.insert(date, label, rate);
        }

        for future in self.reference.futures.values() {
            future.validate()?;
        }

        for (name, table) in [
            ("BR equities", &self.br_equities),
            ("US equities", &self.us_equities),
            ("FX", &self.fx),
        ] {
            if let Some(bad) = table
                .names()
                .into_iter()
                .find(|n| table.series(n).is_some_and(|s| s.values().any(|v| !v.is_finite())))
            {
                return Err(VerticeError::missing_market_data(
                    bad,
                    format!("non-finite value in {name}"),
                ));
            }
        }

        Ok(MarketData {
            br_equities: self.br_equities,
            us_equities: self.us_equities,
            fx: self.fx,
            di_curve: self.di_curve,
            treasury_curve,
            treasury_tenors,
            calendar: self.calendar,
            reference: self.reference,
        })
    }
}
