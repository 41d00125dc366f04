//! US Treasury curve, tenors by label.

use vertice_core::market::CurveTable;
use vertice_core::types::{Date, Tenor};
use vertice_core::{VerticeError, VerticeResult};

use crate::RateCurve;

/// Selects the tenor whose length in years is closest to `years`.
///
/// Ties go to the tenor that appears first in `tenors`.
///
/// # Errors
///
/// Returns `VerticeError::MissingMarketData` when `tenors` is empty.
pub fn nearest_treasury_vertex(years: f64, tenors: &[Tenor]) -> VerticeResult<&Tenor> {
    let mut best: Option<(&Tenor, f64)> = None;
    for tenor in tenors {
        let distance = (tenor.years() - years).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((tenor, distance)),
        }
    }
    best.map(|(tenor, _)| tenor).ok_or_else(|| {
        VerticeError::missing_market_data("treasury curve", "no tenors available")
    })
}

/// The treasury curve seen at one tenor.
#[derive(Debug, Clone)]
pub struct TreasuryCurve<'a> {
    table: &'a CurveTable<String>,
    tenor: Tenor,
}

impl<'a> TreasuryCurve<'a> {
    /// Creates a view of the treasury curve at `tenor`.
    pub fn new(table: &'a CurveTable<String>, tenor: Tenor) -> Self {
        Self { table, tenor }
    }

    /// The tenor this view reads.
    pub fn tenor(&self) -> &Tenor {
        &self.tenor
    }
}

impl RateCurve for TreasuryCurve<'_> {
    fn name(&self) -> String {
        format!("UST_{}", self.tenor.label())
    }

    fn history(&self, as_of: Date) -> VerticeResult<Vec<(Date, f64)>> {
        let history = self.table.history(&self.tenor.label().to_string(), as_of);
        if history.is_empty() {
            return Err(VerticeError::missing_market_data(
                self.name(),
                format!("no treasury observation on or before {as_of}"),
            ));
        }
        Ok(history)
    }
}
