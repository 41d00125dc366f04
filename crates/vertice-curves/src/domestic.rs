//! Domestic DI curve, tenors in business days.

use std::collections::BTreeSet;

use vertice_core::market::CurveTable;
use vertice_core::types::Date;
use vertice_core::{VerticeError, VerticeResult};
use vertice_math::interpolation::{Interpolator, LinearInterpolator};

use crate::RateCurve;

/// Rate history of the DI curve at a fixed business-day tenor.
///
/// Observed tenors are returned as-is. Any other tenor is linearly
/// interpolated, date by date, between the nearest lower and nearest upper
/// tenor observed anywhere in the table.
///
/// # Errors
///
/// `DomainRange` outside the observed tenor range; `MissingMarketData`
/// when no date up to `as_of` carries the vertex (or both brackets).
///
/// ```rust
/// use vertice_core::market::CurveTable;
/// use vertice_core::types::Date;
/// use vertice_curves::interpolated_rate_curve;
///
/// let d = Date::from_ymd(2025, 5, 26).unwrap();
/// let mut di = CurveTable::new();
/// di.insert(d, 21, 14.0);
/// di.insert(d, 63, 14.6);
///
/// let curve = interpolated_rate_curve(42, &di, d).unwrap();
/// assert!((curve[0].1 - 14.3).abs() < 1e-12);
/// ```
pub fn interpolated_rate_curve(
    business_days: u32,
    curve: &CurveTable<u32>,
    as_of: Date,
) -> VerticeResult<Vec<(Date, f64)>> {
    let tenors = curve.tenors();
    if tenors.contains(&business_days) {
        let history = curve.history(&business_days, as_of);
        return non_empty(history, business_days, as_of);
    }

    let (lower, upper) = bracket(business_days, &tenors)?;
    let xs = vec![f64::from(lower), f64::from(upper)];

    let mut history = Vec::new();
    for (date, row) in curve.rows_until(as_of) {
        let (Some(lo), Some(hi)) = (row.get(&lower), row.get(&upper)) else {
            continue;
        };
        let interp = LinearInterpolator::new(xs.clone(), vec![*lo, *hi])?;
        history.push((*date, interp.interpolate(f64::from(business_days))?));
    }
    non_empty(history, business_days, as_of)
}

fn non_empty(
    history: Vec<(Date, f64)>,
    business_days: u32,
    as_of: Date,
) -> VerticeResult<Vec<(Date, f64)>> {
    if history.is_empty() {
        return Err(VerticeError::missing_market_data(
            format!("DI_{business_days}"),
            format!("no DI rates on or before {as_of}"),
        ));
    }
    Ok(history)
}

fn bracket(target: u32, tenors: &BTreeSet<u32>) -> VerticeResult<(u32, u32)> {
    let lower = tenors.range(..target).next_back().copied();
    let upper = tenors.range(target..).next().copied();

    match (lower, upper) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => {
            let observed = match (tenors.first(), tenors.last()) {
                (Some(min), Some(max)) => format!("observed DI tenors span [{min}, {max}]"),
                _ => "no DI tenors observed".to_string(),
            };
            Err(VerticeError::domain_range(
                "business_days",
                f64::from(target),
                format!("{observed}; extrapolation is not allowed"),
            ))
        }
    }
}

/// The DI curve seen at one business-day vertex.
#[derive(Debug, Clone, Copy)]
pub struct DomesticCurve<'a> {
    table: &'a CurveTable<u32>,
    business_days: u32,
}

impl<'a> DomesticCurve<'a> {
    /// Creates a view of the DI curve at `business_days`.
    pub fn new(table: &'a CurveTable<u32>, business_days: u32) -> Self {
        Self {
            table,
            business_days,
        }
    }

    /// The business-day vertex.
    pub fn business_days(&self) -> u32 {
        self.business_days
    }
}

impl RateCurve for DomesticCurve<'_> {
    fn name(&self) -> String {
        format!("DI_{}", self.business_days)
    }

    fn history(&self, as_of: Date) -> VerticeResult<Vec<(Date, f64)>> {
        interpolated_rate_curve(self.business_days, self.table, as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 5, day).unwrap()
    }

    fn sample_curve() -> CurveTable<u32> {
        let mut curve = CurveTable::new();
        curve.insert(d(22), 21, 14.00);
        curve.insert(d(22), 252, 14.40);
        curve.insert(d(22), 504, 13.90);
        curve.insert(d(23), 21, 14.10);
        curve.insert(d(23), 252, 14.50);
        // 26th is missing the 252 vertex
        curve.insert(d(26), 21, 14.20);
        curve.insert(d(26), 504, 14.00);
        curve.insert(d(27), 21, 14.30);
        curve.insert(d(27), 252, 14.70);
        curve
    }

    #[test]
    fn test_exact_tenor_returns_history() {
        let history = interpolated_rate_curve(252, &sample_curve(), d(26)).unwrap();
        assert_eq!(history, vec![(d(22), 14.40), (d(23), 14.50)]);
    }

    #[test]
    fn test_interpolation_between_vertices() {
        let history = interpolated_rate_curve(136, &sample_curve(), d(26)).unwrap();
        // Brackets 21 and 252; 26th lacks 252 so it is dropped
        assert_eq!(history.len(), 2);
        let w = (136.0 - 21.0) / (252.0 - 21.0);
        assert_relative_eq!(history[0].1, 14.00 + w * 0.40, epsilon = 1e-12);
        assert_relative_eq!(history[1].1, 14.10 + w * 0.40, epsilon = 1e-12);
    }

    #[test]
    fn test_dates_after_reference_are_ignored() {
        let history = interpolated_rate_curve(21, &sample_curve(), d(26)).unwrap();
        assert_eq!(history.last().map(|(date, _)| *date), Some(d(26)));
    }

    #[test]
    fn test_vertex_without_history_is_missing() {
        let mut curve = sample_curve();
        curve.insert(d(27), 1260, 13.50);

        // 1260 is only quoted after the reference date
        assert!(matches!(
            interpolated_rate_curve(1260, &curve, d(26)),
            Err(VerticeError::MissingMarketData { .. })
        ));
        // 756 brackets 504 and 1260, never quoted together
        assert!(matches!(
            interpolated_rate_curve(756, &curve, d(27)),
            Err(VerticeError::MissingMarketData { .. })
        ));
        assert_eq!(interpolated_rate_curve(1260, &curve, d(27)).unwrap(), vec![(d(27), 13.50)]);
    }

    #[test]
    fn test_out_of_range() {
        let curve = sample_curve();
        assert!(matches!(
            interpolated_rate_curve(10, &curve, d(26)),
            Err(VerticeError::DomainRange { .. })
        ));
        assert!(matches!(
            interpolated_rate_curve(600, &curve, d(26)),
            Err(VerticeError::DomainRange { .. })
        ));
        assert!(interpolated_rate_curve(100, &CurveTable::new(), d(26)).is_err());
    }

    #[test]
    fn test_domestic_curve_name() {
        let table = sample_curve();
        let curve = DomesticCurve::new(&table, 378);
        assert_eq!(curve.name(), "DI_378");
        // Only the 22nd carries both the 252 and 504 vertices
        assert_eq!(curve.history(d(27)).unwrap().len(), 1);
    }
}
