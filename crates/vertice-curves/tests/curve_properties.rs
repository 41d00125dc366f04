//! Property-based tests for curve interpolation and vertex selection.

use proptest::prelude::*;

use vertice_core::market::CurveTable;
use vertice_core::types::{Date, Tenor};
use vertice_curves::{interpolated_rate_curve, nearest_treasury_vertex};

const LABELS: [&str; 6] = ["3M", "1Y", "2Y", "5Y", "10Y", "30Y"];

proptest! {
    #[test]
    fn interpolated_rate_is_bracketed(
        lower in 1u32..500,
        width in 2u32..500,
        offset in 1u32..1000,
        lo_rate in 1.0f64..20.0,
        hi_rate in 1.0f64..20.0,
    ) {
        let upper = lower + width;
        let target = lower + 1 + offset % (width - 1);
        let d = Date::from_ymd(2025, 5, 26).unwrap();
        let mut curve = CurveTable::new();
        curve.insert(d, lower, lo_rate);
        curve.insert(d, upper, hi_rate);

        let history = interpolated_rate_curve(target, &curve, d).unwrap();
        prop_assert_eq!(history.len(), 1);
        let rate = history[0].1;
        prop_assert!(rate >= lo_rate.min(hi_rate) - 1e-12);
        prop_assert!(rate <= lo_rate.max(hi_rate) + 1e-12);
    }

    #[test]
    fn nearest_vertex_minimizes_distance(years in 0.0f64..40.0) {
        let tenors: Vec<Tenor> = LABELS.iter().map(|l| Tenor::parse(l).unwrap()).collect();
        let chosen = nearest_treasury_vertex(years, &tenors).unwrap();
        let best = (chosen.years() - years).abs();
        prop_assert!(tenors.iter().all(|t| (t.years() - years).abs() >= best));
    }
}
