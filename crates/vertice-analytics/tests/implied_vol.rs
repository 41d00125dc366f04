//! Property tests for the implied-volatility solver.

use proptest::prelude::*;
use vertice_analytics::prelude::*;
use vertice_core::types::OptionKind;

fn option_kind() -> impl Strategy<Value = OptionKind> {
    prop_oneof![Just(OptionKind::Call), Just(OptionKind::Put)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn implied_vol_reprices_target(
        moneyness in 0.8f64..1.25,
        t in 0.1f64..2.0,
        rate in 0.0f64..15.0,
        vol in 5.0f64..80.0,
        kind in option_kind(),
    ) {
        let bs = BlackScholes::new(100.0 * moneyness, 100.0, t, rate, 0.0).unwrap();
        let target = bs.price(vol, kind);
        let implied = bs.implied_vol(target, kind, DEFAULT_IMPLIED_VOL_TOLERANCE);
        prop_assume!(!is_unpriceable(implied));
        prop_assert!((bs.price(implied, kind) - target).abs() < 1e-6);
    }

    #[test]
    fn call_premium_increases_with_vol(
        spot in 50.0f64..150.0,
        low in 5.0f64..40.0,
        bump in 1.0f64..40.0,
    ) {
        let bs = BlackScholes::new(spot, 100.0, 0.5, 10.0, 0.0).unwrap();
        prop_assert!(bs.price(low + bump, OptionKind::Call) >= bs.price(low, OptionKind::Call));
    }
}

#[test]
fn atm_round_trip_recovers_twenty_percent() {
    let bs = BlackScholes::new(100.0, 100.0, 1.0, 0.0, 0.0).unwrap();
    for kind in [OptionKind::Call, OptionKind::Put] {
        let target = bs.price(20.0, kind);
        let vol = bs.implied_vol(target, kind, 1e-9);
        assert!((vol - 20.0).abs() < 1e-6, "{kind:?}: {vol}");
    }
}
