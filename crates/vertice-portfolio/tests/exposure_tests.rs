//! Integration tests for the exposure engine.
//!
//! A one-day market snapshot with every instrument family, checked
//! against hand-computed exposures.

use approx::assert_relative_eq;

use vertice_analytics::fixed_income::BondValuer;
use vertice_core::prelude::*;
use vertice_portfolio::prelude::*;

// =============================================================================
// FIXTURES
// =============================================================================

fn today() -> Date {
    Date::from_ymd(2025, 5, 26).unwrap()
}

const USDBRL_RATE: f64 = 5.5;

fn ntnf() -> BondSpec {
    BondSpec {
        id: "Título 1".into(),
        kind: BondKind::NtnF,
        coupon: 10.0,
        rate: 12.0,
        maturity: Date::from_ymd(2030, 5, 15).unwrap(),
        face: 1000.0,
    }
}

fn note() -> BondSpec {
    BondSpec {
        id: "Título 2".into(),
        kind: BondKind::TreasuryNote,
        coupon: 4.0,
        rate: 4.2,
        maturity: Date::from_ymd(2030, 5, 31).unwrap(),
        face: 1000.0,
    }
}

fn future(id: &str, kind: FutureKind, size: f64) -> FutureSpec {
    FutureSpec {
        id: id.into(),
        kind,
        contract_size: size,
        maturity: Some(Date::from_ymd(2025, 6, 23).unwrap()),
    }
}

fn reference() -> ReferenceData {
    let mut reference = ReferenceData::new();
    reference.add_bond(ntnf());
    reference.add_bond(note());
    reference.add_future(future("Futuro 1", FutureKind::EurUsd, 100_000.0));
    reference.add_future(future("Futuro 2", FutureKind::UsdBrl, 50_000.0));
    reference.add_future(future("Futuro 3", FutureKind::Di, 100_000.0));
    reference.add_future(future("Futuro 4", FutureKind::Ibov, 1.0));
    reference
}

fn market() -> MarketData {
    let d = today();
    MarketData::builder()
        .br_equity("PETR4", d, 50.0)
        .br_equity("IBOV", d, 130_000.0)
        .us_equity("AAPL", d, 200.0)
        .fx("USDBRL", d, USDBRL_RATE)
        .fx("EURUSD", d, 1.10)
        .treasury_rate(d, "2Y", 4.0)
        .treasury_rate(d, "5Y", 4.2)
        .treasury_rate(d, "10Y", 4.4)
        .reference(reference())
        .build()
        .unwrap()
}

fn position(id: InstrumentId, quantity: f64) -> Position {
    Position::resolve(&id, quantity, Some(&reference())).unwrap()
}

// =============================================================================
// SINGLE POSITIONS
// =============================================================================

#[test]
fn test_domestic_equity() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());
    let exposure = engine
        .position_exposure(&position(InstrumentId::br_equity("PETR4"), 1000.0))
        .unwrap();

    assert_eq!(exposure.names(), vec!["PETR4"]);
    assert_relative_eq!(exposure.get("PETR4").unwrap(), 50_000.0);
}

#[test]
fn test_us_equity_inherits_fx_leg() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());
    let exposure = engine
        .position_exposure(&position(InstrumentId::us_equity("AAPL"), -10.0))
        .unwrap();

    assert_relative_eq!(exposure.get("AAPL").unwrap(), -11_000.0);
    assert_relative_eq!(exposure.get("USDBRL").unwrap(), -11_000.0);
}

#[test]
fn test_futures() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());

    let cross = engine
        .position_exposure(&position(InstrumentId::future("Futuro 1"), 2.0))
        .unwrap();
    let expected = 2.0 * (100_000.0 / 1.10) * USDBRL_RATE;
    assert_eq!(cross.names(), vec!["EURUSD", "USDBRL"]);
    assert_relative_eq!(cross.get("EURUSD").unwrap(), expected, epsilon = 1e-6);
    assert_relative_eq!(cross.get("USDBRL").unwrap(), expected, epsilon = 1e-6);

    let direct = engine
        .position_exposure(&position(InstrumentId::future("Futuro 2"), -1.0))
        .unwrap();
    assert_relative_eq!(direct.get("USDBRL").unwrap(), -50_000.0 * USDBRL_RATE);

    let di = engine
        .position_exposure(&position(InstrumentId::future("Futuro 3"), 3.0))
        .unwrap();
    assert_relative_eq!(di.get("DI_20").unwrap(), 300_000.0);

    let ibov = engine
        .position_exposure(&position(InstrumentId::future("Futuro 4"), 5.0))
        .unwrap();
    assert_relative_eq!(ibov.get(IBOV_TICKER).unwrap(), 5.0);
}

#[test]
fn test_domestic_bond() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());
    let exposure = engine
        .position_exposure(&position(InstrumentId::bond("Título 1"), 100.0))
        .unwrap();

    let spec = ntnf();
    let valuer = BondValuer::new(&spec, today(), &market).unwrap();
    let expected = 100.0 * valuer.present_value().unwrap() * valuer.modified_duration().unwrap();

    assert_eq!(exposure.len(), 1);
    assert!(exposure.names()[0].starts_with("DI_"));
    assert_relative_eq!(exposure.values()[0], expected, epsilon = 1e-6);
}

#[test]
fn test_foreign_bond_fx_leg_is_market_value() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());
    let exposure = engine
        .position_exposure(&position(InstrumentId::bond("Título 2"), 10.0))
        .unwrap();

    let spec = note();
    let valuer = BondValuer::new(&spec, today(), &market).unwrap();
    let pu = valuer.present_value().unwrap();
    let duration = valuer.modified_duration().unwrap();

    assert_eq!(exposure.names(), vec!["UST_5Y", "USDBRL"]);
    assert_relative_eq!(
        exposure.get("UST_5Y").unwrap(),
        10.0 * pu * duration * USDBRL_RATE,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        exposure.get("USDBRL").unwrap(),
        10.0 * pu * USDBRL_RATE,
        epsilon = 1e-6
    );
}

// =============================================================================
// PORTFOLIO AGGREGATION
// =============================================================================

#[test]
fn test_portfolio_sums_shared_factors() {
    let market = market();
    let portfolio = Portfolio::builder()
        .name("Mixed")
        .reference_date(today())
        .add_position(position(InstrumentId::br_equity("PETR4"), 1000.0))
        .add_position(position(InstrumentId::us_equity("AAPL"), 10.0))
        .add_position(position(InstrumentId::future("Futuro 2"), -1.0))
        .add_position(position(InstrumentId::br_equity("PETR4"), -400.0))
        .build()
        .unwrap();

    let exposure = ExposureEngine::new(&market, today())
        .portfolio_exposure(&portfolio)
        .unwrap();

    assert_eq!(exposure.names(), vec!["PETR4", "AAPL", "USDBRL"]);
    assert_relative_eq!(exposure.get("PETR4").unwrap(), 30_000.0);
    assert_relative_eq!(
        exposure.get("USDBRL").unwrap(),
        11_000.0 - 50_000.0 * USDBRL_RATE,
        epsilon = 1e-9
    );
}

#[test]
fn test_missing_price_is_an_error() {
    let market = market();
    let engine = ExposureEngine::new(&market, today());
    let result = engine.position_exposure(&position(InstrumentId::br_equity("VALE3"), 1.0));
    assert!(matches!(result, Err(VerticeError::MissingMarketData { .. })));

    // nothing after the reference date is visible
    let early = ExposureEngine::new(&market, today().add_days(-1));
    assert!(early
        .position_exposure(&position(InstrumentId::br_equity("PETR4"), 1.0))
        .is_err());
}
