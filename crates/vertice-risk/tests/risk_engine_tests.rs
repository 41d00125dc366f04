//! Integration tests for the risk engine.
//!
//! Runs every risk figure over the synthetic market in `common` and checks
//! the relations that must hold between them.

mod common;

use approx::assert_relative_eq;

use vertice_config::{CovarianceMethod, HistoricalMethod, RiskConfig};
use vertice_core::prelude::*;
use vertice_math::statistics::{ewma_volatility, simple_returns};
use vertice_portfolio::prelude::*;
use vertice_risk::backtest::violations;
use vertice_risk::prelude::*;

use common::*;

fn config() -> RiskConfig {
    RiskConfig::standard().with_scenario_count(40)
}

// =============================================================================
// SINGLE EQUITY
// =============================================================================

#[test]
fn test_single_equity_parametric_var() {
    let market = market();
    let portfolio = single_equity_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let prices: Vec<f64> = walk(1, PETR4_PRICE, 0.020).into_iter().map(|(_, p)| p).collect();
    let sigma = ewma_volatility(&simple_returns(&prices), 0.94).unwrap();

    let var = engine.parametric_var(ConfidenceLevel::P99).unwrap();
    assert_relative_eq!(var, 2.3263 * 1000.0 * 50.0 * sigma, max_relative = 1e-10);
}

#[test]
fn test_single_equity_scenarios_are_linear() {
    let market = market();
    let portfolio = single_equity_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let set = engine.scenarios(10).unwrap();
    assert_eq!(set.len(), 10);
    assert_eq!(set.dates()[9], today());

    let prices = walk(1, PETR4_PRICE, 0.020);
    let r = prices[DAYS - 1].1 / prices[DAYS - 2].1 - 1.0;
    assert_relative_eq!(set.pnl()[9], 50_000.0 * r, epsilon = 1e-8);
}

#[test]
fn test_us_option_scenarios_are_in_brl() {
    let market = market();
    let portfolio = Portfolio::builder()
        .reference_date(today())
        .add_position(position(InstrumentId::option("Opção 2"), 10.0))
        .build()
        .unwrap();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let returns = engine.factor_returns().unwrap();
    let last = returns.len() - 1;
    let r = returns.matrix()[(last, returns.index_of("AAPL").unwrap())];
    let dvol = returns.matrix()[(last, returns.index_of("AAPL_VOL").unwrap())];

    let inputs = engine.exposure_engine().option_inputs(&us_option_spec()).unwrap();
    let spot = inputs.model.spot;
    let usd_move =
        inputs.reprice(spot * (1.0 + r), inputs.volatility + 100.0 * dvol) - inputs.price();

    let set = engine.scenarios(1).unwrap();
    assert_relative_eq!(set.pnl()[0], 1000.0 * USDBRL_RATE * usd_move, max_relative = 1e-10);

    // the delta leg of the parametric exposure is in BRL as well
    let exposure = engine.portfolio_exposure().unwrap();
    assert_relative_eq!(
        exposure.get("AAPL").unwrap(),
        1000.0 * spot * USDBRL_RATE * inputs.delta(),
        max_relative = 1e-10
    );
}

// =============================================================================
// FACTORS AND COVARIANCE
// =============================================================================

#[test]
fn test_mixed_portfolio_factors() {
    let market = market();
    let portfolio = mixed_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let returns = engine.factor_returns().unwrap();
    let expected = [
        "PETR4", "VALE3", "AAPL", "USDBRL", "PETR4_VOL", "EURUSD", "DI_20", "IBOV", "UST_5Y",
    ];
    for name in expected {
        assert!(returns.index_of(name).is_some(), "missing factor {name}");
    }
    // the volatility factor loses one more observation than prices
    assert_eq!(returns.len(), DAYS - 2);
    assert!(returns.matrix().iter().all(|x| x.is_finite()));
}

#[test]
fn test_covariance_estimators() {
    let market = market();
    let portfolio = mixed_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let ewma = engine.covariance_matrix(CovarianceMethod::Ewma).unwrap();
    assert!(ewma.is_symmetric(1e-15));
    assert!(ewma.is_positive_semidefinite(1e-10).unwrap());

    let garch = engine.covariance_matrix(CovarianceMethod::Garch).unwrap();
    assert_eq!(garch.names(), ewma.names());
    assert!(garch.is_symmetric(1e-12));
    for name in garch.names() {
        assert!(garch.variance(name).unwrap() > 0.0, "{name}");
    }
}

// =============================================================================
// PARAMETRIC VAR
// =============================================================================

#[test]
fn test_parametric_var_monotone_in_confidence() {
    let market = market();
    let portfolio = mixed_portfolio();
    for method in [CovarianceMethod::Ewma, CovarianceMethod::Garch] {
        let engine =
            RiskEngine::new(&portfolio, &market, config().with_covariance_method(method)).unwrap();
        let vars: Vec<f64> = ConfidenceLevel::ALL
            .iter()
            .map(|c| engine.parametric_var(*c).unwrap())
            .collect();
        assert!(vars[0] > 0.0);
        assert!(vars[0] <= vars[1] && vars[1] <= vars[2], "{method:?}: {vars:?}");
    }
}

#[test]
fn test_decomposition_matches_var() {
    let market = market();
    let portfolio = mixed_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let var = engine.parametric_var(ConfidenceLevel::P95).unwrap();
    let d = engine.var_decomposition(ConfidenceLevel::P95).unwrap();

    assert_relative_eq!(d.var, var, max_relative = 1e-9);
    assert_relative_eq!(d.factors.iter().map(|f| f.percentage).sum::<f64>(), 1.0, epsilon = 1e-9);
    assert_eq!(d.positions.len(), portfolio.len());
    assert_relative_eq!(d.positions.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_position_var_uses_own_factors() {
    let market = market();
    let mixed = mixed_portfolio();
    let single = single_equity_portfolio();

    let from_mixed = RiskEngine::new(&mixed, &market, config())
        .unwrap()
        .position_parametric_var(0, ConfidenceLevel::P99)
        .unwrap();
    let alone = RiskEngine::new(&single, &market, config())
        .unwrap()
        .parametric_var(ConfidenceLevel::P99)
        .unwrap();

    // same factor, shorter aligned window in the mixed portfolio
    assert!(from_mixed > 0.0);
    assert_relative_eq!(from_mixed, alone, max_relative = 0.25);
}

// =============================================================================
// HISTORICAL VAR
// =============================================================================

#[test]
fn test_historical_estimators() {
    let market = market();
    let portfolio = mixed_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let set = engine.scenarios(40).unwrap();
    assert_eq!(set.len(), 40);
    assert!(set.flagged().is_empty());
    assert_eq!(set.scenarios().len(), 40 * portfolio.len());

    let simple = engine.historical_var(HistoricalMethod::Simple, 40, ConfidenceLevel::P95).unwrap();
    let es = engine.expected_shortfall(40, ConfidenceLevel::P95).unwrap();
    let stress = engine.stress_loss(40).unwrap();
    assert!(simple <= es + 1e-9);
    assert!(es <= stress + 1e-9);

    for method in [
        HistoricalMethod::Boudoukh { lambda: 0.94 },
        HistoricalMethod::HullWhite { lambda: 0.94 },
    ] {
        let var = engine.historical_var(method, 40, ConfidenceLevel::P99).unwrap();
        assert!(var.is_finite(), "{}", method.name());
    }

    let pot = engine
        .historical_var_result(HistoricalMethod::PeaksOverThreshold, 40, ConfidenceLevel::P90)
        .unwrap();
    let tail = pot.tail.unwrap();
    assert!(tail.exceedances >= 1);
    assert_relative_eq!(pot.expected_loss().unwrap(), pot.var + tail.scale);
}

#[test]
fn test_window_longer_than_history() {
    let market = market();
    let portfolio = single_equity_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let set = engine.scenarios(1000).unwrap();
    assert_eq!(set.len(), DAYS - 1);
    assert!(engine.scenarios(0).is_err());
}

// =============================================================================
// BACKTEST AND CONFIGURATION
// =============================================================================

#[test]
fn test_backtest_against_parametric_var() {
    let market = market();
    let portfolio = single_equity_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();

    let var = engine.parametric_var(ConfidenceLevel::P99).unwrap();
    let pnl = engine.scenarios(50).unwrap().pnl();
    let hits = violations(&pnl, &vec![var; pnl.len()]).unwrap();

    let report = engine.backtest(&hits, ConfidenceLevel::P99).unwrap();
    assert_eq!(report.observations, 50);
    assert!(report.kupiec_lr >= 0.0);
    assert!((0.0..=1.0).contains(&report.conditional_coverage_p_value));
}

#[test]
fn test_invalid_config_rejected() {
    let market = market();
    let portfolio = single_equity_portfolio();
    let result = RiskEngine::new(&portfolio, &market, RiskConfig::standard().with_ewma_lambda(1.5));
    assert!(matches!(
        result,
        Err(VerticeError::DomainRange { ref parameter, value, .. })
            if parameter == "ewma_lambda" && value == 1.5
    ));

    let config = RiskConfig::standard().with_scenario_count(0);
    let result = RiskEngine::new(&portfolio, &market, config);
    assert!(matches!(result, Err(VerticeError::Configuration { .. })));
}

#[test]
fn test_missing_series_is_reported() {
    let market = MarketData::builder()
        .br_equity("PETR4", today(), PETR4_PRICE)
        .build()
        .unwrap();
    let portfolio = single_equity_portfolio();
    let engine = RiskEngine::new(&portfolio, &market, config()).unwrap();
    assert!(matches!(
        engine.parametric_var(ConfidenceLevel::P99),
        Err(VerticeError::MissingMarketData { .. })
    ));
}
