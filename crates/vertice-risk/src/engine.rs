//! Portfolio risk engine.
//!
//! [`RiskEngine`] ties a portfolio and a market snapshot to a
//! [`RiskConfig`] and exposes every risk figure of the library through one
//! handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use vertice_risk::RiskEngine;
//!
//! let engine = RiskEngine::new(&portfolio, &market, RiskConfig::standard())?;
//! let var = engine.parametric_var(ConfidenceLevel::P99)?;
//! let stress = engine.stress_loss(252)?;
//! ```

use tracing::{info, warn};

use vertice_config::{CovarianceMethod, HistoricalMethod, RiskConfig, Validate};
use vertice_core::market::MarketData;
use vertice_core::types::ConfidenceLevel;
use vertice_core::{VerticeError, VerticeResult};
use vertice_portfolio::{ExposureEngine, ExposureVector, Portfolio};

use crate::backtest::{backtest, BacktestResult};
use crate::covariance::{ewma_covariance, garch_covariance, CovarianceMatrix};
use crate::factors::{RiskFactorReturns, SeriesSettings};
use crate::var::{
    expected_shortfall, historical_var, parametric_var, stress_loss, HistoricalVarResult,
    ScenarioGenerator, ScenarioSet, VarDecomposition,
};

/// Risk calculations for one portfolio on one market snapshot.
#[derive(Debug, Clone)]
pub struct RiskEngine<'a> {
    portfolio: &'a Portfolio,
    market: &'a MarketData,
    config: RiskConfig,
}

impl<'a> RiskEngine<'a> {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// `Configuration` if `config` fails validation.
    pub fn new(
        portfolio: &'a Portfolio,
        market: &'a MarketData,
        config: RiskConfig,
    ) -> VerticeResult<Self> {
        config.validate_or_error()?;
        info!(
            portfolio = portfolio.name(),
            positions = portfolio.len(),
            reference_date = %portfolio.reference_date(),
            config = %config.name,
            "risk engine ready"
        );
        Ok(Self {
            portfolio,
            market,
            config,
        })
    }

    /// Settings of this engine.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// The portfolio under analysis.
    pub fn portfolio(&self) -> &'a Portfolio {
        self.portfolio
    }

    /// Exposure engine configured from the risk settings.
    pub fn exposure_engine(&self) -> ExposureEngine<'a> {
        ExposureEngine::new(self.market, self.portfolio.reference_date())
            .with_ewma_lambda(self.config.ewma_lambda)
            .with_implied_vol_tolerance(self.config.implied_vol_tolerance)
    }

    /// Summed factor exposures of the portfolio.
    pub fn portfolio_exposure(&self) -> VerticeResult<ExposureVector> {
        self.exposure_engine().portfolio_exposure(self.portfolio)
    }

    /// Factor exposures of the position at `index`.
    pub fn position_exposure(&self, index: usize) -> VerticeResult<ExposureVector> {
        let position = self.portfolio.position(index)?;
        self.exposure_engine().position_exposure(position)
    }

    fn series_settings(&self) -> SeriesSettings {
        SeriesSettings {
            ewma_lambda: self.config.ewma_lambda,
            trading_days_per_year: self.config.trading_days_per_year,
        }
    }

    /// Aligned variations of every portfolio factor.
    pub fn factor_returns(&self) -> VerticeResult<RiskFactorReturns> {
        RiskFactorReturns::for_portfolio(self.portfolio, self.market, self.series_settings())
    }

    /// Factor covariance estimated with `method`.
    pub fn covariance_matrix(&self, method: CovarianceMethod) -> VerticeResult<CovarianceMatrix> {
        let returns = self.factor_returns()?;
        match method {
            CovarianceMethod::Ewma => ewma_covariance(&returns, self.config.ewma_lambda),
            CovarianceMethod::Garch => garch_covariance(&returns, self.config.garch_max_iterations),
        }
    }

    /// Parametric VaR of the portfolio with the configured covariance.
    pub fn parametric_var(&self, confidence: ConfidenceLevel) -> VerticeResult<f64> {
        let exposure = self.portfolio_exposure()?;
        let covariance = self.covariance_matrix(self.config.covariance_method)?;
        let var = parametric_var(&exposure, &covariance, confidence)?;
        info!(
            method = ?self.config.covariance_method,
            confidence = %confidence,
            var,
            "parametric VaR"
        );
        Ok(var)
    }

    /// Stand-alone parametric VaR of one position, on the covariance of
    /// its own factors.
    pub fn position_parametric_var(
        &self,
        index: usize,
        confidence: ConfidenceLevel,
    ) -> VerticeResult<f64> {
        let exposure = self.position_exposure(index)?;
        let covariance = self
            .covariance_matrix(self.config.covariance_method)?
            .slice(&exposure.names())?;
        parametric_var(&exposure, &covariance, confidence)
    }

    /// Factor and position decomposition of parametric VaR.
    pub fn var_decomposition(&self, confidence: ConfidenceLevel) -> VerticeResult<VarDecomposition> {
        let engine = self.exposure_engine();
        let positions = self
            .portfolio
            .positions()
            .iter()
            .map(|p| engine.position_exposure(p))
            .collect::<VerticeResult<Vec<_>>>()?;
        let mut total = ExposureVector::new();
        for exposure in &positions {
            total.merge(exposure.clone());
        }
        let covariance = self.covariance_matrix(self.config.covariance_method)?;
        VarDecomposition::compute(&total, &positions, &covariance, confidence)
    }

    /// P&L scenarios over the `n` most recent factor dates.
    ///
    /// # Errors
    ///
    /// `InsufficientData` when `n` is zero.
    pub fn scenarios(&self, n: usize) -> VerticeResult<ScenarioSet> {
        if n == 0 {
            return Err(VerticeError::insufficient_data("historical scenarios", 1, 0));
        }
        let returns = self.factor_returns()?.tail(n);
        if returns.len() < n {
            warn!(requested = n, available = returns.len(), "short scenario window");
        }
        ScenarioGenerator::new(
            self.market,
            self.exposure_engine(),
            self.portfolio.reference_date(),
        )
        .generate(self.portfolio, &returns)
    }

    /// Historical VaR with its estimator details.
    pub fn historical_var_result(
        &self,
        method: HistoricalMethod,
        n: usize,
        confidence: ConfidenceLevel,
    ) -> VerticeResult<HistoricalVarResult> {
        let pnl = self.scenarios(n)?.pnl();
        let result = historical_var(&pnl, method, confidence)?;
        info!(
            method = method.name(),
            scenarios = result.scenarios,
            confidence = %confidence,
            var = result.var,
            "historical VaR"
        );
        Ok(result)
    }

    /// Historical VaR over the `n` most recent scenarios.
    pub fn historical_var(
        &self,
        method: HistoricalMethod,
        n: usize,
        confidence: ConfidenceLevel,
    ) -> VerticeResult<f64> {
        Ok(self.historical_var_result(method, n, confidence)?.var)
    }

    /// Mean scenario loss beyond simple historical VaR.
    pub fn expected_shortfall(&self, n: usize, confidence: ConfidenceLevel) -> VerticeResult<f64> {
        expected_shortfall(&self.scenarios(n)?.pnl(), confidence)
    }

    /// Worst scenario loss over the `n` most recent dates.
    pub fn stress_loss(&self, n: usize) -> VerticeResult<f64> {
        let loss = stress_loss(&self.scenarios(n)?.pnl())?;
        info!(scenarios = n, loss, "stress loss");
        Ok(loss)
    }

    /// Kupiec and Christoffersen tests of a violation sequence.
    pub fn backtest(
        &self,
        violations: &[bool],
        confidence: ConfidenceLevel,
    ) -> VerticeResult<BacktestResult> {
        backtest(violations, confidence)
    }
}
