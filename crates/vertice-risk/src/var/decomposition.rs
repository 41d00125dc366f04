//! Marginal, component and percentage VaR.

use serde::Serialize;

use vertice_core::types::ConfidenceLevel;
use vertice_core::{VerticeError, VerticeResult};
use vertice_portfolio::ExposureVector;

use super::parametric::aligned_weights;
use crate::covariance::CovarianceMatrix;

/// One factor's share of portfolio VaR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    /// Factor name.
    pub factor: String,
    /// Portfolio exposure to the factor.
    pub exposure: f64,
    /// `|z / σp| · (Σw)_i`.
    pub marginal: f64,
    /// `marginal · w_i`.
    pub component: f64,
    /// `component / Σ component`.
    pub percentage: f64,
}

/// VaR decomposed by factor and by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecomposition {
    /// Confidence of the decomposition.
    pub confidence: ConfidenceLevel,
    /// Portfolio VaR (`Σ component`).
    pub var: f64,
    /// Portfolio standard deviation `√(wᵀΣw)`.
    pub portfolio_sigma: f64,
    /// Per factor, in covariance order.
    pub factors: Vec<FactorContribution>,
    /// Percentage contribution of each position, in portfolio order.
    pub positions: Vec<f64>,
}

impl VarDecomposition {
    /// Decomposes the VaR of `portfolio` (the summed exposure) across the
    /// factors of `covariance` and across `positions` (the per-position
    /// exposures that sum to it).
    ///
    /// A position's share is `Σ_i (w_{p,i} / w_i) · pct_i` over the
    /// factors with non-zero portfolio exposure.
    ///
    /// # Errors
    ///
    /// `DomainRange` if the portfolio variance is zero; `Configuration` if
    /// an exposure factor has no covariance entry.
    pub fn compute(
        portfolio: &ExposureVector,
        positions: &[ExposureVector],
        covariance: &CovarianceMatrix,
        confidence: ConfidenceLevel,
    ) -> VerticeResult<Self> {
        let w = aligned_weights(portfolio, covariance)?;
        let sigma_w = covariance.matrix() * &w;
        let variance = w.dot(&sigma_w);
        if variance <= 0.0 || !variance.is_finite() {
            return Err(VerticeError::domain_range(
                "portfolio_variance",
                variance,
                "VaR decomposition needs a positive portfolio variance",
            ));
        }
        let sigma = variance.sqrt();
        let scale = (confidence.z() / sigma).abs();

        let marginal: Vec<f64> = sigma_w.iter().map(|s| scale * s).collect();
        let component: Vec<f64> = marginal.iter().zip(w.iter()).map(|(m, x)| m * x).collect();
        let total: f64 = component.iter().sum();

        let factors: Vec<FactorContribution> = covariance
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| FactorContribution {
                factor: name.clone(),
                exposure: w[i],
                marginal: marginal[i],
                component: component[i],
                percentage: component[i] / total,
            })
            .collect();

        let positions = positions
            .iter()
            .map(|exposure| {
                let own = exposure.aligned_to(covariance.names())?;
                Ok(factors
                    .iter()
                    .zip(own)
                    .filter(|(f, _)| f.exposure != 0.0)
                    .map(|(f, wp)| wp / f.exposure * f.percentage)
                    .sum())
            })
            .collect::<VerticeResult<Vec<f64>>>()?;

        Ok(Self {
            confidence,
            var: total,
            portfolio_sigma: sigma,
            factors,
            positions,
        })
    }

    /// Contribution of the factor called `name`.
    pub fn factor(&self, name: &str) -> Option<&FactorContribution> {
        self.factors.iter().find(|f| f.factor == name)
    }
}
