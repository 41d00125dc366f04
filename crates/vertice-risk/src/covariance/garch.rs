//! GARCH(1,1) covariance.
//!
//! Each factor is fitted on its standardized series:
//!
//! ```text
//! ε[t]  = (r[t] - mean) / std
//! σ²[t] = ω + α ε²[t-1] + β σ²[t-1],   σ²[0] = 1
//! ```
//!
//! by minimizing the Gaussian negative log-likelihood with Nelder-Mead
//! inside `ω ∈ [1e-6, 10]`, `α, β ∈ [0, 1]`; `α + β ≥ 1` is penalized. The
//! latest conditional volatility, rescaled by the sample standard
//! deviation, becomes the factor's diagonal entry in `Σ = D C D`.

use tracing::{debug, warn};

use vertice_core::{VerticeError, VerticeResult};
use vertice_math::linear_algebra::{
    correlation_from_covariance, sample_covariance_matrix, scale_correlation,
};
use vertice_math::optimization::{nelder_mead, Bounds, OptimizationConfig};
use vertice_math::statistics::{mean, sample_std_dev};

use super::CovarianceMatrix;
use crate::factors::RiskFactorReturns;

const PENALTY: f64 = 1e10;
const MAX_PERSISTENCE: f64 = 0.9999;

/// GARCH(1,1) parameters of a standardized series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchParameters {
    /// Constant.
    pub omega: f64,
    /// ARCH coefficient.
    pub alpha: f64,
    /// GARCH coefficient.
    pub beta: f64,
}

impl GarchParameters {
    /// `α + β`.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    fn variance_path(&self, eps: &[f64]) -> Vec<f64> {
        let mut path = Vec::with_capacity(eps.len());
        let mut var = 1.0;
        for (t, _) in eps.iter().enumerate() {
            if t > 0 {
                var = self.omega + self.alpha * eps[t - 1] * eps[t - 1] + self.beta * var;
            }
            path.push(var);
        }
        path
    }

    fn negative_log_likelihood(&self, eps: &[f64]) -> f64 {
        if self.persistence() >= MAX_PERSISTENCE || self.omega <= 0.0 {
            return PENALTY;
        }
        let nll: f64 = self
            .variance_path(eps)
            .iter()
            .zip(eps)
            .map(|(v, e)| 0.5 * (v.ln() + e * e / v))
            .sum();
        if nll.is_finite() {
            nll
        } else {
            PENALTY
        }
    }
}

/// A fitted GARCH(1,1) model.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchFit {
    /// Parameters on the standardized scale.
    pub parameters: GarchParameters,
    /// Sample standard deviation used to standardize.
    pub scale: f64,
    /// Conditional variances in the input units, one per observation.
    pub conditional_variance: Vec<f64>,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
    /// Optimizer iterations.
    pub iterations: u32,
}

impl GarchFit {
    /// Latest conditional volatility in the input units.
    pub fn latest_volatility(&self) -> f64 {
        self.conditional_variance.last().map_or(0.0, |v| v.sqrt())
    }
}

/// Fits a GARCH(1,1) model to one return series.
///
/// # Errors
///
/// `InsufficientData` for fewer than three observations; `Numerical` for a
/// constant series or an optimizer failure.
pub fn fit_garch(returns: &[f64], max_iterations: u32) -> VerticeResult<GarchFit> {
    if returns.len() < 3 {
        return Err(VerticeError::insufficient_data("GARCH(1,1) fit", 3, returns.len()));
    }
    let mu = mean(returns)?;
    let scale = sample_std_dev(returns)?;
    if scale <= 0.0 {
        return Err(VerticeError::numerical("GARCH(1,1) on a constant series"));
    }
    let eps: Vec<f64> = returns.iter().map(|r| (r - mu) / scale).collect();

    let bounds = Bounds::new(vec![1e-6, 0.0, 0.0], vec![10.0, 1.0, 1.0])?;
    let config = OptimizationConfig::default().with_max_iterations(max_iterations);
    let objective = |p: &[f64]| {
        GarchParameters {
            omega: p[0],
            alpha: p[1],
            beta: p[2],
        }
        .negative_log_likelihood(&eps)
    };
    let result = nelder_mead(objective, &[0.05, 0.05, 0.90], &bounds, &config)?;

    let parameters = GarchParameters {
        omega: result.parameters[0],
        alpha: result.parameters[1],
        beta: result.parameters[2],
    };
    let conditional_variance = parameters
        .variance_path(&eps)
        .into_iter()
        .map(|v| v * scale * scale)
        .collect();

    Ok(GarchFit {
        parameters,
        scale,
        conditional_variance,
        converged: result.converged,
        iterations: result.iterations,
    })
}

/// GARCH(1,1) covariance: latest conditional volatilities on the diagonal
/// scaled into the sample correlation.
///
/// With the `parallel` feature the per-factor fits run on the rayon pool;
/// factor order is preserved either way.
pub fn garch_covariance(
    returns: &RiskFactorReturns,
    max_iterations: u32,
) -> VerticeResult<CovarianceMatrix> {
    let columns: Vec<(String, Vec<f64>)> = returns
        .names()
        .iter()
        .map(|name| Ok((name.clone(), returns.column(name)?)))
        .collect::<VerticeResult<_>>()?;

    let fit = |(name, series): &(String, Vec<f64>)| -> VerticeResult<f64> {
        let fit = fit_garch(series, max_iterations)?;
        if fit.converged {
            debug!(
                factor = %name,
                omega = fit.parameters.omega,
                alpha = fit.parameters.alpha,
                beta = fit.parameters.beta,
                "GARCH(1,1) fitted"
            );
        } else {
            warn!(
                factor = %name,
                iterations = fit.iterations,
                "GARCH(1,1) fit hit its iteration cap"
            );
        }
        Ok(fit.latest_volatility())
    };

    #[cfg(feature = "parallel")]
    let vols: Vec<VerticeResult<f64>> = {
        use rayon::prelude::*;
        columns.par_iter().map(fit).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let vols: Vec<VerticeResult<f64>> = columns.iter().map(fit).collect();

    let vols = vols.into_iter().collect::<VerticeResult<Vec<f64>>>()?;
    let correlation = correlation_from_covariance(&sample_covariance_matrix(returns.matrix())?)?;
    CovarianceMatrix::new(returns.names().to_vec(), scale_correlation(&vols, &correlation)?)
}
