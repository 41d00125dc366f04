//! Delta-normal VaR.

use nalgebra::DVector;

use vertice_core::types::ConfidenceLevel;
use vertice_core::VerticeResult;
use vertice_math::linear_algebra::quadratic_form;
use vertice_portfolio::ExposureVector;

use crate::covariance::CovarianceMatrix;

/// Exposures aligned to the covariance order.
pub(crate) fn aligned_weights(
    exposure: &ExposureVector,
    covariance: &CovarianceMatrix,
) -> VerticeResult<DVector<f64>> {
    Ok(DVector::from_vec(exposure.aligned_to(covariance.names())?))
}

/// `z · √(wᵀΣw)`.
///
/// Covariance factors without exposure contribute nothing.
///
/// # Errors
///
/// `Configuration` if an exposure factor has no covariance entry.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use vertice_core::types::{ConfidenceLevel, Locale};
/// use vertice_portfolio::{ExposureVector, RiskFactor};
/// use vertice_risk::covariance::CovarianceMatrix;
/// use vertice_risk::var::parametric_var;
///
/// let mut exposure = ExposureVector::new();
/// exposure.add(RiskFactor::equity("PETR4", Locale::Br), 50_000.0);
/// let cov = CovarianceMatrix::new(vec!["PETR4".into()], DMatrix::from_element(1, 1, 0.0004)).unwrap();
///
/// let var = parametric_var(&exposure, &cov, ConfidenceLevel::P99).unwrap();
/// assert!((var - 2.3263 * 50_000.0 * 0.02).abs() < 1e-9);
/// ```
pub fn parametric_var(
    exposure: &ExposureVector,
    covariance: &CovarianceMatrix,
    confidence: ConfidenceLevel,
) -> VerticeResult<f64> {
    let w = aligned_weights(exposure, covariance)?;
    let variance = quadratic_form(&w, covariance.matrix())?;
    Ok(confidence.z() * variance.max(0.0).sqrt())
}
