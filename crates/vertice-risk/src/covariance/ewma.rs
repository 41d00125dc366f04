//! EWMA covariance.

use tracing::debug;

use vertice_core::VerticeResult;
use vertice_math::linear_algebra::sample_covariance_matrix;
use vertice_math::statistics::check_lambda;

use super::CovarianceMatrix;
use crate::factors::RiskFactorReturns;

/// EWMA covariance of the factor returns.
///
/// Seeded with the full-sample covariance (`n - 1` denominator), then
/// `Σ = λΣ + (1-λ) r rᵀ` for every row, oldest first.
pub fn ewma_covariance(returns: &RiskFactorReturns, lambda: f64) -> VerticeResult<CovarianceMatrix> {
    check_lambda(lambda)?;
    let data = returns.matrix();
    let mut sigma = sample_covariance_matrix(data)?;

    for row in data.row_iter() {
        let r = row.transpose();
        sigma = sigma * lambda + (&r * r.transpose()) * (1.0 - lambda);
    }

    debug!(factors = returns.factor_count(), rows = returns.len(), lambda, "EWMA covariance");
    CovarianceMatrix::new(returns.names().to_vec(), sigma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vertice_core::types::{Date, Locale};
    use vertice_math::statistics::ewma_variance;
    use vertice_portfolio::RiskFactor;

    fn returns() -> RiskFactorReturns {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let a = [0.010, -0.020, 0.015, 0.003, -0.007, 0.012];
        let b = [0.004, -0.010, 0.009, -0.002, -0.001, 0.006];
        let dated = |xs: &[f64]| {
            xs.iter()
                .enumerate()
                .map(|(i, x)| (start.add_days(i as i64), *x))
                .collect::<Vec<_>>()
        };
        RiskFactorReturns::from_series(vec![
            (RiskFactor::equity("PETR4", Locale::Br), dated(&a)),
            (RiskFactor::usdbrl(), dated(&b)),
        ])
        .unwrap()
    }

    #[test]
    fn test_diagonal_matches_univariate_recursion() {
        let returns = returns();
        let cov = ewma_covariance(&returns, 0.94).unwrap();
        let path = ewma_variance(&returns.column("PETR4").unwrap(), 0.94).unwrap();

        assert_relative_eq!(cov.variance("PETR4").unwrap(), path[path.len() - 1], epsilon = 1e-15);
        assert!(cov.is_symmetric(1e-18));
        assert!(cov.is_positive_semidefinite(1e-12).unwrap());
    }

    #[test]
    fn test_invalid_lambda() {
        assert!(matches!(
            ewma_covariance(&returns(), 1.5),
            Err(vertice_core::VerticeError::DomainRange { value, .. }) if value == 1.5
        ));
    }
}
