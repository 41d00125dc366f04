//! Property-based tests for the statistics and linear-algebra helpers.

use nalgebra::DMatrix;
use proptest::prelude::*;

use vertice_math::linear_algebra::{
    correlation_from_covariance, is_positive_semidefinite, is_symmetric, sample_covariance_matrix,
};
use vertice_math::statistics::{ewma_variance, linear_quantile};

proptest! {
    #[test]
    fn quantile_stays_within_sample(
        values in prop::collection::vec(-1e4f64..1e4, 1..100),
        p in 0.0f64..=1.0,
    ) {
        let q = linear_quantile(&values, p).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(q >= min - 1e-9 && q <= max + 1e-9);
    }

    #[test]
    fn quantile_is_monotone(
        values in prop::collection::vec(-1e4f64..1e4, 2..100),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let q_lo = linear_quantile(&values, lo).unwrap();
        let q_hi = linear_quantile(&values, hi).unwrap();
        prop_assert!(q_lo <= q_hi + 1e-9);
    }

    #[test]
    fn ewma_variance_is_positive(
        returns in prop::collection::vec(-0.1f64..0.1, 2..200),
        lambda in 0.5f64..0.99,
    ) {
        prop_assume!(returns.iter().any(|r| (r - returns[0]).abs() > 1e-12));
        let path = ewma_variance(&returns, lambda).unwrap();
        prop_assert_eq!(path.len(), returns.len());
        prop_assert!(path.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn sample_covariance_is_symmetric_psd(values in prop::collection::vec(-0.05f64..0.05, 30)) {
        let data = DMatrix::from_row_slice(10, 3, &values);
        let cov = sample_covariance_matrix(&data).unwrap();
        prop_assert!(is_symmetric(&cov, 1e-15));
        prop_assert!(is_positive_semidefinite(&cov, 1e-9).unwrap());
        if cov.diagonal().iter().all(|v| *v > 1e-12) {
            let corr = correlation_from_covariance(&cov).unwrap();
            prop_assert!(corr.iter().all(|c| c.abs() <= 1.0 + 1e-9));
        }
    }
}
