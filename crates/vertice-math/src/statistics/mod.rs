//! Descriptive statistics, EWMA recursions and distribution helpers.

use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with the `n - 1` denominator.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    sample_covariance(values, values)
}

/// Sample standard deviation with the `n - 1` denominator.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Sample covariance of two equally long series (`n - 1` denominator).
pub fn sample_covariance(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::dimension_mismatch((a.len(), 1), (b.len(), 1)));
    }
    if a.len() < 2 {
        return Err(MathError::insufficient_data(2, a.len()));
    }
    let (ma, mb) = (mean(a)?, mean(b)?);
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    Ok(sum / (a.len() as f64 - 1.0))
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// Uses rank `p * (n - 1)` on the ascending sample, the same convention as
/// the default quantile of most numerical packages.
///
/// # Example
///
/// ```rust
/// use vertice_math::statistics::linear_quantile;
///
/// let q = linear_quantile(&[4.0, 1.0, 3.0, 2.0, 5.0], 0.1).unwrap();
/// assert!((q - 1.4).abs() < 1e-12);
/// ```
pub fn linear_quantile(values: &[f64], p: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::out_of_domain("quantile probability", p, "must lie in [0, 1]"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    if sorted.len() == 1 {
        return Ok(sorted[0]);
    }

    let rank = p * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        Ok(sorted[lo])
    } else {
        let w = rank - lo as f64;
        Ok(sorted[lo] + w * (sorted[hi] - sorted[lo]))
    }
}

/// Simple returns `v[t] / v[t-1] - 1` of a price series.
///
/// The output is one element shorter than the input.
#[must_use]
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Day-over-day differences `v[t] - v[t-1]`.
#[must_use]
pub fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// EWMA variance path of a return series.
///
/// `var[t] = λ·var[t-1] + (1-λ)·r[t]²`, with `var[-1]` seeded by the
/// full-sample variance. The output has one entry per input return.
pub fn ewma_variance(returns: &[f64], lambda: f64) -> MathResult<Vec<f64>> {
    check_lambda(lambda)?;
    let seed = sample_variance(returns)?;

    let mut path = Vec::with_capacity(returns.len());
    let mut var = seed;
    for r in returns {
        var = lambda * var + (1.0 - lambda) * r * r;
        path.push(var);
    }
    Ok(path)
}

/// Latest EWMA volatility of a return series (square root of the last
/// [`ewma_variance`] value).
pub fn ewma_volatility(returns: &[f64], lambda: f64) -> MathResult<f64> {
    ewma_variance(returns, lambda)?
        .last()
        .map(|v| v.sqrt())
        .ok_or_else(|| MathError::insufficient_data(2, returns.len()))
}

/// Validates an EWMA decay factor.
pub fn check_lambda(lambda: f64) -> MathResult<()> {
    if (0.0..=1.0).contains(&lambda) {
        Ok(())
    } else {
        Err(MathError::out_of_domain("lambda", lambda, "decay factor must lie in [0, 1]"))
    }
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal density.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Upper-tail probability `P(X > x)` of a chi-squared variable.
pub fn chi_squared_sf(x: f64, degrees_of_freedom: f64) -> MathResult<f64> {
    let chi = ChiSquared::new(degrees_of_freedom)
        .map_err(|e| MathError::invalid_input(format!("chi-squared: {e}")))?;
    Ok(1.0 - chi.cdf(x.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&xs).unwrap(), 2.5);
        assert_relative_eq!(sample_variance(&xs).unwrap(), 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            sample_covariance(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap(),
            10.0 / 3.0,
            epsilon = 1e-12
        );
        assert!(sample_variance(&[1.0]).is_err());
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_linear_quantile() {
        let xs = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_relative_eq!(linear_quantile(&xs, 0.0).unwrap(), 10.0);
        assert_relative_eq!(linear_quantile(&xs, 0.5).unwrap(), 30.0);
        assert_relative_eq!(linear_quantile(&xs, 0.01).unwrap(), 10.4, epsilon = 1e-12);
        assert_relative_eq!(linear_quantile(&xs, 1.0).unwrap(), 50.0);
        assert!(matches!(
            linear_quantile(&xs, 1.5),
            Err(MathError::OutOfDomain { value, .. }) if value == 1.5
        ));
        assert!(matches!(check_lambda(-0.1), Err(MathError::OutOfDomain { .. })));
    }

    #[test]
    fn test_ewma_variance_recursion() {
        let r = [0.01, -0.02, 0.015];
        let lambda = 0.94;
        let seed = sample_variance(&r).unwrap();
        let path = ewma_variance(&r, lambda).unwrap();

        let v0 = lambda * seed + (1.0 - lambda) * 0.01_f64.powi(2);
        let v1 = lambda * v0 + (1.0 - lambda) * 0.02_f64.powi(2);
        assert_relative_eq!(path[0], v0, epsilon = 1e-15);
        assert_relative_eq!(path[1], v1, epsilon = 1e-15);
        assert_relative_eq!(
            ewma_volatility(&r, lambda).unwrap(),
            path[2].sqrt(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_returns_and_differences() {
        let prices = [100.0, 110.0, 99.0];
        let r = simple_returns(&prices);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(r[1], -0.1, epsilon = 1e-12);
        assert_eq!(differences(&prices), vec![10.0, -11.0]);
        assert!(simple_returns(&[1.0]).is_empty());
    }

    #[test]
    fn test_lambda_domain() {
        assert!(ewma_variance(&[0.1, 0.2], 1.2).is_err());
        assert!(ewma_variance(&[0.1, 0.2], -0.1).is_err());
        // λ = 1 keeps the seed forever
        let path = ewma_variance(&[0.1, 0.2], 1.0).unwrap();
        assert_relative_eq!(path[1], sample_variance(&[0.1, 0.2]).unwrap());
    }

    #[test]
    fn test_distributions() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(normal_cdf(2.3263), 0.99, epsilon = 1e-5);
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_relative_eq!(chi_squared_sf(3.841_458_820_694_124, 1.0).unwrap(), 0.05, epsilon = 1e-9);
        assert_relative_eq!(chi_squared_sf(0.0, 2.0).unwrap(), 1.0);
    }
}
