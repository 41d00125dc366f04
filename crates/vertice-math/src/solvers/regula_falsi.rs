//! Regula falsi (false position) root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// False-position root finder.
///
/// Each step splits the bracket at the point weighted by the magnitudes of
/// the endpoint residuals:
///
/// ```text
/// x = a + (b - a) * |f(a)| / (|f(a)| + |f(b)|)
/// ```
///
/// Converges on an exact zero or when the bracket is narrower than the
/// tolerance; the returned root is then the bracket midpoint. One endpoint
/// can stay fixed for many steps on convex functions, so callers usually
/// pair this with a bisection fallback.
///
/// # Example
///
/// ```rust
/// use vertice_math::solvers::{regula_falsi, SolverConfig};
///
/// let f = |x: f64| 10.0 - x;
/// let result = regula_falsi(f, 1.0, 100.0, &SolverConfig::new(1e-9, 50)).unwrap();
/// assert!((result.root - 10.0).abs() < 1e-9);
/// ```
pub fn regula_falsi<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a;
    let mut hi = b;
    let mut f_lo = f(lo);
    let mut f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let denom = f_lo.abs() + f_hi.abs();
        if denom == 0.0 {
            return Ok(SolverResult {
                root: lo,
                iterations: iteration,
                residual: 0.0,
            });
        }

        let mid = lo + (hi - lo) * f_lo.abs() / denom;
        let f_mid = f(mid);

        if f_mid == 0.0 {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: 0.0,
            });
        }

        if f_mid * f_lo > 0.0 {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
            f_hi = f_mid;
        }

        if (hi - lo).abs() < config.tolerance {
            let root = (lo + hi) / 2.0;
            return Ok(SolverResult {
                root,
                iterations: iteration + 1,
                residual: f(root),
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        (hi - lo).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_function_is_exact() {
        let f = |x: f64| 2.0 * x - 3.0;
        let result = regula_falsi(f, 0.0, 10.0, &SolverConfig::new(1e-12, 50)).unwrap();
        assert_relative_eq!(result.root, 1.5, epsilon = 1e-12);
        assert!(result.iterations <= 2);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;
        assert!(regula_falsi(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_stalls_on_convex_function() {
        // One endpoint never moves, so the bracket width does not shrink
        // below the tolerance within a small iteration budget.
        let f = |x: f64| x.exp() - 2.0;
        let result = regula_falsi(f, 0.0, 10.0, &SolverConfig::new(1e-9, 50));
        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
