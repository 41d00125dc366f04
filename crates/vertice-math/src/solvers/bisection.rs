//! Interval halving, the last resort of the implied-volatility search.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Halves `[a, b]` until `f` changes sign inside a band narrower than the
/// tolerance.
///
/// The option pricer falls back to this once false position stalls on a
/// flat premium curve: the bracket is widened to volatilities of
/// `[0.001, 100]` percent and the iteration budget raised to 1000. A root
/// sitting on either end is returned with zero iterations.
///
/// # Errors
///
/// [`MathError::InvalidBracket`] when `f(a)` and `f(b)` share a sign, and
/// [`MathError::ConvergenceFailed`] once `config.max_iterations` halvings
/// have not settled.
///
/// # Example
///
/// ```rust
/// use vertice_math::solvers::{bisection, SolverConfig};
///
/// // premium gap of a toy pricer linear in vol, solved at 25%
/// let gap = |vol: f64| 0.4 * vol - 10.0;
/// let config = SolverConfig::new(1e-9, 1000);
/// let result = bisection(gap, 0.001, 100.0, &config).unwrap();
/// assert!((result.root - 25.0).abs() < 1e-6);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = (lo + hi) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
