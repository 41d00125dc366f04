//! Implied volatility by regula falsi with a bisection fallback.

use vertice_core::types::OptionKind;
use vertice_math::solvers::{bisection, regula_falsi, SolverConfig};

use super::BlackScholes;

/// Returned by [`BlackScholes::implied_vol`] when no volatility reproduces
/// the target premium.
pub const NO_SOLUTION: f64 = 9_999_999.0;

/// Default solver tolerance.
pub const DEFAULT_IMPLIED_VOL_TOLERANCE: f64 = 1e-9;

const FALSE_POSITION_BRACKET: (f64, f64) = (1.0, 100.0);
const FALSE_POSITION_ITERATIONS: u32 = 50;
const BISECTION_BRACKET: (f64, f64) = (0.001, 100.0);
const BISECTION_ITERATIONS: u32 = 1000;

/// Returns true if `vol` is the [`NO_SOLUTION`] sentinel.
#[must_use]
pub fn is_unpriceable(vol: f64) -> bool {
    vol >= NO_SOLUTION
}

impl BlackScholes {
    /// Volatility (percent) at which the model premium equals `target`.
    ///
    /// The search starts with up to 50 false-position steps on `[1, 100]`
    /// and, if those stall, bisects `[0.001, 100]` for up to 1000 steps.
    /// Non-convergence is not an error: [`NO_SOLUTION`] is returned when the
    /// target is not bracketed by the premiums at 1% and 100% or when both
    /// stages exhaust their budget.
    ///
    /// ```rust
    /// use vertice_analytics::options::BlackScholes;
    /// use vertice_core::types::OptionKind;
    ///
    /// let bs = BlackScholes::new(100.0, 100.0, 1.0, 0.0, 0.0).unwrap();
    /// let premium = bs.price(20.0, OptionKind::Call);
    /// let vol = bs.implied_vol(premium, OptionKind::Call, 1e-9);
    /// assert!((vol - 20.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn implied_vol(&self, target: f64, kind: OptionKind, tolerance: f64) -> f64 {
        let objective = |vol: f64| target - self.price(vol, kind);

        let (lo, hi) = FALSE_POSITION_BRACKET;
        if objective(lo) * objective(hi) > 0.0 {
            return NO_SOLUTION;
        }

        let config = SolverConfig::new(tolerance, FALSE_POSITION_ITERATIONS);
        if let Ok(result) = regula_falsi(objective, lo, hi, &config) {
            return result.root;
        }

        let (lo, hi) = BISECTION_BRACKET;
        let config = SolverConfig::new(tolerance, BISECTION_ITERATIONS);
        bisection(objective, lo, hi, &config).map_or(NO_SOLUTION, |result| result.root)
    }
}
