//! VaR backtests.
//!
//! Kupiec unconditional coverage, Christoffersen independence, and the
//! joint conditional-coverage statistic `LR_cc = LR_uc + LR_ind`.
//! Degenerate samples (no violations, only violations, an empty transition
//! bucket) give a zero statistic instead of `ln 0`.

use serde::Serialize;
use tracing::debug;

use vertice_core::types::ConfidenceLevel;
use vertice_core::{VerticeError, VerticeResult};
use vertice_math::statistics::chi_squared_sf;

/// Likelihood-ratio statistics of a violation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacktestResult {
    /// Confidence of the VaR being tested.
    pub confidence: ConfidenceLevel,
    /// Number of observations.
    pub observations: usize,
    /// Number of violations.
    pub violations: usize,
    /// Kupiec unconditional coverage statistic.
    pub kupiec_lr: f64,
    /// Chi-squared (df 1) p-value of [`kupiec_lr`](Self::kupiec_lr).
    pub kupiec_p_value: f64,
    /// Christoffersen independence statistic.
    pub christoffersen_lr: f64,
    /// Chi-squared (df 1) p-value of
    /// [`christoffersen_lr`](Self::christoffersen_lr).
    pub christoffersen_p_value: f64,
    /// Conditional coverage, `kupiec_lr + christoffersen_lr`.
    pub conditional_coverage_lr: f64,
    /// Chi-squared (df 2) p-value of
    /// [`conditional_coverage_lr`](Self::conditional_coverage_lr).
    pub conditional_coverage_p_value: f64,
}

impl BacktestResult {
    /// Observed violation rate.
    pub fn violation_rate(&self) -> f64 {
        self.violations as f64 / self.observations as f64
    }

    /// Whether both tests pass at `significance`.
    pub fn passes(&self, significance: f64) -> bool {
        self.kupiec_p_value > significance && self.christoffersen_p_value > significance
    }
}

/// `n · ln(p)`, zero when `n` is zero.
fn xlny(n: usize, p: f64) -> f64 {
    if n == 0 {
        0.0
    } else {
        n as f64 * p.ln()
    }
}

/// Kupiec proportion-of-failures statistic.
pub fn kupiec_lr(observations: usize, violations: usize, confidence: ConfidenceLevel) -> f64 {
    if violations == 0 || violations >= observations {
        return 0.0;
    }
    let p = confidence.tail();
    let pi = violations as f64 / observations as f64;
    let hits = observations - violations;
    let ln_l0 = xlny(hits, 1.0 - p) + xlny(violations, p);
    let ln_l1 = xlny(hits, 1.0 - pi) + xlny(violations, pi);
    (2.0 * (ln_l1 - ln_l0)).max(0.0)
}

/// Christoffersen independence statistic from the day-to-day transitions.
pub fn christoffersen_lr(violations: &[bool]) -> f64 {
    let (mut n00, mut n01, mut n10, mut n11) = (0usize, 0usize, 0usize, 0usize);
    for pair in violations.windows(2) {
        match (pair[0], pair[1]) {
            (false, false) => n00 += 1,
            (false, true) => n01 += 1,
            (true, false) => n10 += 1,
            (true, true) => n11 += 1,
        }
    }
    if n00 + n01 == 0 || n10 + n11 == 0 {
        return 0.0;
    }

    let pi0 = n01 as f64 / (n00 + n01) as f64;
    let pi1 = n11 as f64 / (n10 + n11) as f64;
    let pi = (n01 + n11) as f64 / (n00 + n01 + n10 + n11) as f64;

    let ln_restricted = xlny(n00 + n10, 1.0 - pi) + xlny(n01 + n11, pi);
    let ln_unrestricted =
        xlny(n00, 1.0 - pi0) + xlny(n01, pi0) + xlny(n10, 1.0 - pi1) + xlny(n11, pi1);
    (2.0 * (ln_unrestricted - ln_restricted)).max(0.0)
}

/// Backtests a VaR model from its violation sequence (`true` when the
/// realized loss exceeded VaR), oldest first.
///
/// # Errors
///
/// `InsufficientData` for an empty sequence.
pub fn backtest(violations: &[bool], confidence: ConfidenceLevel) -> VerticeResult<BacktestResult> {
    if violations.is_empty() {
        return Err(VerticeError::insufficient_data("VaR backtest", 1, 0));
    }
    let observations = violations.len();
    let hits = violations.iter().filter(|v| **v).count();

    let kupiec = kupiec_lr(observations, hits, confidence);
    let independence = christoffersen_lr(violations);
    let joint = kupiec + independence;

    let result = BacktestResult {
        confidence,
        observations,
        violations: hits,
        kupiec_lr: kupiec,
        kupiec_p_value: chi_squared_sf(kupiec, 1.0)?,
        christoffersen_lr: independence,
        christoffersen_p_value: chi_squared_sf(independence, 1.0)?,
        conditional_coverage_lr: joint,
        conditional_coverage_p_value: chi_squared_sf(joint, 2.0)?,
    };
    debug!(
        observations,
        violations = hits,
        kupiec = kupiec,
        independence = independence,
        "VaR backtest"
    );
    Ok(result)
}

/// Violation sequence of realized P&L against VaR forecasts (positive
/// losses): `true` when `-pnl > var`.
///
/// # Errors
///
/// `Configuration` when the two series differ in length.
pub fn violations(pnl: &[f64], var: &[f64]) -> VerticeResult<Vec<bool>> {
    if pnl.len() != var.len() {
        return Err(VerticeError::configuration(format!(
            "{} P&L observations against {} VaR forecasts",
            pnl.len(),
            var.len()
        )));
    }
    Ok(pnl.iter().zip(var).map(|(p, v)| -p > *v).collect())
}
