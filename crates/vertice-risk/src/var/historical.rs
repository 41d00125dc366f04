//! Historical VaR estimators.
//!
//! All functions take portfolio P&L oldest first and report losses as
//! positive numbers.

use serde::Serialize;
use tracing::debug;

use vertice_config::HistoricalMethod;
use vertice_core::types::ConfidenceLevel;
use vertice_core::{VerticeError, VerticeResult};
use vertice_math::statistics::{check_lambda, ewma_variance, linear_quantile, sample_std_dev};

/// Shape of the peaks-over-threshold tail.
pub const POT_SHAPE: f64 = 1.0;

/// Tail parameters of a peaks-over-threshold fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailFit {
    /// Threshold loss (the simple VaR).
    pub threshold: f64,
    /// Mean of the smallest and largest exceedance over the threshold.
    pub scale: f64,
    /// Fixed shape.
    pub shape: f64,
    /// Losses strictly above the threshold.
    pub exceedances: usize,
}

/// Output of a historical estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalVarResult {
    /// Estimator used.
    pub method: HistoricalMethod,
    /// Confidence level.
    pub confidence: ConfidenceLevel,
    /// VaR as a positive loss.
    pub var: f64,
    /// Number of P&L scenarios.
    pub scenarios: usize,
    /// Tail fit, for peaks over threshold only.
    pub tail: Option<TailFit>,
}

impl HistoricalVarResult {
    /// Expected loss beyond VaR under the fitted tail, `VaR + scale`.
    ///
    /// # Errors
    ///
    /// `Configuration` unless this is a peaks-over-threshold result.
    pub fn expected_loss(&self) -> VerticeResult<f64> {
        self.tail.map(|t| self.var + t.scale).ok_or_else(|| {
            VerticeError::configuration(format!(
                "expected loss needs a peaks-over-threshold fit, not '{}'",
                self.method.name()
            ))
        })
    }
}

fn require(pnl: &[f64], context: &str) -> VerticeResult<()> {
    if pnl.is_empty() {
        Err(VerticeError::insufficient_data(context, 1, 0))
    } else {
        Ok(())
    }
}

/// Loss at the linear-interpolated `1 - confidence` quantile of P&L.
pub fn simple_var(pnl: &[f64], confidence: ConfidenceLevel) -> VerticeResult<f64> {
    require(pnl, "simple historical VaR")?;
    Ok(-linear_quantile(pnl, confidence.tail())?)
}

/// Age weights `(1-λ)λ^i / Σ`, index 0 being the newest scenario.
///
/// ```rust
/// use vertice_risk::var::boudoukh_weights;
///
/// let w = boudoukh_weights(10, 0.94).unwrap();
/// assert!(w[0] > w[1]);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn boudoukh_weights(n: usize, lambda: f64) -> VerticeResult<Vec<f64>> {
    check_lambda(lambda)?;
    // (1-λ) cancels in the normalization; λ^i alone stays defined at λ = 1
    let raw: Vec<f64> = (0..n).scan(1.0, |w, _| {
        let current = *w;
        *w *= lambda;
        Some(current)
    })
    .collect();
    let total: f64 = raw.iter().sum();
    Ok(raw.into_iter().map(|w| w / total).collect())
}

/// Age-weighted VaR: P&L sorted ascending with its age weight, the loss at
/// the first scenario whose cumulative weight reaches `1 - confidence`.
pub fn boudoukh_var(pnl: &[f64], lambda: f64, confidence: ConfidenceLevel) -> VerticeResult<f64> {
    require(pnl, "Boudoukh VaR")?;
    let weights = boudoukh_weights(pnl.len(), lambda)?;
    let mut weighted: Vec<(f64, f64)> = pnl
        .iter()
        .rev()
        .zip(weights)
        .map(|(p, w)| (*p, w))
        .collect();
    weighted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let target = confidence.tail();
    let mut cumulative = 0.0;
    for (value, weight) in &weighted {
        cumulative += weight;
        if cumulative >= target {
            return Ok(-value);
        }
    }
    Ok(-weighted[weighted.len() - 1].0)
}

/// Peaks-over-threshold fit on the losses beyond the simple VaR.
///
/// ```text
/// VaR = u + (scale / shape) · ((c · n_u)^(-shape) - 1)
/// ```
///
/// # Errors
///
/// `InsufficientData` when no loss exceeds the threshold.
pub fn peaks_over_threshold(
    pnl: &[f64],
    confidence: ConfidenceLevel,
) -> VerticeResult<(f64, TailFit)> {
    let threshold = simple_var(pnl, confidence)?;
    let exceedances: Vec<f64> = pnl
        .iter()
        .map(|p| -p - threshold)
        .filter(|e| *e > 0.0)
        .collect();
    if exceedances.is_empty() {
        return Err(VerticeError::insufficient_data(
            "peaks-over-threshold tail",
            1,
            0,
        ));
    }
    let smallest = exceedances.iter().copied().fold(f64::INFINITY, f64::min);
    let largest = exceedances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tail = TailFit {
        threshold,
        scale: (smallest + largest) / 2.0,
        shape: POT_SHAPE,
        exceedances: exceedances.len(),
    };
    let n_u = exceedances.len() as f64;
    let var = threshold
        + tail.scale / tail.shape * ((confidence.probability() * n_u).powf(-tail.shape) - 1.0);
    Ok((var, tail))
}

/// Volatility-scaled VaR: P&L divided by its EWMA volatility path, the
/// simple VaR of the scaled series times the sample standard deviation.
///
/// # Errors
///
/// `InsufficientData` for fewer than two scenarios; `Numerical` if the
/// EWMA path hits zero variance.
pub fn hull_white_var(pnl: &[f64], lambda: f64, confidence: ConfidenceLevel) -> VerticeResult<f64> {
    if pnl.len() < 2 {
        return Err(VerticeError::insufficient_data("Hull-White VaR", 2, pnl.len()));
    }
    let path = ewma_variance(pnl, lambda)?;
    if path.iter().any(|v| *v <= 0.0) {
        return Err(VerticeError::numerical("Hull-White VaR on a zero-variance P&L path"));
    }
    let scaled: Vec<f64> = pnl.iter().zip(&path).map(|(p, v)| p / v.sqrt()).collect();
    let quantile = linear_quantile(&scaled, confidence.tail())?;
    Ok(-quantile * sample_std_dev(pnl)?)
}

/// Mean loss at or beyond the simple VaR.
pub fn expected_shortfall(pnl: &[f64], confidence: ConfidenceLevel) -> VerticeResult<f64> {
    let var = simple_var(pnl, confidence)?;
    let tail: Vec<f64> = pnl.iter().map(|p| -p).filter(|l| *l >= var).collect();
    if tail.is_empty() {
        return Ok(var);
    }
    Ok(tail.iter().sum::<f64>() / tail.len() as f64)
}

/// Absolute value of the worst P&L.
pub fn stress_loss(pnl: &[f64]) -> VerticeResult<f64> {
    require(pnl, "stress loss")?;
    Ok(pnl.iter().copied().fold(f64::INFINITY, f64::min).abs())
}

/// Runs `method` on `pnl`.
pub fn historical_var(
    pnl: &[f64],
    method: HistoricalMethod,
    confidence: ConfidenceLevel,
) -> VerticeResult<HistoricalVarResult> {
    let (var, tail) = match method {
        HistoricalMethod::Simple => (simple_var(pnl, confidence)?, None),
        HistoricalMethod::Boudoukh { lambda } => (boudoukh_var(pnl, lambda, confidence)?, None),
        HistoricalMethod::PeaksOverThreshold => {
            let (var, tail) = peaks_over_threshold(pnl, confidence)?;
            (var, Some(tail))
        }
        HistoricalMethod::HullWhite { lambda } => (hull_white_var(pnl, lambda, confidence)?, None),
    };
    debug!(method = method.name(), scenarios = pnl.len(), var, "historical VaR");
    Ok(HistoricalVarResult {
        method,
        confidence,
        var,
        scenarios: pnl.len(),
        tail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Ten scenarios, oldest first.
    const PNL: [f64; 10] = [
        120.0, -340.0, 55.0, -80.0, 410.0, -15.0, -600.0, 230.0, -45.0, 90.0,
    ];

    #[test]
    fn test_simple_var_interpolates() {
        // sorted: -600 -340 -80 -45 -15 55 90 120 230 410; rank 0.45
        let var = simple_var(&PNL, ConfidenceLevel::P95).unwrap();
        assert_relative_eq!(var, 600.0 - 0.45 * 260.0, epsilon = 1e-9);
    }

    #[test]
    fn test_boudoukh_weights_favor_recent() {
        let w = boudoukh_weights(10, 0.94).unwrap();
        assert!(w.windows(2).all(|p| p[0] > p[1]));
        assert!(w[0] > 0.1);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_boudoukh_var_picks_weighted_point() {
        // -600 is three days old, weight ~0.108 >= 0.10
        let var = boudoukh_var(&PNL, 0.94, ConfidenceLevel::P90).unwrap();
        assert_relative_eq!(var, 600.0);
        // an old worst loss loses its weight
        let mut pnl = PNL;
        pnl.swap(0, 6);
        let var = boudoukh_var(&pnl, 0.5, ConfidenceLevel::P90).unwrap();
        assert!(var < 600.0);
    }

    #[test]
    fn test_peaks_over_threshold() {
        let result =
            historical_var(&PNL, HistoricalMethod::PeaksOverThreshold, ConfidenceLevel::P90)
                .unwrap();
        let tail = result.tail.unwrap();
        // threshold 600 - 0.9 · 260 = 366, one exceedance of 234
        assert_relative_eq!(tail.threshold, 366.0, epsilon = 1e-9);
        assert_eq!(tail.exceedances, 1);
        assert_relative_eq!(tail.scale, 234.0, epsilon = 1e-9);
        let expected = 366.0 + 234.0 * (1.0 / 0.9 - 1.0);
        assert_relative_eq!(result.var, expected, epsilon = 1e-9);
        assert_relative_eq!(result.expected_loss().unwrap(), expected + 234.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expected_loss_needs_tail() {
        let result = historical_var(&PNL, HistoricalMethod::Simple, ConfidenceLevel::P95).unwrap();
        assert!(matches!(
            result.expected_loss(),
            Err(VerticeError::Configuration { .. })
        ));
    }

    #[test]
    fn test_hull_white_scales_back() {
        let var = hull_white_var(&PNL, 0.94, ConfidenceLevel::P95).unwrap();
        assert!(var > 0.0);
        let doubled: Vec<f64> = PNL.iter().map(|p| 2.0 * p).collect();
        let var2 = hull_white_var(&doubled, 0.94, ConfidenceLevel::P95).unwrap();
        assert_relative_eq!(var2, 2.0 * var, epsilon = 1e-9);
    }

    #[test]
    fn test_shortfall_and_stress() {
        let var = simple_var(&PNL, ConfidenceLevel::P90).unwrap();
        let es = expected_shortfall(&PNL, ConfidenceLevel::P90).unwrap();
        assert!(es >= var);
        assert_relative_eq!(es, 600.0);
        assert_relative_eq!(stress_loss(&PNL).unwrap(), 600.0);
    }

    #[test]
    fn test_empty_pnl() {
        assert!(matches!(
            simple_var(&[], ConfidenceLevel::P99),
            Err(VerticeError::InsufficientData { .. })
        ));
        assert!(stress_loss(&[]).is_err());
    }
}
