//! Straight-line interpolation between curve vertices.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Piecewise-linear curve through `(x, y)` vertices.
///
/// The DI curve builds one of these per historical date, from the two
/// quoted vertices that bracket a target tenor in business days, and reads
/// the rate at that tenor. Queries outside the vertices are rejected unless
/// [`with_extrapolation`](Self::with_extrapolation) was called.
///
/// # Example
///
/// ```rust
/// use vertice_math::interpolation::{Interpolator, LinearInterpolator};
///
/// // DI vertices at 21 and 63 business days
/// let interp = LinearInterpolator::new(vec![21.0, 63.0], vec![14.0, 14.6]).unwrap();
/// let rate = interp.interpolate(42.0).unwrap();
/// assert!((rate - 14.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Curve through the vertices `xs` (tenors) with values `ys` (rates).
    ///
    /// # Errors
    ///
    /// [`MathError::InsufficientData`] below two vertices and
    /// [`MathError::InvalidInput`] when the lengths differ or the tenors are
    /// not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Extends the end segments past the first and last vertex.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    // index of the segment holding x, clamped to the end segments
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        match self.xs.binary_search_by(|probe| probe.total_cmp(&x)) {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let i = self.find_segment(x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
