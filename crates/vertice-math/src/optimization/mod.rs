//! Optimization algorithms.
//!
//! Derivative-free minimization used for maximum-likelihood fits such as
//! GARCH(1,1). Parameters are kept inside a box by clamping every trial
//! point; infeasible regions inside the box are handled by the objective
//! (typically by returning a large penalty).

mod nelder_mead;

pub use nelder_mead::nelder_mead;

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Tolerance on both the simplex value spread and its diameter.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Initial simplex step as a fraction of each box width.
    pub initial_step: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 2000,
            initial_step: 0.05,
        }
    }
}

impl OptimizationConfig {
    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Box constraints `lower <= x <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates box constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length or any lower bound
    /// exceeds its upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> MathResult<Self> {
        if lower.len() != upper.len() {
            return Err(MathError::dimension_mismatch(
                (lower.len(), 1),
                (upper.len(), 1),
            ));
        }
        if lower.iter().zip(&upper).any(|(l, u)| !(l <= u)) {
            return Err(MathError::invalid_input("lower bound exceeds upper bound"));
        }
        Ok(Self { lower, upper })
    }

    /// Number of parameters.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Projects a point onto the box.
    #[must_use]
    pub fn clamp(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(v, (l, u))| v.clamp(*l, *u))
            .collect()
    }

    /// Width of the box along dimension `i`.
    #[must_use]
    pub fn width(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }
}
