//! Error types for mathematical operations.

use thiserror::Error;
use vertice_core::VerticeError;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iterative algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Matrix dimensions are incompatible.
    #[error("Incompatible dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// Interpolation point is outside the valid range.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Minimum valid value.
        min: f64,
        /// Maximum valid value.
        max: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// A parameter lies outside the domain of the routine.
    #[error("{parameter} = {value} is out of domain: {reason}")]
    OutOfDomain {
        /// Parameter name.
        parameter: String,
        /// Offending value.
        value: f64,
        /// The valid domain.
        reason: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an out-of-domain error.
    #[must_use]
    pub fn out_of_domain(
        parameter: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::OutOfDomain {
            parameter: parameter.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            rows1: lhs.0,
            cols1: lhs.1,
            rows2: rhs.0,
            cols2: rhs.1,
        }
    }
}

impl From<MathError> for VerticeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ExtrapolationNotAllowed { x, min, max } => VerticeError::domain_range(
                "x",
                x,
                format!("outside the observed range [{min}, {max}]"),
            ),
            MathError::OutOfDomain {
                parameter,
                value,
                reason,
            } => VerticeError::domain_range(parameter, value, reason),
            MathError::InsufficientData { required, actual } => {
                VerticeError::insufficient_data("numerical routine", required, actual)
            }
            other => VerticeError::numerical(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_conversion_to_core_error() {
        let err: VerticeError = MathError::ExtrapolationNotAllowed {
            x: 3000.0,
            min: 21.0,
            max: 2520.0,
        }
        .into();
        assert!(matches!(err, VerticeError::DomainRange { .. }));

        let err: VerticeError = MathError::out_of_domain("lambda", 1.5, "in [0, 1]").into();
        assert!(matches!(
            err,
            VerticeError::DomainRange { ref parameter, value, .. }
                if parameter == "lambda" && value == 1.5
        ));

        let err: VerticeError = MathError::invalid_input("bad").into();
        assert!(matches!(err, VerticeError::Numerical { .. }));
    }
}
