//! Factor covariance matrices.
//!
//! - [`ewma_covariance`]: sample-seeded EWMA recursion
//! - [`garch_covariance`]: GARCH(1,1) volatilities with the sample
//!   correlation

mod ewma;
mod garch;

pub use ewma::ewma_covariance;
pub use garch::{fit_garch, garch_covariance, GarchFit, GarchParameters};

use nalgebra::DMatrix;

use vertice_core::{VerticeError, VerticeResult};
use vertice_math::linear_algebra;

/// A covariance matrix indexed by factor name.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    names: Vec<String>,
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Wraps a square matrix.
    ///
    /// # Errors
    ///
    /// `Configuration` if the matrix is not square or its size differs
    /// from the number of names.
    pub fn new(names: Vec<String>, matrix: DMatrix<f64>) -> VerticeResult<Self> {
        if !matrix.is_square() || matrix.nrows() != names.len() {
            return Err(VerticeError::configuration(format!(
                "covariance of {} factors has shape {:?}",
                names.len(),
                matrix.shape()
            )));
        }
        Ok(Self { names, matrix })
    }

    /// Factor names in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true for a 0 × 0 matrix.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the matrix.
    pub fn index_of(&self, name: &str) -> VerticeResult<usize> {
        self.names.iter().position(|n| n == name).ok_or_else(|| {
            VerticeError::configuration(format!("factor '{name}' is not in the covariance matrix"))
        })
    }

    /// Covariance of two factors.
    pub fn get(&self, a: &str, b: &str) -> VerticeResult<f64> {
        Ok(self.matrix[(self.index_of(a)?, self.index_of(b)?)])
    }

    /// Variance of one factor.
    pub fn variance(&self, name: &str) -> VerticeResult<f64> {
        self.get(name, name)
    }

    /// Sub-matrix of `names`, in that order.
    pub fn slice(&self, names: &[String]) -> VerticeResult<Self> {
        let idx = names
            .iter()
            .map(|n| self.index_of(n))
            .collect::<VerticeResult<Vec<_>>>()?;
        let matrix = DMatrix::from_fn(idx.len(), idx.len(), |i, j| self.matrix[(idx[i], idx[j])]);
        Self::new(names.to_vec(), matrix)
    }

    /// Returns true if the matrix is symmetric within `tolerance`.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        linear_algebra::is_symmetric(&self.matrix, tolerance)
    }

    /// Returns true if no eigenvalue is below `-tolerance` (relative to
    /// the largest entry).
    pub fn is_positive_semidefinite(&self, tolerance: f64) -> VerticeResult<bool> {
        Ok(linear_algebra::is_positive_semidefinite(&self.matrix, tolerance)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CovarianceMatrix {
        CovarianceMatrix::new(
            vec!["A".into(), "B".into(), "C".into()],
            DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 9.0, 2.0, 0.5, 2.0, 16.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let cov = sample();
        assert_eq!(cov.get("A", "C").unwrap(), 0.5);
        assert_eq!(cov.variance("B").unwrap(), 9.0);
        assert!(cov.variance("D").is_err());
        assert!(cov.is_symmetric(0.0));
    }

    #[test]
    fn test_slice_reorders() {
        let sub = sample().slice(&["C".into(), "A".into()]).unwrap();
        assert_eq!(sub.names(), &["C".to_string(), "A".to_string()]);
        assert_eq!(sub.matrix()[(0, 0)], 16.0);
        assert_eq!(sub.matrix()[(0, 1)], 0.5);
        assert_eq!(sub.matrix()[(1, 1)], 4.0);
    }

    #[test]
    fn test_shape_checked() {
        let result = CovarianceMatrix::new(vec!["A".into()], DMatrix::zeros(2, 2));
        assert!(result.is_err());
    }
}
