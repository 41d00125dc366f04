//! Linear algebra utilities for covariance matrices.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Computes `wᵀ Σ w`.
pub fn quadratic_form(weights: &DVector<f64>, matrix: &DMatrix<f64>) -> MathResult<f64> {
    check_square(matrix)?;
    if weights.len() != matrix.nrows() {
        return Err(MathError::dimension_mismatch(
            (weights.len(), 1),
            matrix.shape(),
        ));
    }
    Ok(weights.dot(&(matrix * weights)))
}

/// Sample covariance of the columns of `data` (rows are observations,
/// `n - 1` denominator).
pub fn sample_covariance_matrix(data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = data.nrows();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }
    let means = data.row_mean();
    let centered = DMatrix::from_fn(n, data.ncols(), |i, j| data[(i, j)] - means[j]);
    Ok(centered.transpose() * &centered / (n as f64 - 1.0))
}

/// Converts a covariance matrix to a correlation matrix.
///
/// Factors with zero variance get a unit diagonal and zero off-diagonal
/// correlation.
pub fn correlation_from_covariance(cov: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    check_square(cov)?;
    let std: Vec<f64> = cov.diagonal().iter().map(|v| v.max(0.0).sqrt()).collect();
    let n = cov.nrows();
    Ok(DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            1.0
        } else if std[i] > 0.0 && std[j] > 0.0 {
            cov[(i, j)] / (std[i] * std[j])
        } else {
            0.0
        }
    }))
}

/// Builds `D C D` from volatilities `d` and a correlation matrix `C`.
pub fn scale_correlation(vols: &[f64], corr: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    check_square(corr)?;
    if vols.len() != corr.nrows() {
        return Err(MathError::dimension_mismatch((vols.len(), 1), corr.shape()));
    }
    let d = DMatrix::from_diagonal(&DVector::from_column_slice(vols));
    Ok(&d * corr * &d)
}

/// Returns true if `|m[i,j] - m[j,i]| <= tolerance` for all entries.
#[must_use]
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    matrix.is_square()
        && (0..matrix.nrows()).all(|i| {
            (0..i).all(|j| (matrix[(i, j)] - matrix[(j, i)]).abs() <= tolerance)
        })
}

/// Smallest eigenvalue of a symmetric matrix.
pub fn min_eigenvalue(matrix: &DMatrix<f64>) -> MathResult<f64> {
    check_square(matrix)?;
    if matrix.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    let eigen = matrix.clone().symmetric_eigen();
    Ok(eigen.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Positive semidefiniteness test with a relative tolerance on the
/// smallest eigenvalue.
pub fn is_positive_semidefinite(matrix: &DMatrix<f64>, tolerance: f64) -> MathResult<bool> {
    let scale = matrix.amax().max(1.0);
    Ok(min_eigenvalue(matrix)? >= -tolerance * scale)
}

fn check_square(matrix: &DMatrix<f64>) -> MathResult<()> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(MathError::dimension_mismatch(matrix.shape(), matrix.shape()))
    }
}
