//! Matrix products and scalar scaling.

use log::debug;

use super::matrix::Matrix;
use crate::backend::BackendKind;
use crate::error::AdError;
use crate::real::Real;

/// Product of two `f64` matrices on the default backend.
///
/// # Example
///
/// ```
/// use agrad::{Matrix, multiply};
///
/// let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
/// let c = multiply(&a, &Matrix::identity(2)).unwrap();
/// assert_eq!(c, a);
/// ```
pub fn multiply(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, AdError> {
    multiply_with(BackendKind::default(), a, b)
}

/// Product of two `f64` matrices on the given backend.
///
/// An operand with zero rows or columns yields a zero matrix of shape
/// `a.rows() x b.cols()` and the backend is not called.
///
/// # Errors
///
/// - [`AdError::SizeMismatch`] if `a.cols() != b.rows()`.
/// - [`AdError::Backend`] if the backend fails.
pub fn multiply_with(
    kind: BackendKind,
    a: &Matrix<f64>,
    b: &Matrix<f64>,
) -> Result<Matrix<f64>, AdError> {
    if a.cols() != b.rows() {
        return Err(AdError::size_mismatch("multiply", a.cols(), b.rows()));
    }
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::zeros(m, n);
    if a.is_empty() || b.is_empty() {
        debug!("multiply: empty operand ({m}x{k} * {k}x{n}), backend skipped");
        return Ok(c);
    }
    kind.matmul(a.data(), b.data(), c.data_mut(), m, k, n)
        .map_err(|source| AdError::Backend {
            op: "multiply",
            source,
        })?;
    Ok(c)
}

/// Product of two matrices over any [`Real`] type by inner products.
///
/// For tape handles each output entry is recorded as one node.
///
/// # Errors
///
/// - [`AdError::SizeMismatch`] if `a.cols() != b.rows()`.
/// - [`AdError::EmptyArgument`] if the inner dimension is zero and the
///   result is non-empty, since `T` has no zero of its own.
pub fn multiply_generic<T: Real>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, AdError> {
    if a.cols() != b.rows() {
        return Err(AdError::size_mismatch("multiply", a.cols(), b.rows()));
    }
    let (m, n) = (a.rows(), b.cols());
    let rows: Vec<Vec<T>> = (0..m).map(|i| a.row(i)).collect();
    let mut data = Vec::with_capacity(m * n);
    for j in 0..n {
        for row in &rows {
            let entry =
                T::dot_of(row, b.column(j)).ok_or(AdError::EmptyArgument { op: "multiply" })?;
            data.push(entry);
        }
    }
    Matrix::from_vec(data, m, n)
}

/// Multiply every entry by `s`.
pub fn scale<T: Real>(a: &Matrix<T>, s: f64) -> Matrix<T> {
    a.map(|&x| x * s)
}
