//! Inner products and sums over slices of any [`Real`] type.
//!
//! Column vectors and row vectors are both plain slices here; a
//! [`Matrix`](super::Matrix) hands out either through
//! [`column`](super::Matrix::column) and [`row`](super::Matrix::row).
//!
//! For tape handles these dispatch to [`Real::dot_of`] and [`Real::sum_of`],
//! which record the whole reduction as a single node.

use crate::error::AdError;
use crate::real::Real;

/// Inner product of two equal-length slices.
///
/// # Errors
///
/// - [`AdError::SizeMismatch`] if the lengths differ.
/// - [`AdError::EmptyArgument`] if both are empty.
///
/// # Example
///
/// ```
/// use agrad::dot_product;
///
/// let v = [1.0, 6.0];
/// assert_eq!(dot_product(&v, &v).unwrap(), 37.0);
/// assert!(dot_product(&v, &[1.0]).is_err());
/// ```
pub fn dot_product<T: Real>(a: &[T], b: &[T]) -> Result<T, AdError> {
    if a.len() != b.len() {
        return Err(AdError::size_mismatch("dot_product", a.len(), b.len()));
    }
    T::dot_of(a, b).ok_or(AdError::EmptyArgument { op: "dot_product" })
}

/// Sum of squares, `dot_product(a, a)`.
pub fn dot_self<T: Real>(a: &[T]) -> Result<T, AdError> {
    T::dot_of(a, a).ok_or(AdError::EmptyArgument { op: "dot_self" })
}

/// Sum of all elements.
pub fn sum<T: Real>(a: &[T]) -> Result<T, AdError> {
    T::sum_of(a).ok_or(AdError::EmptyArgument { op: "sum" })
}
