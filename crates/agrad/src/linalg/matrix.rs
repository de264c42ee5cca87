//! Column-major dense matrix over any element type.

use std::ops::{Index, IndexMut};

use crate::error::AdError;
use crate::scalar::Scalar;

/// A dense matrix stored in column-major order.
///
/// The element type is unconstrained, so the same container holds plain
/// values, [`Dual`](crate::Dual) numbers or tape handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Create a matrix from column-major data.
    ///
    /// # Errors
    ///
    /// Returns `AdError::SizeMismatch` if `data.len() != rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use agrad::Matrix;
    ///
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m[(1, 0)], 2.0); // Column-major: (1, 0) is the second element
    /// assert_eq!(m[(0, 1)], 3.0);
    /// ```
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self, AdError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(AdError::size_mismatch("Matrix::from_vec", expected, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix by evaluating `f(i, j)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the matrix has zero rows or zero columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column-major data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Entry `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            self.data.get(i + j * self.rows)
        } else {
            None
        }
    }

    /// Column `j` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    pub fn column(&self, j: usize) -> &[T] {
        assert!(j < self.cols, "column {j} out of bounds for {} columns", self.cols);
        &self.data[j * self.rows..(j + 1) * self.rows]
    }

    /// Apply `f` to every entry.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// Row `i`, copied out (rows are strided in column-major storage).
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> Vec<T> {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        (0..self.cols).map(|j| self.data[i + j * self.rows]).collect()
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)])
    }
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i + j * self.rows]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i + j * self.rows]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_length() {
        let err = Matrix::from_vec(vec![1.0; 5], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            AdError::SizeMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
        assert!(Matrix::<f64>::from_vec(vec![], 0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_column_major_layout() {
        let m = Matrix::from_fn(2, 3, |i, j| (10 * i + j) as f64);
        assert_eq!(m.data(), &[0.0, 10.0, 1.0, 11.0, 2.0, 12.0]);
        assert_eq!(m.column(2), &[2.0, 12.0]);
        assert_eq!(m.row(1), vec![10.0, 11.0, 12.0]);
        assert_eq!(m.get(1, 2), Some(&12.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], t[(j, i)]);
            }
        }
    }

    #[test]
    fn test_identity_and_index_mut() {
        let mut m: Matrix<f64> = Matrix::identity(3);
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(0, 1)], 0.0);
        m[(0, 1)] = 7.0;
        assert_eq!(m.data()[3], 7.0);
    }

    #[test]
    fn test_map_changes_element_type() {
        let m = Matrix::from_fn(2, 2, |i, j| i + j);
        let f = m.map(|&x| x as f64 * 0.5);
        assert_eq!(f.data(), &[0.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds() {
        let m: Matrix<f64> = Matrix::zeros(2, 2);
        let _ = m[(2, 0)];
    }
}
