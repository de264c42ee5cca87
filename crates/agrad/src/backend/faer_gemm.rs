//! GEMM backend using faer.

use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par};

use super::MatmulBackend;
use crate::error::BackendError;

/// Matrix product through faer's GEMM.
///
/// Operands are viewed in place; faer and this crate share column-major
/// layout, so no copy is made.
pub struct FaerBackend;

impl MatmulBackend for FaerBackend {
    fn name(&self) -> &'static str {
        "faer"
    }

    fn matmul(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        m: usize,
        k: usize,
        n: usize,
    ) -> Result<(), BackendError> {
        let a_mat = MatRef::from_column_major_slice(a, m, k);
        let b_mat = MatRef::from_column_major_slice(b, k, n);
        let c_mat = MatMut::from_column_major_slice_mut(c, m, n);
        matmul(c_mat, Accum::Replace, a_mat, b_mat, 1.0, Par::Seq);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenericBackend;
    use approx::assert_relative_eq;

    #[test]
    fn test_faer_matches_generic() {
        let (m, k, n) = (5, 7, 3);
        let a: Vec<f64> = (0..m * k).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i as f64 * 0.11).cos()).collect();

        let mut expected = vec![0.0; m * n];
        GenericBackend.matmul(&a, &b, &mut expected, m, k, n).unwrap();
        let mut actual = vec![0.0; m * n];
        FaerBackend.matmul(&a, &b, &mut actual, m, k, n).unwrap();

        for (x, y) in actual.iter().zip(&expected) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }
}
