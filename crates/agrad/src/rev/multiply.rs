//! Matrix product of tape handles through the accelerated primitive.

use log::debug;

use super::tape::Tape;
use super::var::Var;
use crate::backend::BackendKind;
use crate::error::AdError;
use crate::linalg::{self, Matrix};

impl Tape<f64> {
    /// Product of two matrices of handles on the default backend.
    ///
    /// See [`multiply_with`](Tape::multiply_with).
    pub fn multiply<'t>(
        &'t self,
        a: &Matrix<Var<'t>>,
        b: &Matrix<Var<'t>>,
    ) -> Result<Matrix<Var<'t>>, AdError> {
        self.multiply_with(BackendKind::default(), a, b)
    }

    /// Product of two matrices of handles.
    ///
    /// Values are computed by the backend. Each output entry `c[i, j]` is
    /// recorded as one node with `2k` edges: towards `a[i, l]` with partial
    /// `b[l, j]` and towards `b[l, j]` with partial `a[i, l]`.
    ///
    /// # Errors
    ///
    /// - [`AdError::SizeMismatch`] if `a.cols() != b.rows()`.
    /// - [`AdError::ForeignVariable`] if an entry belongs to another tape.
    /// - [`AdError::Backend`] if the backend fails.
    pub fn multiply_with<'t>(
        &'t self,
        kind: BackendKind,
        a: &Matrix<Var<'t>>,
        b: &Matrix<Var<'t>>,
    ) -> Result<Matrix<Var<'t>>, AdError> {
        if a.cols() != b.rows() {
            return Err(AdError::size_mismatch("multiply", a.cols(), b.rows()));
        }
        for v in a.data().iter().chain(b.data()) {
            self.check_owned("multiply", v)?;
        }

        let a_val = a.map(Var::value);
        let b_val = b.map(Var::value);
        let c_val = linalg::multiply_with(kind, &a_val, &b_val)?;

        let (m, k, n) = (a.rows(), a.cols(), b.cols());
        debug!("recording {m}x{n} product nodes with {} edges each", 2 * k);
        let mut out = Vec::with_capacity(m * n);
        for j in 0..n {
            for i in 0..m {
                let edges = (0..k).flat_map(|l| {
                    [
                        (a[(i, l)].index, b_val[(l, j)]),
                        (b[(l, j)].index, a_val[(i, l)]),
                    ]
                });
                out.push(self.push(c_val[(i, j)], edges));
            }
        }
        Matrix::from_vec(out, m, n)
    }
}
