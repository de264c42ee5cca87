//! Generic (naive loop-based) backend implementation.

use super::MatmulBackend;
use crate::error::BackendError;

/// Naive triple-loop matrix product.
///
/// Always available; the reference the other backends are tested against.
pub struct GenericBackend;

impl MatmulBackend for GenericBackend {
    fn name(&self) -> &'static str {
        "generic"
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
        for j in 0..n {
            for i in 0..m {
                let mut acc = 0.0;
                for l in 0..k {
                    acc += a[i + l * m] * b[l + j * k];
                }
                c[i + j * m] = acc;
            }
        }
        Ok(())
    }
}
