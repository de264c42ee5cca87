//! Matrix-multiply backends for the accelerated product primitive.
//!
//! # Backends
//!
//! - `GenericBackend`: Naive triple loop (always available)
//! - `FaerBackend`: faer GEMM (cargo feature `faer`, on by default)
//! - `TiledBackend`: emulation of a thread-block device kernel that pads
//!   operands to whole tiles
//!
//! Backends only see non-empty `f64` operands in column-major order; shape
//! checks and the empty-operand shortcut live in
//! [`multiply_with`](crate::multiply_with).

#[cfg(feature = "faer")]
mod faer_gemm;
mod generic;
mod tiled;

#[cfg(feature = "faer")]
pub use faer_gemm::FaerBackend;
pub use generic::GenericBackend;
pub use tiled::{THREAD_BLOCK_SIZE, TiledBackend, WORK_PER_THREAD};

use log::debug;

use crate::error::BackendError;

/// Backend trait for dense `f64` matrix products.
pub trait MatmulBackend {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Overwrite `c` (m x n) with `a` (m x k) times `b` (k x n).
    ///
    /// All buffers are column-major and exactly sized; `m`, `k` and `n` are
    /// non-zero.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the backend cannot run the product.
    fn matmul(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        m: usize,
        k: usize,
        n: usize,
    ) -> Result<(), BackendError>;
}

/// Selects the backend a product is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Generic,
    /// Fails with [`BackendError::Unsupported`] when built without `faer`.
    Faer,
    Tiled {
        block_size: usize,
        work_per_thread: usize,
    },
}

impl BackendKind {
    /// Tiled backend with the default kernel options.
    pub fn tiled() -> Self {
        Self::Tiled {
            block_size: THREAD_BLOCK_SIZE,
            work_per_thread: WORK_PER_THREAD,
        }
    }

    pub(crate) fn matmul(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        m: usize,
        k: usize,
        n: usize,
    ) -> Result<(), BackendError> {
        match *self {
            Self::Generic => run(&GenericBackend, a, b, c, (m, k, n)),
            #[cfg(feature = "faer")]
            Self::Faer => run(&FaerBackend, a, b, c, (m, k, n)),
            #[cfg(not(feature = "faer"))]
            Self::Faer => Err(BackendError::Unsupported { name: "faer" }),
            Self::Tiled {
                block_size,
                work_per_thread,
            } => run(
                &TiledBackend::new(block_size, work_per_thread),
                a,
                b,
                c,
                (m, k, n),
            ),
        }
    }
}

impl Default for BackendKind {
    #[cfg(feature = "faer")]
    fn default() -> Self {
        Self::Faer
    }

    #[cfg(not(feature = "faer"))]
    fn default() -> Self {
        Self::Generic
    }
}

fn run(
    backend: &impl MatmulBackend,
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    (m, k, n): (usize, usize, usize),
) -> Result<(), BackendError> {
    debug!("matmul {m}x{k} * {k}x{n} on {}", backend.name());
    backend.matmul(a, b, c, m, k, n)
}
