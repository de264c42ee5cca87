//! Tiled backend emulating a thread-block device kernel.
//!
//! The device kernel works on square tiles of `block_size` and never checks
//! bounds, so the host pads every operand with zeros up to a whole number of
//! tiles, launches on the padded operands and copies the top-left block of
//! the result back out. Each work item of a `block_size x block_size / wpt`
//! work group accumulates `wpt` entries of its output tile, strided by the
//! work group's column count.

use log::{debug, trace};

use super::MatmulBackend;
use crate::error::BackendError;

/// Default tile edge of the device kernel.
pub const THREAD_BLOCK_SIZE: usize = 32;

/// Default number of output entries per work item.
pub const WORK_PER_THREAD: usize = 8;

/// Padded, tiled matrix product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiledBackend {
    block_size: usize,
    work_per_thread: usize,
}

impl TiledBackend {
    /// Create a backend with the given kernel options.
    ///
    /// Options are validated when a product is launched.
    pub fn new(block_size: usize, work_per_thread: usize) -> Self {
        Self {
            block_size,
            work_per_thread,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn work_per_thread(&self) -> usize {
        self.work_per_thread
    }

    fn validate(&self) -> Result<(), BackendError> {
        let (bs, wpt) = (self.block_size, self.work_per_thread);
        if bs == 0 || wpt == 0 {
            return Err(BackendError::InvalidLaunch {
                message: format!("block size {bs} and work per thread {wpt} must be non-zero"),
            });
        }
        if bs % wpt != 0 {
            return Err(BackendError::InvalidLaunch {
                message: format!("work per thread {wpt} does not divide block size {bs}"),
            });
        }
        Ok(())
    }

    /// Run the kernel on padded operands: `a` is mp x kp, `b` is kp x np.
    fn launch(&self, a: &[f64], b: &[f64], c: &mut [f64], mp: usize, kp: usize, np: usize) {
        let bs = self.block_size;
        let wpt = self.work_per_thread;
        let local_cols = bs / wpt;
        let mut acc = vec![0.0; bs * bs];

        for gj in (0..np).step_by(bs) {
            for gi in (0..mp).step_by(bs) {
                trace!("work group ({}, {})", gi / bs, gj / bs);
                acc.fill(0.0);
                for t in (0..kp).step_by(bs) {
                    for tc in 0..local_cols {
                        for row in 0..bs {
                            for w in 0..wpt {
                                let col = tc + w * local_cols;
                                let mut sum = 0.0;
                                for l in 0..bs {
                                    sum += a[(gi + row) + (t + l) * mp]
                                        * b[(t + l) + (gj + col) * kp];
                                }
                                acc[row + col * bs] += sum;
                            }
                        }
                    }
                }
                for col in 0..bs {
                    let dst = gi + (gj + col) * mp;
                    c[dst..dst + bs].copy_from_slice(&acc[col * bs..(col + 1) * bs]);
                }
            }
        }
    }
}

impl Default for TiledBackend {
    fn default() -> Self {
        Self::new(THREAD_BLOCK_SIZE, WORK_PER_THREAD)
    }
}

fn round_up(x: usize, block: usize) -> usize {
    x.div_ceil(block) * block
}

/// Copy an r x c column-major matrix into the top-left of a zeroed rp x cp one.
fn pad(src: &[f64], r: usize, c: usize, rp: usize, cp: usize) -> Vec<f64> {
    let mut dst = vec![0.0; rp * cp];
    for j in 0..c {
        dst[j * rp..j * rp + r].copy_from_slice(&src[j * r..(j + 1) * r]);
    }
    dst
}

impl MatmulBackend for TiledBackend {
    fn name(&self) -> &'static str {
        "tiled"
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
        self.validate()?;
        let bs = self.block_size;
        let (mp, kp, np) = (round_up(m, bs), round_up(k, bs), round_up(n, bs));
        debug!("tiled matmul: padded {m}x{k}x{n} to {mp}x{kp}x{np} (block {bs})");

        let a_pad = pad(a, m, k, mp, kp);
        let b_pad = pad(b, k, n, kp, np);
        let mut c_pad = vec![0.0; mp * np];
        self.launch(&a_pad, &b_pad, &mut c_pad, mp, kp, np);

        for j in 0..n {
            c[j * m..(j + 1) * m].copy_from_slice(&c_pad[j * mp..j * mp + m]);
        }
        Ok(())
    }
}
