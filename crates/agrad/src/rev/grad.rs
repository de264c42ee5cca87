//! Reverse sweep and gradient queries.

use log::debug;

use super::tape::Tape;
use super::var::Var;
use crate::error::AdError;
use crate::scalar::Scalar;

impl<S: Scalar> Tape<S> {
    /// Gradient of `target` with respect to `params`, in request order.
    ///
    /// All adjoints on the tape are zeroed first, so repeated calls on the
    /// same target return identical results. Cost is linear in the number of
    /// nodes and edges recorded up to `target`, whatever the number of
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::ForeignVariable`] if `target` or a parameter was
    /// recorded on another tape.
    ///
    /// # Example
    ///
    /// ```
    /// use agrad::{Real, Tape};
    ///
    /// let tape: Tape = Tape::new();
    /// let x = tape.var(2.0);
    /// let y = tape.var(3.0);
    /// let z = x * y + x.exp();
    ///
    /// let g = tape.grad(z, &[x, y]).unwrap();
    /// assert_eq!(g[0], 3.0 + 2.0_f64.exp());
    /// assert_eq!(g[1], 2.0);
    /// ```
    pub fn grad(&self, target: Var<'_, S>, params: &[Var<'_, S>]) -> Result<Vec<S>, AdError> {
        for param in params {
            self.check_owned("grad", param)?;
        }
        self.set_zero_all_adjoints();
        self.backward(target)?;

        let arena = self.arena();
        Ok(params
            .iter()
            .map(|p| arena.adjoints[p.index as usize])
            .collect())
    }

    /// Seed `target` with a unit adjoint and sweep down to the first node.
    ///
    /// Adjoints are not zeroed: the seed overwrites the adjoint of `target`
    /// while every other adjoint accumulates onto what a previous sweep left.
    /// Call [`set_zero_all_adjoints`](Tape::set_zero_all_adjoints) first for
    /// a clean pass.
    ///
    /// # Errors
    ///
    /// Returns [`AdError::ForeignVariable`] if `target` was recorded on
    /// another tape.
    pub fn backward(&self, target: Var<'_, S>) -> Result<(), AdError> {
        self.check_owned("backward", &target)?;

        let mut arena = self.arena_mut();
        let from = target.index as usize;
        arena.adjoints[from] = S::one();
        debug!(
            "reverse sweep over {} nodes, {} edges",
            from + 1,
            arena.edge_ends[from]
        );
        arena.sweep(from);
        Ok(())
    }

    /// Jacobian of `outputs` with respect to `params`, one row per output.
    ///
    /// Each row costs one reverse sweep.
    pub fn jacobian(
        &self,
        outputs: &[Var<'_, S>],
        params: &[Var<'_, S>],
    ) -> Result<Vec<Vec<S>>, AdError> {
        outputs
            .iter()
            .map(|&output| self.grad(output, params))
            .collect()
    }
}
