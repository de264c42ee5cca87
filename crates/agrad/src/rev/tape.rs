//! Append-only tape (arena) for reverse-mode automatic differentiation.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt::Debug;

use log::{debug, trace};

use super::var::Var;
use crate::error::AdError;
use crate::scalar::Scalar;

/// Initial sizing of a [`Tape`].
///
/// Capacities are hints; the tape grows on demand either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapeConfig {
    /// Nodes to reserve up front.
    pub node_capacity: usize,
    /// Edges (input, partial) to reserve up front.
    pub edge_capacity: usize,
}

impl TapeConfig {
    /// Set the node capacity.
    pub fn with_node_capacity(mut self, nodes: usize) -> Self {
        self.node_capacity = nodes;
        self
    }

    /// Set the edge capacity.
    pub fn with_edge_capacity(mut self, edges: usize) -> Self {
        self.edge_capacity = edges;
        self
    }
}

/// Size of a tape at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeStats {
    /// Number of recorded nodes.
    pub nodes: usize,
    /// Number of recorded (input, partial) edges.
    pub edges: usize,
    /// Bytes occupied by node and edge storage (excluding spare capacity).
    pub bytes: usize,
}

/// Node storage, one entry per node across parallel vectors.
///
/// Node `i` owns the edges `edge_ends[i - 1]..edge_ends[i]`. Every edge input
/// is strictly smaller than the node that records it, so creation order is a
/// topological order.
pub(crate) struct Arena<S> {
    pub(crate) values: Vec<S>,
    pub(crate) adjoints: Vec<S>,
    pub(crate) edge_ends: Vec<u32>,
    pub(crate) edge_inputs: Vec<u32>,
    pub(crate) edge_partials: Vec<S>,
}

impl<S: Scalar> Arena<S> {
    fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            values: Vec::with_capacity(nodes),
            adjoints: Vec::with_capacity(nodes),
            edge_ends: Vec::with_capacity(nodes),
            edge_inputs: Vec::with_capacity(edges),
            edge_partials: Vec::with_capacity(edges),
        }
    }

    fn clear(&mut self) {
        self.values.clear();
        self.adjoints.clear();
        self.edge_ends.clear();
        self.edge_inputs.clear();
        self.edge_partials.clear();
    }

    fn push(&mut self, value: S, edges: impl IntoIterator<Item = (u32, S)>) -> u32 {
        let Ok(index) = u32::try_from(self.values.len()) else {
            panic!("tape capacity exceeded: more than {} nodes", u32::MAX);
        };
        for (input, partial) in edges {
            debug_assert!(input < index, "edge input must precede its node");
            self.edge_inputs.push(input);
            self.edge_partials.push(partial);
        }
        let Ok(end) = u32::try_from(self.edge_inputs.len()) else {
            panic!("tape capacity exceeded: more than {} edges", u32::MAX);
        };
        self.values.push(value);
        self.adjoints.push(S::zero());
        self.edge_ends.push(end);
        index
    }

    /// Propagate adjoints from node `from` down to node 0.
    ///
    /// Nodes with a zero adjoint do not reach the target and are skipped, so
    /// an infinite partial on an unrelated branch never turns into `0 * inf`.
    pub(crate) fn sweep(&mut self, from: usize) {
        for node in (0..=from).rev() {
            let adjoint = self.adjoints[node];
            if adjoint == S::zero() {
                continue;
            }
            let start = if node == 0 {
                0
            } else {
                self.edge_ends[node - 1] as usize
            };
            let end = self.edge_ends[node] as usize;
            for edge in start..end {
                let input = self.edge_inputs[edge] as usize;
                self.adjoints[input] = self.adjoints[input] + adjoint * self.edge_partials[edge];
            }
        }
    }
}

/// Differentiation context for one reverse-mode episode.
///
/// A tape records every operation performed on its [`Var`] handles. Handles
/// borrow the tape, so [`reset`](Tape::reset), which takes `&mut self`, can
/// only run once no handle is alive: a stale handle is a compile error.
///
/// The tape is single-threaded (`!Sync`); use one tape per thread.
///
/// # Example
///
/// ```
/// use agrad::{Real, Tape};
///
/// let mut tape: Tape = Tape::new();
/// let g = tape.episode(|tape| {
///     let x = tape.var(0.5);
///     let y = x.sin() * x;
///     tape.grad(y, &[x]).unwrap()
/// });
/// assert!((g[0] - (0.5_f64.cos() * 0.5 + 0.5_f64.sin())).abs() < 1e-15);
/// assert!(tape.is_empty());
/// ```
pub struct Tape<S: Scalar = f64> {
    arena: RefCell<Arena<S>>,
}

impl<S: Scalar> Tape<S> {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a tape with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            arena: RefCell::new(Arena::with_capacity(nodes, edges)),
        }
    }

    /// Create a tape sized by `config`.
    pub fn with_config(config: &TapeConfig) -> Self {
        Self::with_capacity(config.node_capacity, config.edge_capacity)
    }

    /// Record an independent variable (a leaf).
    pub fn var(&self, value: S) -> Var<'_, S> {
        self.push(value, [])
    }

    /// Record a constant. It is a leaf like [`var`](Tape::var); its gradient
    /// is simply never requested.
    pub fn constant(&self, value: S) -> Var<'_, S> {
        self.push(value, [])
    }

    /// Record one node with precomputed partials.
    ///
    /// Each edge pairs an input handle with the partial derivative of `value`
    /// with respect to it. This is how n-ary operations (sums, likelihoods,
    /// matrix products) are recorded as a single node.
    ///
    /// # Panics
    ///
    /// Panics if an input was recorded on a different tape.
    pub fn allocate<'t>(&'t self, value: S, edges: &[(Var<'t, S>, S)]) -> Var<'t, S> {
        for (input, _) in edges {
            assert!(
                self.owns(input),
                "allocate: input variable does not belong to this tape"
            );
        }
        self.push(value, edges.iter().map(|(input, partial)| (input.index, *partial)))
    }

    pub(crate) fn push(&self, value: S, edges: impl IntoIterator<Item = (u32, S)>) -> Var<'_, S> {
        let index = self.arena_mut().push(value, edges);
        Var::from_index(self, index)
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.arena().values.len()
    }

    /// Check if no node has been recorded.
    pub fn is_empty(&self) -> bool {
        self.arena().values.is_empty()
    }

    /// Number of recorded edges.
    pub fn num_edges(&self) -> usize {
        self.arena().edge_inputs.len()
    }

    /// Node and edge counts with their storage footprint.
    pub fn stats(&self) -> TapeStats {
        let arena = self.arena();
        let nodes = arena.values.len();
        let edges = arena.edge_inputs.len();
        TapeStats {
            nodes,
            edges,
            bytes: nodes * (2 * size_of::<S>() + size_of::<u32>())
                + edges * (size_of::<S>() + size_of::<u32>()),
        }
    }

    /// Primal value of a node.
    ///
    /// # Panics
    ///
    /// Panics if `var` was recorded on a different tape.
    pub fn value(&self, var: Var<'_, S>) -> S {
        assert!(self.owns(&var), "value: variable does not belong to this tape");
        self.arena().values[var.index as usize]
    }

    /// Current adjoint of a node.
    ///
    /// # Panics
    ///
    /// Panics if `var` was recorded on a different tape.
    pub fn adjoint(&self, var: Var<'_, S>) -> S {
        assert!(self.owns(&var), "adjoint: variable does not belong to this tape");
        self.arena().adjoints[var.index as usize]
    }

    /// Set every adjoint on the tape to zero.
    pub fn set_zero_all_adjoints(&self) {
        self.arena_mut().adjoints.fill(S::zero());
    }

    /// Clear all nodes, keeping the allocation for the next episode.
    pub fn reset(&mut self) {
        let arena = self.arena.get_mut();
        debug!(
            "tape reset: {} nodes, {} edges",
            arena.values.len(),
            arena.edge_inputs.len()
        );
        arena.clear();
    }

    /// Run one episode against this tape and reset it afterwards.
    ///
    /// The closure receives the tape under a fresh lifetime, so handles
    /// cannot escape into the result.
    pub fn episode<R>(&mut self, f: impl for<'a> FnOnce(&'a Self) -> R) -> R {
        trace!("tape episode start at {} nodes", self.len());
        let result = f(self);
        self.reset();
        result
    }

    pub(crate) fn owns(&self, var: &Var<'_, S>) -> bool {
        std::ptr::eq(var.tape, self)
    }

    pub(crate) fn check_owned(&self, op: &'static str, var: &Var<'_, S>) -> Result<(), AdError> {
        if self.owns(var) {
            Ok(())
        } else {
            Err(AdError::ForeignVariable { op })
        }
    }

    pub(crate) fn arena(&self) -> Ref<'_, Arena<S>> {
        self.arena.borrow()
    }

    pub(crate) fn arena_mut(&self) -> RefMut<'_, Arena<S>> {
        self.arena.borrow_mut()
    }

    pub(crate) fn try_arena(&self) -> Option<Ref<'_, Arena<S>>> {
        self.arena.try_borrow().ok()
    }
}

impl<S: Scalar> Default for Tape<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> Debug for Tape<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.try_arena() {
            Some(arena) => f
                .debug_struct("Tape")
                .field("num_nodes", &arena.values.len())
                .field("num_edges", &arena.edge_inputs.len())
                .finish(),
            None => f.debug_struct("Tape").finish_non_exhaustive(),
        }
    }
}
