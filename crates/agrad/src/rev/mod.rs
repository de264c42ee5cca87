//! Reverse-mode automatic differentiation.
//!
//! Build an expression from [`Var`] handles on a [`Tape`], then call
//! [`Tape::grad`] to sweep the tape backwards once and read off the partial
//! derivatives of one output with respect to any number of inputs.
//!
//! The tape's scalar type is generic. With `Tape<Dual<f64>>` every recorded
//! value and partial carries a tangent, so a single sweep returns gradients
//! whose tangent parts form a Hessian-vector product.

mod grad;
mod multiply;
mod tape;
mod var;

pub use tape::{Tape, TapeConfig, TapeStats};
pub use var::Var;
