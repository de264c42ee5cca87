//! Forward-mode automatic differentiation with nested dual numbers.

mod dual;

pub use dual::Dual;
