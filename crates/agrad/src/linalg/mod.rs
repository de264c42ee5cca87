//! Dense linear algebra usable with every [`Real`](crate::Real) type.

mod dot;
mod matrix;
mod multiply;

pub use dot::{dot_product, dot_self, sum};
pub use matrix::Matrix;
pub use multiply::{multiply, multiply_generic, multiply_with, scale};
