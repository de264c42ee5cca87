//! agrad - dual-path automatic differentiation
//!
//! This crate computes exact derivatives of numerical code built from
//! floating-point arithmetic and elementary functions, in two modes that
//! compose with each other:
//!
//! - reverse mode records operations on a [`Tape`] through [`Var`] handles and
//!   sweeps it backwards once per gradient;
//! - forward mode propagates a tangent alongside every value in a [`Dual`]
//!   number.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Drivers (functional module)
//!     → derivative, gradient, jacobian, hessian, hessian_vector_product
//!
//! Level 2: Number types implementing Real
//!     → f64, Dual<T: Real>, Var<'t, S: Scalar>
//!     → nestable: Dual<Dual<f64>>, Dual<Var>, Var<Dual<f64>>
//!
//! Level 3: Derivative rules (functions module), one per elementary function
//!
//! Level 4: Primitives (linalg, backend modules)
//!     → dot_product, multiply → GenericBackend, FaerBackend, TiledBackend
//! ```
//!
//! # Example
//!
//! ```
//! use agrad::{Dual, Real, Tape};
//!
//! fn f<T: Real>(x: T, y: T) -> T {
//!     (x * y).sin() + x.exp()
//! }
//!
//! // Reverse mode: all partials from one sweep.
//! let tape: Tape = Tape::new();
//! let (x, y) = (tape.var(0.5), tape.var(2.0));
//! let g = tape.grad(f(x, y), &[x, y]).unwrap();
//! assert!((g[1] - 1.0_f64.cos() * 0.5).abs() < 1e-15);
//!
//! // Forward mode: one directional derivative per pass.
//! let d = f(Dual::new(0.5, 1.0), Dual::new(2.0, 0.0));
//! assert!((d.tangent - g[0]).abs() < 1e-15);
//! ```

pub mod backend;
pub mod error;
mod functions;
pub mod functional;
pub mod fwd;
pub mod linalg;
mod random;
pub mod real;
pub mod rev;
pub mod scalar;

pub use backend::BackendKind;
pub use error::{AdError, BackendError};
pub use fwd::Dual;
pub use linalg::{Matrix, dot_product, dot_self, multiply, multiply_with, sum};
pub use real::Real;
pub use rev::{Tape, TapeConfig, TapeStats, Var};
pub use scalar::Scalar;
