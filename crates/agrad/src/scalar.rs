//! Scalar trait for value-level number types.

use crate::fwd::Dual;
use crate::real::Real;

/// A [`Real`] type that can construct its own constants.
///
/// Scalars are the types a [`Tape`](crate::Tape) records as node values,
/// partials and adjoints: `f64`, and `Dual<S>` over any scalar `S` for
/// reverse-over-forward differentiation. Reverse-mode handles are not
/// scalars, since a constant `Var` needs a tape to live on.
pub trait Scalar: Real + PartialEq + 'static {
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self {
        Self::from_f64(1.0)
    }

    /// Lift a constant; all derivative parts are zero.
    fn from_f64(c: f64) -> Self;
}

impl Scalar for f64 {
    fn from_f64(c: f64) -> Self {
        c
    }
}

impl<S: Scalar> Scalar for Dual<S> {
    fn from_f64(c: f64) -> Self {
        Dual::new(S::from_f64(c), S::zero())
    }
}
