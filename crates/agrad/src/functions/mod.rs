//! Derivative rules for the elementary functions.
//!
//! Each function's rule is stated once, in tangent form: given the argument
//! `x`, the already computed result `fx = f(x)` and an input tangent `dx`, a
//! rule returns the output tangent `f'(x) * dx`. The rules are generic over
//! [`Real`](crate::Real), so the same formula serves every mode:
//!
//! - forward mode calls the rule with the primal and tangent of a
//!   [`Dual`](crate::Dual), evaluating `f'(x)` in the component type's own
//!   arithmetic (scalar, nested dual, or tape-recording);
//! - reverse mode calls the rule with `dx = 1` on the tape's scalar values to
//!   obtain the partial stored on the new node.
//!
//! Binary functions have one rule per operand (`*_da`, `*_db`). On the tape a
//! constant operand gets no edge at all. Forward mode evaluates both rules,
//! so a rule whose closed form is `0 * inf` at a finite derivative (`pow_db`
//! at a zero base) returns zero there instead.
//!
//! Rules never clamp: outside a function's domain the closed form yields
//! NaN or infinity and that value propagates.

mod exp_log;
mod hyperbolic;
mod logistic;
mod piecewise;
mod power;
mod trig;

pub(crate) use exp_log::*;
pub(crate) use hyperbolic::*;
pub(crate) use logistic::*;
pub(crate) use piecewise::*;
pub(crate) use power::*;
pub(crate) use trig::*;
