//! Piecewise-smooth functions.
//!
//! Rounding is flat almost everywhere, so its tangent is zero. `fmax`,
//! `fmin` and `fdim` select an operand and need no rule of their own.

use crate::real::Real;

pub(crate) fn abs<T: Real>(x: T, _fx: T, dx: T) -> T {
    let v = x.value_of();
    if v > 0.0 {
        dx
    } else if v < 0.0 {
        -dx
    } else if v == 0.0 {
        dx * 0.0
    } else {
        dx * f64::NAN
    }
}

pub(crate) fn floor<T: Real>(_x: T, _fx: T, dx: T) -> T {
    dx * 0.0
}

pub(crate) fn ceil<T: Real>(_x: T, _fx: T, dx: T) -> T {
    dx * 0.0
}

pub(crate) fn round<T: Real>(_x: T, _fx: T, dx: T) -> T {
    dx * 0.0
}

pub(crate) fn trunc<T: Real>(_x: T, _fx: T, dx: T) -> T {
    dx * 0.0
}
