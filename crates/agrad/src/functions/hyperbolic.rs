//! Hyperbolic functions.

use crate::real::Real;

pub(crate) fn sinh<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x.cosh()
}

pub(crate) fn cosh<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x.sinh()
}

pub(crate) fn tanh<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx * (-(fx * fx) + 1.0)
}

pub(crate) fn asinh<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * x + 1.0).sqrt()
}

pub(crate) fn acosh<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * x - 1.0).sqrt()
}

pub(crate) fn atanh<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (-(x * x) + 1.0)
}
