//! Logistic sigmoid and its inverse.

use crate::real::Real;

pub(crate) fn inv_logit<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx * fx * (-fx + 1.0)
}

pub(crate) fn logit<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * (-x + 1.0))
}
