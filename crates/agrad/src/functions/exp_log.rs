//! Exponentials and logarithms.

use std::f64::consts::{LN_2, LN_10};

use crate::real::Real;

pub(crate) fn exp<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx * fx
}

pub(crate) fn exp2<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx * fx * LN_2
}

// Uses exp(x) directly rather than fx + 1 so the tangent stays exact near 0.
pub(crate) fn expm1<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x.exp()
}

pub(crate) fn ln<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / x
}

pub(crate) fn log2<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * LN_2)
}

pub(crate) fn log10<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * LN_10)
}

pub(crate) fn log1p<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x + 1.0)
}

pub(crate) fn log1m<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x - 1.0)
}

pub(crate) fn log1p_exp<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x.inv_logit()
}

pub(crate) fn log_sum_exp_da<T: Real>(x: T, _y: T, fx: T, dx: T) -> T {
    dx * (x - fx).exp()
}

pub(crate) fn log_sum_exp_db<T: Real>(_x: T, y: T, fx: T, dy: T) -> T {
    dy * (y - fx).exp()
}
