//! Trigonometric functions.

use crate::real::Real;

pub(crate) fn sin<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x.cos()
}

pub(crate) fn cos<T: Real>(x: T, _fx: T, dx: T) -> T {
    -(dx * x.sin())
}

pub(crate) fn tan<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx * (fx * fx + 1.0)
}

pub(crate) fn asin<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (-(x * x) + 1.0).sqrt()
}

pub(crate) fn acos<T: Real>(x: T, _fx: T, dx: T) -> T {
    -(dx / (-(x * x) + 1.0).sqrt())
}

pub(crate) fn atan<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx / (x * x + 1.0)
}

// atan2(y, x): d/dy = x / (x^2 + y^2), d/dx = -y / (x^2 + y^2)
pub(crate) fn atan2_da<T: Real>(y: T, x: T, _fx: T, dy: T) -> T {
    dy * x / (x * x + y * y)
}

pub(crate) fn atan2_db<T: Real>(y: T, x: T, _fx: T, dx: T) -> T {
    -(dx * y) / (x * x + y * y)
}
