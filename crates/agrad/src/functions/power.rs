//! Powers and roots.

use crate::real::Real;

pub(crate) fn sqrt<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx / (fx * 2.0)
}

pub(crate) fn cbrt<T: Real>(_x: T, fx: T, dx: T) -> T {
    dx / (fx * fx * 3.0)
}

pub(crate) fn square<T: Real>(x: T, _fx: T, dx: T) -> T {
    dx * x * 2.0
}

pub(crate) fn recip<T: Real>(_x: T, fx: T, dx: T) -> T {
    -(dx * fx * fx)
}

// d/dx x^(-1/2) = -x^(-3/2) / 2, written in terms of the result.
pub(crate) fn inv_sqrt<T: Real>(_x: T, fx: T, dx: T) -> T {
    -(dx * fx * fx * fx) * 0.5
}

pub(crate) fn powi<T: Real>(x: T, n: i32, dx: T) -> T {
    if n == 0 {
        return dx * 0.0;
    }
    match n.checked_sub(1) {
        Some(m) => dx * x.powi(m) * f64::from(n),
        None => dx * x.powf(f64::from(n) - 1.0) * f64::from(n),
    }
}

pub(crate) fn powf<T: Real>(x: T, e: f64, dx: T) -> T {
    if e == 0.0 {
        return dx * 0.0;
    }
    dx * x.powf(e - 1.0) * e
}

pub(crate) fn pow_da<T: Real>(x: T, y: T, _fx: T, dx: T) -> T {
    dx * y * x.pow(y - 1.0)
}

// x^y ln x tends to 0 as x -> 0+; at a zero base the closed form is 0 * -inf.
pub(crate) fn pow_db<T: Real>(x: T, _y: T, fx: T, dy: T) -> T {
    if x.value_of() == 0.0 {
        return dy * 0.0;
    }
    dy * fx * x.ln()
}

pub(crate) fn hypot_da<T: Real>(x: T, _y: T, fx: T, dx: T) -> T {
    dx * x / fx
}

pub(crate) fn hypot_db<T: Real>(_x: T, y: T, fx: T, dy: T) -> T {
    dy * y / fx
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roots() {
        let x: f64 = 2.0;
        assert_relative_eq!(sqrt(x, x.sqrt(), 1.0), 0.5 / x.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            cbrt(x, x.cbrt(), 1.0),
            1.0 / (3.0 * x.cbrt().powi(2)),
            epsilon = 1e-12
        );
        assert_relative_eq!(inv_sqrt(x, 1.0 / x.sqrt(), 1.0), -0.5 * x.powf(-1.5), epsilon = 1e-12);
        assert_relative_eq!(recip(x, 0.5, 1.0), -0.25);
    }

    #[test]
    fn test_integer_power_at_zero_exponent() {
        assert_eq!(powi(0.0, 0, 1.0), 0.0);
        assert_eq!(powf(0.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(powi(3.0, 3, 1.0), 27.0);
    }

    #[test]
    fn test_pow_partials() {
        let (x, y): (f64, f64) = (2.0, 3.0);
        let fx = x.powf(y);
        assert_relative_eq!(pow_da(x, y, fx, 1.0), 12.0);
        assert_relative_eq!(pow_db(x, y, fx, 1.0), 8.0 * 2.0_f64.ln());
    }

    #[test]
    fn test_pow_exponent_partial_at_zero_base() {
        assert_eq!(pow_db(0.0, 2.0, 0.0, 1.0), 0.0);
        assert_eq!(pow_db(0.0, 2.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_powi_extreme_exponent_does_not_overflow() {
        assert_eq!(powi(1.0, i32::MIN, 1.0), f64::from(i32::MIN));
    }
}
