//! The `Real` capability shared by every differentiable number type.
//!
//! `Real` is implemented for plain `f64`, for reverse-mode [`Var`](crate::Var)
//! handles and for forward-mode [`Dual`](crate::Dual) numbers over any `Real`.
//! Model code written once against `T: Real` can therefore be evaluated,
//! differentiated in either mode, or differentiated to higher order by
//! picking the concrete `T`.
//!
//! # Example
//!
//! ```
//! use agrad::{Dual, Real};
//!
//! fn f<T: Real>(x: T) -> T {
//!     x.sin() * 2.0 + 4.0
//! }
//!
//! assert_eq!(f(0.5), 0.5_f64.sin() * 2.0 + 4.0);
//!
//! let y = f(Dual::<f64>::variable(0.5));
//! assert!((y.tangent - 2.0 * 0.5_f64.cos()).abs() < 1e-15);
//! ```

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Arithmetic and elementary functions over a differentiable number type.
///
/// Binary operators are required both between two values of the type and
/// between a value and an `f64` constant. Elementary functions consume
/// `self` by value; every implementor is `Copy`.
pub trait Real:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Innermost primal value, stripped of every derivative layer.
    fn value_of(&self) -> f64;

    // --- power ---

    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn square(self) -> Self;
    /// `1 / x`
    fn recip(self) -> Self;
    /// `1 / sqrt(x)`
    fn inv_sqrt(self) -> Self;
    fn powi(self, n: i32) -> Self;
    fn powf(self, e: f64) -> Self;
    fn pow(self, e: Self) -> Self;
    /// `sqrt(x^2 + y^2)` without intermediate overflow.
    fn hypot(self, other: Self) -> Self;

    // --- exponential and logarithm ---

    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    /// `exp(x) - 1`, accurate near zero.
    fn expm1(self) -> Self;
    /// Natural logarithm.
    fn ln(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    /// `ln(1 + x)`, accurate near zero.
    fn log1p(self) -> Self;
    /// `ln(1 - x)`, accurate near zero.
    fn log1m(self) -> Self;
    /// `ln(1 + exp(x))` without overflow.
    fn log1p_exp(self) -> Self;
    /// `ln(exp(x) + exp(y))` without overflow.
    fn log_sum_exp(self, other: Self) -> Self;

    // --- trigonometric ---

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    /// Four-quadrant arctangent of `self / other`.
    fn atan2(self, other: Self) -> Self;

    // --- hyperbolic ---

    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;

    // --- logistic ---

    /// Logistic sigmoid `1 / (1 + exp(-x))`.
    fn inv_logit(self) -> Self;
    /// Log-odds `ln(x / (1 - x))`.
    fn logit(self) -> Self;

    // --- piecewise ---

    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn trunc(self) -> Self;

    /// Larger of the two operands; a NaN operand loses to a number.
    ///
    /// The selected operand is returned unchanged, derivative parts included.
    fn fmax(self, other: Self) -> Self {
        let (a, b) = (self.value_of(), other.value_of());
        if a.is_nan() || (!b.is_nan() && b > a) {
            other
        } else {
            self
        }
    }

    /// Smaller of the two operands; a NaN operand loses to a number.
    fn fmin(self, other: Self) -> Self {
        let (a, b) = (self.value_of(), other.value_of());
        if a.is_nan() || (!b.is_nan() && b < a) {
            other
        } else {
            self
        }
    }

    /// Positive difference `max(x - y, 0)`.
    fn fdim(self, other: Self) -> Self {
        let diff = self - other;
        if self.value_of() > other.value_of() {
            diff
        } else {
            diff * 0.0
        }
    }

    // --- reductions ---

    /// Sum of a slice, `None` when empty.
    fn sum_of(terms: &[Self]) -> Option<Self> {
        let (first, rest) = terms.split_first()?;
        Some(rest.iter().fold(*first, |acc, &t| acc + t))
    }

    /// Inner product of two slices of equal length, `None` when empty.
    ///
    /// Callers check the lengths; extra trailing elements are ignored.
    fn dot_of(a: &[Self], b: &[Self]) -> Option<Self> {
        let mut pairs = a.iter().zip(b.iter());
        let (&a0, &b0) = pairs.next()?;
        Some(pairs.fold(a0 * b0, |acc, (&x, &y)| acc + x * y))
    }
}

impl Real for f64 {
    fn value_of(&self) -> f64 {
        *self
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn cbrt(self) -> Self {
        f64::cbrt(self)
    }

    fn square(self) -> Self {
        self * self
    }

    fn recip(self) -> Self {
        f64::recip(self)
    }

    fn inv_sqrt(self) -> Self {
        f64::sqrt(self).recip()
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    fn powf(self, e: f64) -> Self {
        f64::powf(self, e)
    }

    fn pow(self, e: Self) -> Self {
        f64::powf(self, e)
    }

    fn hypot(self, other: Self) -> Self {
        f64::hypot(self, other)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn exp2(self) -> Self {
        f64::exp2(self)
    }

    fn expm1(self) -> Self {
        f64::exp_m1(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn log2(self) -> Self {
        f64::log2(self)
    }

    fn log10(self) -> Self {
        f64::log10(self)
    }

    fn log1p(self) -> Self {
        f64::ln_1p(self)
    }

    fn log1m(self) -> Self {
        f64::ln_1p(-self)
    }

    fn log1p_exp(self) -> Self {
        if self > 0.0 {
            self + f64::ln_1p(f64::exp(-self))
        } else {
            f64::ln_1p(f64::exp(self))
        }
    }

    fn log_sum_exp(self, other: Self) -> Self {
        if self == f64::NEG_INFINITY {
            return other;
        }
        if other == f64::NEG_INFINITY {
            return self;
        }
        if self > other {
            self + f64::ln_1p(f64::exp(other - self))
        } else {
            other + f64::ln_1p(f64::exp(self - other))
        }
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn tan(self) -> Self {
        f64::tan(self)
    }

    fn asin(self) -> Self {
        f64::asin(self)
    }

    fn acos(self) -> Self {
        f64::acos(self)
    }

    fn atan(self) -> Self {
        f64::atan(self)
    }

    fn atan2(self, other: Self) -> Self {
        f64::atan2(self, other)
    }

    fn sinh(self) -> Self {
        f64::sinh(self)
    }

    fn cosh(self) -> Self {
        f64::cosh(self)
    }

    fn tanh(self) -> Self {
        f64::tanh(self)
    }

    fn asinh(self) -> Self {
        f64::asinh(self)
    }

    fn acosh(self) -> Self {
        f64::acosh(self)
    }

    fn atanh(self) -> Self {
        f64::atanh(self)
    }

    fn inv_logit(self) -> Self {
        if self < 0.0 {
            let e = f64::exp(self);
            e / (1.0 + e)
        } else {
            1.0 / (1.0 + f64::exp(-self))
        }
    }

    fn logit(self) -> Self {
        f64::ln(self / (1.0 - self))
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn floor(self) -> Self {
        f64::floor(self)
    }

    fn ceil(self) -> Self {
        f64::ceil(self)
    }

    fn round(self) -> Self {
        f64::round(self)
    }

    fn trunc(self) -> Self {
        f64::trunc(self)
    }

    fn fmax(self, other: Self) -> Self {
        f64::max(self, other)
    }

    fn fmin(self, other: Self) -> Self {
        f64::min(self, other)
    }

    fn fdim(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            f64::NAN
        } else if self > other {
            self - other
        } else {
            0.0
        }
    }
}
