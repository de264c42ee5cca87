//! Dual - number with a tangent for forward-mode automatic differentiation.
//!
//! Forward-mode AD propagates a tangent alongside every value. Given a
//! function f and input x with tangent v, evaluating f on `Dual(x, v)`
//! yields:
//!   - primal: f(x)
//!   - tangent: f'(x) * v
//!
//! The component type is itself generic. `Dual<f64>` gives first
//! derivatives, `Dual<Dual<f64>>` second derivatives, and `Dual<Var>`
//! records every primal and tangent operation on a tape so that a later
//! reverse sweep can differentiate the tangent (forward-over-reverse).
//!
//! # Example
//!
//! ```
//! use agrad::{Dual, Real};
//!
//! // Seed the tangent with 1 to differentiate w.r.t. x.
//! let x: Dual<f64> = Dual::new(0.5, 1.0);
//! let a = x.expm1();
//! assert_eq!(a.primal, 0.5_f64.exp_m1());
//! assert_eq!(a.tangent, 0.5_f64.exp());
//!
//! // Second derivative: seed both the inner and outer tangent.
//! let y: Dual<Dual<f64>> = Dual::new(Dual::new(1.5, 1.0), Dual::new(1.0, 0.0));
//! let b = y.sin();
//! assert!((b.tangent.tangent + 1.5_f64.sin()).abs() < 1e-15);
//! ```

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::functions;
use crate::real::Real;
use crate::scalar::Scalar;

/// A value paired with its directional derivative.
///
/// The outer `tangent` is always the derivative with respect to the variable
/// seeded at the outermost nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual<T> {
    /// The primal (function value).
    pub primal: T,
    /// The tangent (derivative in the seeded direction).
    pub tangent: T,
}

impl<T> Dual<T> {
    /// Create a dual number from its two parts.
    pub const fn new(primal: T, tangent: T) -> Self {
        Self { primal, tangent }
    }

    /// Consume and return primal and tangent.
    pub fn into_parts(self) -> (T, T) {
        (self.primal, self.tangent)
    }
}

impl<T: Scalar> Dual<T> {
    /// A constant: zero tangent.
    pub fn constant(value: f64) -> Self {
        Self::new(T::from_f64(value), T::zero())
    }

    /// The independent variable: unit tangent.
    pub fn variable(value: f64) -> Self {
        Self::new(T::from_f64(value), T::one())
    }
}

// --- Dual ∘ Dual ---

impl<T: Real> Add for Dual<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.primal + rhs.primal, self.tangent + rhs.tangent)
    }
}

impl<T: Real> Sub for Dual<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.primal - rhs.primal, self.tangent - rhs.tangent)
    }
}

impl<T: Real> Mul for Dual<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.primal * rhs.primal,
            self.tangent * rhs.primal + self.primal * rhs.tangent,
        )
    }
}

impl<T: Real> Div for Dual<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.primal / rhs.primal,
            (self.tangent * rhs.primal - self.primal * rhs.tangent) / (rhs.primal * rhs.primal),
        )
    }
}

impl<T: Real> Neg for Dual<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.primal, -self.tangent)
    }
}

// --- Dual ∘ f64 ---

impl<T: Real> Add<f64> for Dual<T> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.primal + rhs, self.tangent)
    }
}

impl<T: Real> Sub<f64> for Dual<T> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.primal - rhs, self.tangent)
    }
}

impl<T: Real> Mul<f64> for Dual<T> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.primal * rhs, self.tangent * rhs)
    }
}

impl<T: Real> Div<f64> for Dual<T> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.primal / rhs, self.tangent / rhs)
    }
}

// --- f64 ∘ Dual ---

impl<T: Real> Add<Dual<T>> for f64 {
    type Output = Dual<T>;

    fn add(self, rhs: Dual<T>) -> Dual<T> {
        rhs + self
    }
}

impl<T: Real> Sub<Dual<T>> for f64 {
    type Output = Dual<T>;

    fn sub(self, rhs: Dual<T>) -> Dual<T> {
        Dual::new(-(rhs.primal - self), -rhs.tangent)
    }
}

impl<T: Real> Mul<Dual<T>> for f64 {
    type Output = Dual<T>;

    fn mul(self, rhs: Dual<T>) -> Dual<T> {
        rhs * self
    }
}

impl<T: Real> Div<Dual<T>> for f64 {
    type Output = Dual<T>;

    fn div(self, rhs: Dual<T>) -> Dual<T> {
        let r = rhs.primal.recip();
        Dual::new(r * self, -(rhs.tangent * r * r) * self)
    }
}

// --- compound assignment ---

macro_rules! impl_assign_ops {
    ($($trait:ident, $method:ident, $op:tt;)*) => {
        $(
            impl<T: Real> $trait for Dual<T> {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl<T: Real> $trait<f64> for Dual<T> {
                fn $method(&mut self, rhs: f64) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_assign_ops! {
    AddAssign, add_assign, +;
    SubAssign, sub_assign, -;
    MulAssign, mul_assign, *;
    DivAssign, div_assign, /;
}

// --- elementary functions ---

/// Unary functions: `Dual(f(p), rule(p, f(p), t))`.
macro_rules! dual_unary {
    ($($name:ident)*) => {
        $(
            fn $name(self) -> Self {
                let fx = self.primal.$name();
                Self::new(fx, functions::$name(self.primal, fx, self.tangent))
            }
        )*
    };
}

/// Binary functions: tangent is the sum of both operands' contributions.
macro_rules! dual_binary {
    ($($name:ident => $da:ident, $db:ident;)*) => {
        $(
            fn $name(self, other: Self) -> Self {
                let (x, y) = (self.primal, other.primal);
                let fx = x.$name(y);
                Self::new(
                    fx,
                    functions::$da(x, y, fx, self.tangent)
                        + functions::$db(x, y, fx, other.tangent),
                )
            }
        )*
    };
}

impl<T: Real> Real for Dual<T> {
    fn value_of(&self) -> f64 {
        self.primal.value_of()
    }

    dual_unary! {
        sqrt cbrt square recip inv_sqrt
        exp exp2 expm1 ln log2 log10 log1p log1m log1p_exp
        sin cos tan asin acos atan
        sinh cosh tanh asinh acosh atanh
        inv_logit logit
        abs floor ceil round trunc
    }

    dual_binary! {
        pow => pow_da, pow_db;
        hypot => hypot_da, hypot_db;
        log_sum_exp => log_sum_exp_da, log_sum_exp_db;
        atan2 => atan2_da, atan2_db;
    }

    fn powi(self, n: i32) -> Self {
        Self::new(self.primal.powi(n), functions::powi(self.primal, n, self.tangent))
    }

    fn powf(self, e: f64) -> Self {
        Self::new(self.primal.powf(e), functions::powf(self.primal, e, self.tangent))
    }
}
