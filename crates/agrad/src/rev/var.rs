//! Var - reverse-mode handle to a node on a [`Tape`].
//!
//! Every arithmetic operation or elementary function on a `Var` appends one
//! node holding the primal result and the local partial derivative towards
//! each operand. Partials come from the same derivative rules forward mode
//! uses, evaluated at a unit tangent.

use std::fmt::{self, Debug};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::tape::Tape;
use crate::error::AdError;
use crate::functions;
use crate::real::Real;
use crate::scalar::Scalar;

/// Handle to a node on a [`Tape`].
///
/// A `Var` is a cheap `Copy` index. It borrows its tape, so it cannot outlive
/// the tape or survive a [`Tape::reset`].
#[derive(Clone, Copy)]
pub struct Var<'t, S: Scalar = f64> {
    pub(crate) tape: &'t Tape<S>,
    pub(crate) index: u32,
}

impl<'t, S: Scalar> Var<'t, S> {
    pub(crate) fn from_index(tape: &'t Tape<S>, index: u32) -> Self {
        Self { tape, index }
    }

    /// Primal value.
    pub fn value(&self) -> S {
        self.tape.arena().values[self.index as usize]
    }

    /// Adjoint accumulated by the last reverse sweep.
    pub fn adjoint(&self) -> S {
        self.tape.arena().adjoints[self.index as usize]
    }

    /// Position of the node on its tape.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The tape this handle belongs to.
    pub fn tape(&self) -> &'t Tape<S> {
        self.tape
    }

    /// Gradient of `self` with respect to `params`; see [`Tape::grad`].
    pub fn grad(&self, params: &[Var<'t, S>]) -> Result<Vec<S>, AdError> {
        self.tape.grad(*self, params)
    }

    pub(crate) fn unary(self, value: S, partial: S) -> Self {
        self.tape.push(value, [(self.index, partial)])
    }

    pub(crate) fn binary(self, other: Self, value: S, da: S, db: S) -> Self {
        assert!(
            std::ptr::eq(self.tape, other.tape),
            "operands were recorded on different tapes"
        );
        self.tape.push(value, [(self.index, da), (other.index, db)])
    }
}

impl<S: Scalar> PartialEq for Var<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tape, other.tape) && self.index == other.index
    }
}

impl<S: Scalar> Eq for Var<'_, S> {}

impl<S: Scalar> Debug for Var<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Var");
        s.field("index", &self.index);
        match self.tape.try_arena() {
            Some(arena) => s.field("value", &arena.values[self.index as usize]).finish(),
            None => s.finish_non_exhaustive(),
        }
    }
}

// --- Var ∘ Var ---

impl<S: Scalar> Add for Var<'_, S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value() + rhs.value();
        self.binary(rhs, value, S::one(), S::one())
    }
}

impl<S: Scalar> Sub for Var<'_, S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let value = self.value() - rhs.value();
        self.binary(rhs, value, S::one(), -S::one())
    }
}

impl<S: Scalar> Mul for Var<'_, S> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.value(), rhs.value());
        self.binary(rhs, a * b, b, a)
    }
}

impl<S: Scalar> Div for Var<'_, S> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let (a, b) = (self.value(), rhs.value());
        let fx = a / b;
        self.binary(rhs, fx, b.recip(), -(fx / b))
    }
}

impl<S: Scalar> Neg for Var<'_, S> {
    type Output = Self;

    fn neg(self) -> Self {
        self.unary(-self.value(), -S::one())
    }
}

// --- Var ∘ f64 ---

impl<S: Scalar> Add<f64> for Var<'_, S> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.unary(self.value() + rhs, S::one())
    }
}

impl<S: Scalar> Sub<f64> for Var<'_, S> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.unary(self.value() - rhs, S::one())
    }
}

impl<S: Scalar> Mul<f64> for Var<'_, S> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.unary(self.value() * rhs, S::from_f64(rhs))
    }
}

impl<S: Scalar> Div<f64> for Var<'_, S> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.unary(self.value() / rhs, S::from_f64(rhs.recip()))
    }
}

// --- f64 ∘ Var ---

impl<'t, S: Scalar> Add<Var<'t, S>> for f64 {
    type Output = Var<'t, S>;

    fn add(self, rhs: Var<'t, S>) -> Var<'t, S> {
        rhs + self
    }
}

impl<'t, S: Scalar> Sub<Var<'t, S>> for f64 {
    type Output = Var<'t, S>;

    fn sub(self, rhs: Var<'t, S>) -> Var<'t, S> {
        rhs.unary(S::from_f64(self) - rhs.value(), -S::one())
    }
}

impl<'t, S: Scalar> Mul<Var<'t, S>> for f64 {
    type Output = Var<'t, S>;

    fn mul(self, rhs: Var<'t, S>) -> Var<'t, S> {
        rhs * self
    }
}

impl<'t, S: Scalar> Div<Var<'t, S>> for f64 {
    type Output = Var<'t, S>;

    fn div(self, rhs: Var<'t, S>) -> Var<'t, S> {
        let b = rhs.value();
        let fx = S::from_f64(self) / b;
        rhs.unary(fx, -(fx / b))
    }
}

macro_rules! impl_assign_ops {
    ($($trait:ident, $method:ident, $op:tt;)*) => {
        $(
            impl<S: Scalar> $trait for Var<'_, S> {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl<S: Scalar> $trait<f64> for Var<'_, S> {
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

macro_rules! var_unary {
    ($($name:ident)*) => {
        $(
            fn $name(self) -> Self {
                let x = self.value();
                let fx = x.$name();
                self.unary(fx, functions::$name(x, fx, S::one()))
            }
        )*
    };
}

macro_rules! var_binary {
    ($($name:ident => $da:ident, $db:ident;)*) => {
        $(
            fn $name(self, other: Self) -> Self {
                let (x, y) = (self.value(), other.value());
                let fx = x.$name(y);
                self.binary(
                    other,
                    fx,
                    functions::$da(x, y, fx, S::one()),
                    functions::$db(x, y, fx, S::one()),
                )
            }
        )*
    };
}

impl<S: Scalar> Real for Var<'_, S> {
    fn value_of(&self) -> f64 {
        self.value().value_of()
    }

    var_unary! {
        sqrt cbrt square recip inv_sqrt
        exp exp2 expm1 ln log2 log10 log1p log1m log1p_exp
        sin cos tan asin acos atan
        sinh cosh tanh asinh acosh atanh
        inv_logit logit
        abs floor ceil round trunc
    }

    var_binary! {
        pow => pow_da, pow_db;
        hypot => hypot_da, hypot_db;
        log_sum_exp => log_sum_exp_da, log_sum_exp_db;
        atan2 => atan2_da, atan2_db;
    }

    fn powi(self, n: i32) -> Self {
        let x = self.value();
        self.unary(x.powi(n), functions::powi(x, n, S::one()))
    }

    fn powf(self, e: f64) -> Self {
        let x = self.value();
        self.unary(x.powf(e), functions::powf(x, e, S::one()))
    }

    /// One node with a unit partial per term.
    fn sum_of(terms: &[Self]) -> Option<Self> {
        let (first, rest) = terms.split_first()?;
        let tape = first.tape;
        let mut value = first.value();
        for t in rest {
            value = value + t.value();
        }
        let edges: Vec<_> = terms.iter().map(|&t| (t, S::one())).collect();
        Some(tape.allocate(value, &edges))
    }

    /// One node with two edges per pair.
    fn dot_of(a: &[Self], b: &[Self]) -> Option<Self> {
        let n = a.len().min(b.len());
        if n == 0 {
            return None;
        }
        let tape = a[0].tape;
        let av: Vec<S> = a[..n].iter().map(Var::value).collect();
        let bv: Vec<S> = b[..n].iter().map(Var::value).collect();
        let mut value = av[0] * bv[0];
        for i in 1..n {
            value = value + av[i] * bv[i];
        }
        let mut edges = Vec::with_capacity(2 * n);
        for i in 0..n {
            edges.push((a[i], bv[i]));
            edges.push((b[i], av[i]));
        }
        Some(tape.allocate(value, &edges))
    }
}
