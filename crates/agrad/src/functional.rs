//! Derivative drivers over closures.
//!
//! Each driver picks the number type its closure receives. Write the model
//! once against [`Real`](crate::Real) and wrap it in a closure at the call
//! site:
//!
//! ```
//! use agrad::{Real, functional};
//!
//! fn rosenbrock<T: Real>(x: &[T]) -> T {
//!     (-x[0] + 1.0).square() + (x[1] - x[0].square()).square() * 100.0
//! }
//!
//! let (fx, grad) = functional::gradient(|x| rosenbrock(x), &[1.0, 1.0]).unwrap();
//! assert_eq!(fx, 0.0);
//! assert_eq!(grad, vec![0.0, 0.0]);
//!
//! let (_, _, h) = functional::hessian(|x| rosenbrock(x), &[1.0, 1.0]).unwrap();
//! assert_eq!(h, vec![vec![802.0, -400.0], vec![-400.0, 200.0]]);
//! ```
//!
//! The reverse-mode closures are higher-ranked over the tape lifetime, so a
//! closure cannot leak a handle out of the tape the driver owns.

use log::trace;

use crate::error::AdError;
use crate::fwd::Dual;
use crate::rev::{Tape, Var};

fn check_nonempty(op: &'static str, x: &[f64]) -> Result<(), AdError> {
    if x.is_empty() {
        Err(AdError::EmptyArgument { op })
    } else {
        Ok(())
    }
}

fn check_direction(op: &'static str, x: &[f64], v: &[f64]) -> Result<(), AdError> {
    check_nonempty(op, x)?;
    if x.len() != v.len() {
        return Err(AdError::size_mismatch(op, x.len(), v.len()));
    }
    Ok(())
}

/// `(f(x), f'(x))` by forward mode.
pub fn derivative(f: impl Fn(Dual<f64>) -> Dual<f64>, x: f64) -> (f64, f64) {
    f(Dual::variable(x)).into_parts()
}

/// `(f(x), f'(x), f''(x))` by nested forward mode.
pub fn second_derivative(
    f: impl Fn(Dual<Dual<f64>>) -> Dual<Dual<f64>>,
    x: f64,
) -> (f64, f64, f64) {
    let y = f(Dual::new(Dual::new(x, 1.0), Dual::new(1.0, 0.0)));
    (y.primal.primal, y.tangent.primal, y.tangent.tangent)
}

/// `(f(x), ∇f(x))` by reverse mode on a fresh tape.
///
/// # Errors
///
/// Returns [`AdError::EmptyArgument`] if `x` is empty.
pub fn gradient<F>(f: F, x: &[f64]) -> Result<(f64, Vec<f64>), AdError>
where
    F: for<'t> Fn(&[Var<'t>]) -> Var<'t>,
{
    check_nonempty("gradient", x)?;
    let tape = Tape::new();
    let xs: Vec<_> = x.iter().map(|&xi| tape.var(xi)).collect();
    let y = f(&xs);
    let grad = tape.grad(y, &xs)?;
    Ok((y.value(), grad))
}

/// `(f(x), ∇f(x) · v)` by one forward pass.
///
/// # Errors
///
/// - [`AdError::EmptyArgument`] if `x` is empty.
/// - [`AdError::SizeMismatch`] if `v` and `x` differ in length.
pub fn gradient_dot_vector(
    f: impl Fn(&[Dual<f64>]) -> Dual<f64>,
    x: &[f64],
    v: &[f64],
) -> Result<(f64, f64), AdError> {
    check_direction("gradient_dot_vector", x, v)?;
    let xs: Vec<_> = x.iter().zip(v).map(|(&xi, &vi)| Dual::new(xi, vi)).collect();
    Ok(f(&xs).into_parts())
}

/// `(f(x), J)` where `J[i][j] = ∂f_i/∂x_j`, one reverse sweep per output.
///
/// # Errors
///
/// Returns [`AdError::EmptyArgument`] if `x` is empty.
pub fn jacobian<F>(f: F, x: &[f64]) -> Result<(Vec<f64>, Vec<Vec<f64>>), AdError>
where
    F: for<'t> Fn(&[Var<'t>]) -> Vec<Var<'t>>,
{
    check_nonempty("jacobian", x)?;
    let tape = Tape::new();
    let xs: Vec<_> = x.iter().map(|&xi| tape.var(xi)).collect();
    let ys = f(&xs);
    let jac = tape.jacobian(&ys, &xs)?;
    Ok((ys.iter().map(Var::value).collect(), jac))
}

/// `(f(x), ∇f(x), H)` by forward-over-reverse.
///
/// Column `i` of the Hessian is the gradient of the tangent of `f` seeded
/// along `e_i`; each column is one episode on a reused tape.
///
/// # Errors
///
/// Returns [`AdError::EmptyArgument`] if `x` is empty.
pub fn hessian<F>(f: F, x: &[f64]) -> Result<(f64, Vec<f64>, Vec<Vec<f64>>), AdError>
where
    F: for<'t> Fn(&[Dual<Var<'t>>]) -> Dual<Var<'t>>,
{
    check_nonempty("hessian", x)?;
    let n = x.len();
    let mut tape: Tape = Tape::new();
    let mut fx = 0.0;
    let mut grad = Vec::new();
    let mut hess = vec![vec![0.0; n]; n];

    for i in 0..n {
        let column = tape.episode(|t| -> Result<Vec<f64>, AdError> {
            let xs: Vec<Dual<Var<'_>>> = x
                .iter()
                .enumerate()
                .map(|(j, &xj)| Dual::new(t.var(xj), t.constant(if i == j { 1.0 } else { 0.0 })))
                .collect();
            let primals: Vec<_> = xs.iter().map(|d| d.primal).collect();
            let y = f(&xs);
            if i == 0 {
                fx = y.primal.value();
                grad = t.grad(y.primal, &primals)?;
            }
            trace!("hessian column {i}: {} nodes", t.len());
            t.grad(y.tangent, &primals)
        })?;
        for (j, h) in column.into_iter().enumerate() {
            hess[j][i] = h;
        }
    }
    Ok((fx, grad, hess))
}

/// `(f(x), ∇f(x), H v)` by one reverse sweep over a dual-valued tape.
///
/// # Errors
///
/// - [`AdError::EmptyArgument`] if `x` is empty.
/// - [`AdError::SizeMismatch`] if `v` and `x` differ in length.
pub fn hessian_vector_product<F>(
    f: F,
    x: &[f64],
    v: &[f64],
) -> Result<(f64, Vec<f64>, Vec<f64>), AdError>
where
    F: for<'t> Fn(&[Var<'t, Dual<f64>>]) -> Var<'t, Dual<f64>>,
{
    check_direction("hessian_vector_product", x, v)?;
    let tape: Tape<Dual<f64>> = Tape::new();
    let xs: Vec<_> = x
        .iter()
        .zip(v)
        .map(|(&xi, &vi)| tape.var(Dual::new(xi, vi)))
        .collect();
    let y = f(&xs);
    let (grad, hv) = tape.grad(y, &xs)?.into_iter().map(Dual::into_parts).unzip();
    Ok((y.value().primal, grad, hv))
}

/// Central-difference gradient, `(f(x + eps e_i) - f(x - eps e_i)) / 2 eps`.
pub fn finite_diff_gradient(f: impl Fn(&[f64]) -> f64, x: &[f64], eps: f64) -> Vec<f64> {
    let mut probe = x.to_vec();
    (0..x.len())
        .map(|i| {
            probe[i] = x[i] + eps;
            let plus = f(&probe);
            probe[i] = x[i] - eps;
            let minus = f(&probe);
            probe[i] = x[i];
            (plus - minus) / (2.0 * eps)
        })
        .collect()
}
