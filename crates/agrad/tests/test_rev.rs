//! Integration tests for reverse mode.
//!
//! Every elementary function is checked three ways at an in-domain point:
//! the tape gradient and the dual tangent against the closed-form
//! derivative, and both against a central difference.

use agrad::{Dual, Real, Tape, TapeConfig, Var, functional};
use approx::assert_relative_eq;

/// Compute numerical derivative using central difference.
fn numerical_derivative(f: impl Fn(f64) -> f64, x: f64, eps: f64) -> f64 {
    (f(x + eps) - f(x - eps)) / (2.0 * eps)
}

fn check_unary<Fv, Fd, Ff>(name: &str, x: f64, expected: f64, f_var: Fv, f_dual: Fd, f_val: Ff)
where
    Fv: for<'t> Fn(Var<'t>) -> Var<'t>,
    Fd: Fn(Dual<f64>) -> Dual<f64>,
    Ff: Fn(f64) -> f64,
{
    let tape: Tape = Tape::new();
    let v = tape.var(x);
    let y = f_var(v);
    assert_relative_eq!(y.value(), f_val(x), epsilon = 1e-15);

    let g = tape.grad(y, &[v]).unwrap();
    assert_relative_eq!(g[0], expected, epsilon = 1e-12, max_relative = 1e-12);

    let d = f_dual(Dual::new(x, 1.0));
    assert_relative_eq!(d.primal, f_val(x), epsilon = 1e-15);
    assert_relative_eq!(d.tangent, expected, epsilon = 1e-12, max_relative = 1e-12);

    let numeric = numerical_derivative(&f_val, x, 1e-5);
    assert!(
        (numeric - expected).abs() < 1e-6 * expected.abs().max(1.0),
        "{name}: numeric {numeric} vs analytic {expected}"
    );
}

macro_rules! unary {
    ($name:ident, $x:expr, $expected:expr) => {
        check_unary(
            stringify!($name),
            $x,
            $expected,
            |v| v.$name(),
            |d| d.$name(),
            |x| Real::$name(x),
        )
    };
}

#[test]
fn test_power_functions() {
    let _ = env_logger::builder().is_test(true).try_init();
    unary!(sqrt, 2.0, 0.5 / 2.0_f64.sqrt());
    unary!(cbrt, 2.0, 1.0 / (3.0 * 2.0_f64.cbrt().powi(2)));
    unary!(square, 1.5, 3.0);
    unary!(recip, 2.0, -0.25);
    unary!(inv_sqrt, 2.0, -0.5 * 2.0_f64.powf(-1.5));

    check_unary("powi", 1.5, 3.0 * 2.25, |v| v.powi(3), |d| d.powi(3), |x| x.powi(3));
    check_unary(
        "powf",
        2.0,
        0.5 / 2.0_f64.sqrt(),
        |v| v.powf(0.5),
        |d| d.powf(0.5),
        |x| x.powf(0.5),
    );
}

#[test]
fn test_exp_log_functions() {
    let e = 0.5_f64.exp();
    unary!(exp, 0.5, e);
    unary!(exp2, 0.5, 0.5_f64.exp2() * std::f64::consts::LN_2);
    unary!(expm1, 0.5, e);
    unary!(expm1, -0.5, (-0.5_f64).exp());
    unary!(expm1, 0.0, 1.0);
    unary!(ln, 2.0, 0.5);
    unary!(log2, 2.0, 1.0 / (2.0 * std::f64::consts::LN_2));
    unary!(log10, 2.0, 1.0 / (2.0 * std::f64::consts::LN_10));
    unary!(log1p, 0.5, 1.0 / 1.5);
    unary!(log1m, 0.5, -2.0);
    unary!(log1p_exp, 0.5, 1.0 / (1.0 + (-0.5_f64).exp()));
}

#[test]
fn test_trig_functions() {
    let x: f64 = 0.5;
    unary!(sin, x, x.cos());
    unary!(sin, -0.5, (-0.5_f64).cos());
    unary!(sin, 0.0, 1.0);
    unary!(cos, x, -x.sin());
    unary!(tan, x, 1.0 / x.cos().powi(2));
    unary!(asin, x, 1.0 / 0.75_f64.sqrt());
    unary!(acos, x, -1.0 / 0.75_f64.sqrt());
    unary!(atan, x, 0.8);
}

#[test]
fn test_hyperbolic_functions() {
    let x: f64 = 0.5;
    unary!(sinh, x, x.cosh());
    unary!(cosh, x, x.sinh());
    unary!(tanh, x, 1.0 - x.tanh().powi(2));
    unary!(asinh, x, 1.0 / 1.25_f64.sqrt());
    unary!(acosh, 2.0, 1.0 / 3.0_f64.sqrt());
    unary!(atanh, x, 1.0 / 0.75);
}

#[test]
fn test_logistic_functions() {
    let s = 1.0 / (1.0 + (-0.5_f64).exp());
    unary!(inv_logit, 0.5, s * (1.0 - s));
    unary!(logit, 0.3, 1.0 / (0.3 * 0.7));
}

#[test]
fn test_piecewise_functions() {
    unary!(abs, -1.5, -1.0);
    unary!(abs, 2.0, 1.0);
    unary!(floor, 1.5, 0.0);
    unary!(ceil, 1.5, 0.0);
    unary!(round, 1.3, 0.0);
    unary!(trunc, -1.7, 0.0);
}

#[test]
fn test_binary_functions() {
    let (e1, e2) = (1.0_f64.exp(), 2.0_f64.exp());
    let cases: [(&str, f64, f64, f64, f64); 4] = [
        ("pow", 2.0, 3.0, 12.0, 8.0 * 2.0_f64.ln()),
        ("hypot", 3.0, 4.0, 0.6, 0.8),
        ("log_sum_exp", 1.0, 2.0, e1 / (e1 + e2), e2 / (e1 + e2)),
        ("atan2", 1.0, 2.0, 0.4, -0.2),
    ];

    for (name, a, b, da, db) in cases {
        let tape: Tape = Tape::new();
        let x = tape.var(a);
        let y = tape.var(b);
        let z = match name {
            "pow" => x.pow(y),
            "hypot" => x.hypot(y),
            "log_sum_exp" => x.log_sum_exp(y),
            _ => x.atan2(y),
        };
        let g = tape.grad(z, &[x, y]).unwrap();
        assert_relative_eq!(g[0], da, epsilon = 1e-12);
        assert_relative_eq!(g[1], db, epsilon = 1e-12);
    }
}

#[test]
fn test_constant_operand_contributes_no_edge() {
    let tape: Tape = Tape::new();
    let x = tape.var(2.0);
    let _ = x * 3.0 + 1.0;
    assert_eq!(tape.num_edges(), 2);

    let _ = 1.0 - x;
    assert_eq!(tape.num_edges(), 3);
}

#[test]
fn test_fmax_fmin_fdim() {
    let tape: Tape = Tape::new();
    let a = tape.var(1.0);
    let b = tape.var(4.0);

    let m = a.fmax(b) * 2.0;
    assert_eq!(tape.grad(m, &[a, b]).unwrap(), vec![0.0, 2.0]);

    let m = a.fmin(b) * 2.0;
    assert_eq!(tape.grad(m, &[a, b]).unwrap(), vec![2.0, 0.0]);

    let d = b.fdim(a);
    assert_eq!(d.value(), 3.0);
    assert_eq!(tape.grad(d, &[a, b]).unwrap(), vec![-1.0, 1.0]);

    let d = a.fdim(b);
    assert_eq!(d.value(), 0.0);
    assert_eq!(tape.grad(d, &[a, b]).unwrap(), vec![0.0, 0.0]);
}

#[test]
fn test_grad_twice_returns_identical_values() {
    let tape: Tape = Tape::new();
    let x = tape.var(0.5);
    let a = x.expm1();

    let first = tape.grad(a, &[x]).unwrap();
    let second = tape.grad(a, &[x]).unwrap();
    assert_eq!(first, second);
    assert_relative_eq!(first[0], 0.5_f64.exp());
}

#[test]
fn test_non_finite_values_propagate() {
    let tape: Tape = Tape::new();
    let x = tape.var(1.0);
    let y = x.asin();
    let g = tape.grad(y, &[x]).unwrap();
    assert!(g[0].is_infinite());

    let z = tape.var(-1.0).sqrt();
    assert!(z.value().is_nan());
}

fn composite<T: Real>(x: &[T]) -> T {
    let r = x[0].hypot(x[1]);
    (r * x[2]).sin() / (x[0].square() + 1.0) + x[2].exp().log1p() - x[1].atan2(x[0])
}

#[test]
fn test_composite_gradient_matches_finite_differences() {
    let x = [0.4, -1.2, 0.9];
    let (fx, grad) = functional::gradient(|x| composite(x), &x).unwrap();
    assert_relative_eq!(fx, composite(&x), epsilon = 1e-15);

    let numeric = functional::finite_diff_gradient(|x| composite(x), &x, 1e-6);
    for (i, (&a, &n)) in grad.iter().zip(&numeric).enumerate() {
        assert_relative_eq!(a, n, epsilon = 1e-7, max_relative = 1e-7);

        let mut e = [0.0; 3];
        e[i] = 1.0;
        let (_, directional) = functional::gradient_dot_vector(|x| composite(x), &x, &e).unwrap();
        assert_relative_eq!(a, directional, epsilon = 1e-12);
    }
}

#[test]
fn test_episodes_reuse_tape() {
    let config = TapeConfig::default()
        .with_node_capacity(64)
        .with_edge_capacity(64);
    let mut tape: Tape = Tape::with_config(&config);
    for k in 1..=3 {
        let g = tape.episode(|t| {
            let x = t.var(f64::from(k));
            let y = x.powi(2) * 0.5;
            t.grad(y, &[x]).unwrap()[0]
        });
        assert_eq!(g, f64::from(k));
        assert!(tape.is_empty());
    }
}
