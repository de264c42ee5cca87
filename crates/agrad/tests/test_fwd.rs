//! Integration tests for forward mode.
//!
//! Covers first derivatives through `Dual<f64>` and second derivatives
//! through `Dual<Dual<f64>>`.

use agrad::{Dual, Real, functional};
use approx::assert_relative_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_sin_first_derivative() {
    init_logger();
    let x: Dual<f64> = Dual::new(0.5, 1.0);

    let a = x.sin();
    assert_relative_eq!(a.primal, 0.5_f64.sin());
    assert_relative_eq!(a.tangent, 0.5_f64.cos());

    let b = 2.0 * x.sin() + 4.0;
    assert_relative_eq!(b.primal, 2.0 * 0.5_f64.sin() + 4.0);
    assert_relative_eq!(b.tangent, 2.0 * 0.5_f64.cos());

    let c = -x.sin() + 5.0;
    assert_relative_eq!(c.primal, -(0.5_f64.sin()) + 5.0);
    assert_relative_eq!(c.tangent, -(0.5_f64.cos()));

    let d = -3.0 * x.sin() + 5.0 * x;
    assert_relative_eq!(d.primal, -3.0 * 0.5_f64.sin() + 5.0 * 0.5);
    assert_relative_eq!(d.tangent, -3.0 * 0.5_f64.cos() + 5.0);

    let e = Dual::<f64>::new(-0.5, 1.0).sin();
    assert_relative_eq!(e.primal, (-0.5_f64).sin());
    assert_relative_eq!(e.tangent, (-0.5_f64).cos());

    let f = Dual::<f64>::new(0.0, 1.0).sin();
    assert_eq!(f.primal, 0.0);
    assert_eq!(f.tangent, 1.0);
}

#[test]
fn test_expm1_first_derivative() {
    init_logger();
    let x: Dual<f64> = Dual::new(0.5, 1.0);

    let a = x.expm1();
    assert_relative_eq!(a.primal, 0.5_f64.exp_m1());
    assert_relative_eq!(a.tangent, 0.5_f64.exp());

    let b = 2.0 * x.expm1() + 4.0;
    assert_relative_eq!(b.primal, 2.0 * 0.5_f64.exp_m1() + 4.0);
    assert_relative_eq!(b.tangent, 2.0 * 0.5_f64.exp());

    let c = -x.expm1() + 5.0;
    assert_relative_eq!(c.primal, -(0.5_f64.exp_m1()) + 5.0);
    assert_relative_eq!(c.tangent, -(0.5_f64.exp()));

    let d = -3.0 * (-x).expm1() + 5.0 * x;
    assert_relative_eq!(d.primal, -3.0 * (-0.5_f64).exp_m1() + 5.0 * 0.5);
    assert_relative_eq!(d.tangent, 3.0 * (-0.5_f64).exp() + 5.0);

    let e = Dual::<f64>::new(-0.5, 1.0).expm1();
    assert_relative_eq!(e.primal, (-0.5_f64).exp_m1());
    assert_relative_eq!(e.tangent, (-0.5_f64).exp());

    let f = Dual::<f64>::new(0.0, 1.0).expm1();
    assert_eq!(f.primal, 0.0);
    assert_eq!(f.tangent, 1.0);
}

#[test]
fn test_nested_sin_inner_seed() {
    // Seed on the inner tangent only: the outer tangent stays zero.
    let x: Dual<Dual<f64>> = Dual::new(Dual::new(1.5, 2.0), Dual::new(0.0, 0.0));
    let a = x.sin();

    assert_relative_eq!(a.primal.primal, 1.5_f64.sin());
    assert_relative_eq!(a.primal.tangent, 2.0 * 1.5_f64.cos());
    assert_relative_eq!(a.tangent.primal, 0.0);
    assert_relative_eq!(a.tangent.tangent, 0.0);
}

#[test]
fn test_nested_sin_outer_seed() {
    let y: Dual<Dual<f64>> = Dual::new(Dual::new(1.5, 0.0), Dual::new(2.0, 0.0));
    let a = y.sin();

    assert_relative_eq!(a.primal.primal, 1.5_f64.sin());
    assert_relative_eq!(a.primal.tangent, 0.0);
    assert_relative_eq!(a.tangent.primal, 2.0 * 1.5_f64.cos());
    assert_relative_eq!(a.tangent.tangent, 0.0);
}

#[test]
fn test_nested_expm1() {
    let x: Dual<Dual<f64>> = Dual::new(Dual::new(0.5, 1.0), Dual::new(0.0, 0.0));
    let a = x.expm1();
    assert_relative_eq!(a.primal.primal, 0.5_f64.exp_m1());
    assert_relative_eq!(a.primal.tangent, 0.5_f64.exp());
    assert_relative_eq!(a.tangent.primal, 0.0);
    assert_relative_eq!(a.tangent.tangent, 0.0);

    let y: Dual<Dual<f64>> = Dual::new(Dual::new(0.5, 0.0), Dual::new(1.0, 0.0));
    let b = y.expm1();
    assert_relative_eq!(b.primal.primal, 0.5_f64.exp_m1());
    assert_relative_eq!(b.primal.tangent, 0.0);
    assert_relative_eq!(b.tangent.primal, 0.5_f64.exp());
    assert_relative_eq!(b.tangent.tangent, 0.0);
}

#[test]
fn test_nested_both_seeds_give_second_derivative() {
    let x: Dual<Dual<f64>> = Dual::new(Dual::new(1.5, 1.0), Dual::new(1.0, 0.0));
    let a = x.sin();
    assert_relative_eq!(a.primal.tangent, 1.5_f64.cos());
    assert_relative_eq!(a.tangent.primal, 1.5_f64.cos());
    assert_relative_eq!(a.tangent.tangent, -(1.5_f64.sin()));

    let (_, d1, d2) = functional::second_derivative(|x| x.expm1() * x, 0.5);
    let e = 0.5_f64.exp();
    assert_relative_eq!(d1, e * 0.5 + 0.5_f64.exp_m1(), epsilon = 1e-12);
    assert_relative_eq!(d2, e * 0.5 + 2.0 * e, epsilon = 1e-12);
}

#[test]
fn test_third_order() {
    // d^3/dx^3 x^4 = 24 x
    type D3 = Dual<Dual<Dual<f64>>>;
    let x: D3 = Dual::new(
        Dual::new(Dual::new(2.0, 1.0), Dual::new(1.0, 0.0)),
        Dual::new(Dual::new(1.0, 0.0), Dual::new(0.0, 0.0)),
    );
    let y = x.powi(4);
    assert_relative_eq!(y.primal.primal.primal, 16.0);
    assert_relative_eq!(y.tangent.primal.primal, 32.0);
    assert_relative_eq!(y.tangent.tangent.primal, 48.0);
    assert_relative_eq!(y.tangent.tangent.tangent, 48.0);
}
