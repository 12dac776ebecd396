/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Algebraic identities, checked on random matrices.

#[macro_use]
extern crate densemat_assert_close;
extern crate densemat;
extern crate rand;

use densemat::prelude::*;

const TRIALS: usize = 20;

fn uniform() -> f64 { (rand::random::<f64>() - 0.5) * 2.0 }

// Diagonally dominant, so comfortably invertible.
fn random_invertible<M: Copy + ::std::ops::Add<Output=M>>(random: M, eye: M, n: usize) -> M {
    let mut out = random;
    for _ in 0..n {
        out = out + eye;
    }
    out
}

#[test]
fn inverse_times_self_is_identity() {
    for _ in 0..TRIALS {
        let m = random_invertible(M22::from_fn(|_, _| uniform()), M22::IDENTITY, 2);
        assert_close!(abs=1e-12, m * m.inv().unwrap(), M22::IDENTITY);
        assert_close!(abs=1e-12, m.inv().unwrap() * m, M22::IDENTITY);

        let m = random_invertible(M33::from_fn(|_, _| uniform()), M33::IDENTITY, 3);
        assert_close!(abs=1e-12, m * m.inv().unwrap(), M33::IDENTITY);
        assert_close!(abs=1e-12, m.inv().unwrap() * m, M33::IDENTITY);

        let m = random_invertible(M44::from_fn(|_, _| uniform()), M44::IDENTITY, 4);
        assert_close!(abs=1e-12, m * m.inv().unwrap(), M44::IDENTITY);
        assert_close!(abs=1e-12, m.inv().unwrap() * m, M44::IDENTITY);
        assert_close!(rel=1e-10, m.inv().unwrap().det(), 1.0 / m.det());
    }
}

#[test]
fn transpose_reverses_products() {
    for _ in 0..TRIALS {
        let a = M23::from_fn(|_, _| uniform());
        let b = M34::from_fn(|_, _| uniform());
        let c = M42::from_fn(|_, _| uniform());

        assert_close!(abs=1e-12, (a * b).t(), b.t() * a.t());
        assert_close!(abs=1e-12, (b * c).t(), c.t() * b.t());
        assert_close!(abs=1e-12, (a * b * c).t(), c.t() * b.t() * a.t());

        assert_eq!(a.t().t(), a);
        assert_eq!(b.t().t(), b);
        assert_eq!(c.t().t(), c);
    }
}

#[test]
fn products_are_associative() {
    for _ in 0..TRIALS {
        let a = M32::from_fn(|_, _| uniform());
        let b = M24::from_fn(|_, _| uniform());
        let c = M43::from_fn(|_, _| uniform());
        let v = V3::from_fn(|_| uniform());

        assert_close!(abs=1e-12, (a * b) * c, a * (b * c));
        assert_close!(abs=1e-12, (v * &a) * &b, v * &(a * b));
        assert_close!(abs=1e-12, &(b * c) * a.col(0), &b * (&c * a.col(0)));
    }
}

#[test]
fn lazy_matches_eager() {
    for _ in 0..TRIALS {
        let a = M42::from_fn(|_, _| uniform());
        let b = M23::from_fn(|_, _| uniform());
        let c = M33::from_fn(|_, _| uniform());
        let d = M32::from_fn(|_, _| uniform());

        let tree = lazy(a) * b * c * d;
        let lazy_result: M42 = tree.narrow().unwrap();
        assert_close!(abs=1e-12, lazy_result, a * (b * (c * d)));
        assert_close!(abs=1e-12, tree.evaluate().unwrap(), DynMatrix::from(((a * b) * c) * d));
    }
}

#[test]
fn determinant_is_multiplicative() {
    for _ in 0..TRIALS {
        let a = M44::from_fn(|_, _| uniform());
        let b = M44::from_fn(|_, _| uniform());
        assert_close!(abs=1e-12, (a * b).det(), a.det() * b.det());
        assert_close!(abs=1e-12, a.t().det(), a.det());

        let a = M33::from_fn(|_, _| uniform());
        let b = M33::from_fn(|_, _| uniform());
        assert_close!(abs=1e-12, (a * b).det(), a.det() * b.det());
    }
}

#[test]
fn rotations_are_orthonormal() {
    for _ in 0..TRIALS {
        let axis = V3::from_fn(|_| uniform()) + V3([0.0, 0.0, 2.0]);
        let m = M44::rotation_axis(axis, Rad(uniform() * 3.0)).unwrap();
        assert_close!(abs=1e-12, m * m.t(), M44::IDENTITY);
        assert_close!(abs=1e-12, m.det(), 1.0);

        // the axis is fixed
        let moved = axis.extend(1.0) * &m;
        assert_close!(abs=1e-12, moved, axis.extend(1.0));
    }
}

#[test]
fn small_matrices_pad_with_identity() {
    let (a, b, c, d) = (uniform(), uniform(), uniform(), uniform());
    let small = mat::from_array([[a, b], [c, d]]);
    assert_eq!(M44::from_source(&small).unwrap(), mat::from_array([
        [  a,   b, 0.0, 0.0],
        [  c,   d, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]));
    assert_eq!(DynMatrix::adapted(4, 4, &small).unwrap(), DynMatrix::from(M44::from_source(&small).unwrap()));
}

#[test]
fn failures() {
    match M22::from_flat(&[1.0, 2.0, 3.0]) {
        Err(MatrixError::TooFewElements { expected: 4, actual: 3, .. }) => {},
        r => panic!("{:?}", r),
    }
    match M33::<f64>::zero().inv() {
        Err(MatrixError::Singular { .. }) => {},
        r => panic!("{:?}", r),
    }
}

#[test]
fn transform_landmarks() {
    let v = V3([1.0, 0.0, 0.0]) * &M33::rotation_z(Deg(90.0));
    assert_close!(abs=1e-15, v, V3([0.0, 1.0, 0.0]));
    assert_eq!(&M44::scale(V3([2.0, 3.0, 4.0])) * V4([1.0, 1.0, 1.0, 1.0]), V4([2.0, 3.0, 4.0, 1.0]));
}
