/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Tolerance-based comparisons for tests.
//!
//! `assert_close!` works on anything implementing [`CheckClose`]. Scalars,
//! slices, `Vec`s and arrays up to length 16 are covered here; crates with
//! their own numeric containers implement the trait for those.
//!
//! [`CheckClose`]: trait.CheckClose.html

extern crate failure;
use std::fmt;

/// Relative tolerance used when none is given.
pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// Assert that two values are close.
///
/// Tolerances are given as leading `abs=` and `rel=` arguments, in any order.
/// A missing `rel` defaults to `DEFAULT_NONZERO_TOL`, and a missing `abs` to
/// zero. Anything after the two values is a format message.
///
/// ```
/// # #[macro_use] extern crate densemat_assert_close;
/// # fn main() {
/// assert_close!(abs=1e-10, 0.1 + 0.2, 0.3);
/// assert_close!(rel=1e-8, [1.0, 2.0], [1.0, 2.0 + 1e-12], "context: {}", 3);
/// # }
/// ```
#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::__assert_close_parse!{
            tol: ($crate::DEFAULT_NONZERO_TOL, 0.0)
            rest: ($($t)*)
        }
    };
}

/// `assert_close!` in debug builds only.
#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_close!{$($t)*}
        }
    };
}

/// Assert that two values are **not** close under the given tolerances.
#[macro_export]
macro_rules! assert_not_close {
    ($($t:tt)*) => {{
        let outcome = ::std::panic::catch_unwind(|| { $crate::assert_close!{$($t)*} });
        if outcome.is_ok() {
            panic!("values were unexpectedly close");
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_parse {
    // tolerances are peeled off the front one at a time
    (tol: ($rel:expr, $abs:expr) rest: (rel = $tol:expr, $($rest:tt)*)) => {
        $crate::__assert_close_parse!{ tol: ($tol, $abs) rest: ($($rest)*) }
    };
    (tol: ($rel:expr, $abs:expr) rest: (abs = $tol:expr, $($rest:tt)*)) => {
        $crate::__assert_close_parse!{ tol: ($rel, $tol) rest: ($($rest)*) }
    };
    (tol: $tol:tt rest: ($a:expr, $b:expr $(,)*)) => {
        $crate::__assert_close_check!{ $tol ($a, $b) ("not nearly equal!") }
    };
    (tol: $tol:tt rest: ($a:expr, $b:expr, $($fmt:tt)+)) => {
        $crate::__assert_close_check!{ $tol ($a, $b) ($($fmt)+) }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_check {
    (($rel:expr, $abs:expr) ($a:expr, $b:expr) ($($fmt:tt)+)) => {{
        let (a, b) = ($a, $b);
        let tol = $crate::Tolerances { abs: $abs, rel: $rel };
        if let Err(e) = $crate::CheckClose::check_close(&a, &b, tol) {
            panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                format!($($fmt)+), tol.rel, tol.abs, a, b, e,
            );
        }
    }};
}

/// Closeness of two floats.
///
/// Same semantics as Python's `math.isclose`: the values are close if their
/// difference is below `abs`, or below `rel` times the larger magnitude.
/// Equal infinities are close; `NaN` is never close to anything.
#[inline]
pub fn is_close(a: f64, b: f64, tol: Tolerances) -> bool {
    assert!(tol.rel >= 0.0 && tol.abs >= 0.0, "negative tolerance: {:?}", tol);

    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() < tol.abs.max(tol.rel * scale)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances<T = f64> {
    pub abs: T,
    pub rel: T,
}

impl Tolerances {
    /// Purely absolute tolerance.
    pub fn abs(abs: f64) -> Self { Tolerances { abs, rel: 0.0 } }

    /// Purely relative tolerance.
    pub fn rel(rel: f64) -> Self { Tolerances { abs: 0.0, rel } }
}

/// The first pair of elements found to differ.
#[derive(Debug)]
pub struct CheckCloseError<T = f64> {
    pub values: (T, T),
    pub tol: Tolerances<T>,
}

impl<T: fmt::Debug + Send + Sync + 'static> failure::Fail for CheckCloseError<T> {}

impl<T: fmt::Debug> fmt::Display for CheckCloseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "failed at:")?;
        writeln!(f, "  left: {:?}", self.values.0)?;
        writeln!(f, " right: {:?}", self.values.1)?;
        write!(f, "   tol: {:?}", self.tol)
    }
}

/// Elementwise comparison under a tolerance.
pub trait CheckClose<Rhs: ?Sized = Self> {
    type Scalar;

    /// Test that all values of `self` and `other` are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>;
}

impl CheckClose for f64 {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError { values: (*self, *other), tol }),
        }
    }
}

// compared after widening, so one set of tolerances serves both precisions
impl CheckClose for f32 {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &f32, tol: Tolerances) -> Result<(), CheckCloseError> {
        f64::from(*self).check_close(&f64::from(*other), tol)
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<T::Scalar>>
    { (**self).check_close(*other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError<T::Scalar>> {
        assert_eq!(self.len(), other.len(), "compared sequences differ in length");
        for (a, b) in self.iter().zip(other) {
            a.check_close(b, tol)?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError<T::Scalar>>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError<T::Scalar>>
    { self[..].check_close(other, tol) }
}

macro_rules! impl_for_arrays {
    ($($n:tt)*) => {$(
        impl<T: CheckClose> CheckClose for [T; $n] {
            type Scalar = T::Scalar;

            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<T::Scalar>>
            { self[..].check_close(&other[..], tol) }
        }
    )*};
}

// up to a flattened 4x4 matrix
impl_for_arrays! { 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 }
