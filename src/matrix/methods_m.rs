/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small fixed-size matrix types, compatible with `V2`/`V3`/`V4`.
//!
//! Matrices are containers of row vectors, and the data is row-major.
//! Transforms use the row-vector convention (`v * M`), so most
//! matrix-vector multiplication has the matrix on the right.

use crate::traits::{Semiring, Ring, Field};
use crate::traits::internal::{PrimitiveSemiring, PrimitiveRing, PrimitiveFloat};
use crate::types::*;
use crate::vee;
use crate::error::MatrixError;
use crate::config::Precision;

use num_traits::{Zero, One};
use slice_of_array::prelude::*;


/// Construct a matrix from a function on indices.
///
/// The shape of the matrix will be inferred solely from how it
/// is used.  There is also a static method form of this for
/// easily supplying a type hint. (e.g. `M33::from_fn`)
#[inline(always)]
pub fn from_fn<M: FromFn<F>, B, F>(f: F) -> M
where F: FnMut(usize, usize) -> B,
{ FromFn::from_fn(f) }

/// Construct a matrix from a 2D array (of rows).
///
/// Type inference works in the forward direction; the shape of the
/// matrix is decided by the array.
#[inline(always)]
pub fn from_array<A: IntoMatrix>(arr: A) -> A::Matrix
{ arr.into_matrix() }

/// Construct an identity matrix (using type inference).
#[inline(always)]
pub fn eye<M: One + IsMatrix>() -> M
{ One::one() }

/// Construct a zero matrix (using type inference).
#[inline(always)]
pub fn zero<M: Zero + IsMatrix>() -> M
{ Zero::zero() }

/// Matrix inverse, using the default `Precision`.
#[inline(always)]
pub fn inv<M: Inv>(m: &M) -> Result<M, MatrixError>
{ Inv::inv_with(m, &Precision::default()) }

// Square matrices
gen_each!{
    @{Mnn_Mn_Vn_n}
    square_inherent!(
        {$Mnn:ident $Mn:ident $Vn:ident $n:tt}
    ) => {
        impl<X> $Mnn<X> {
            /// Construct the identity matrix.
            #[inline(always)]
            pub fn eye() -> Self
            where Self: One,
            { One::one() }

            /// Matrix determinant.
            #[inline(always)]
            pub fn det(&self) -> DetT<Self>
            where Self: Det,
            { Det::det(self) }

            /// Sum of the diagonal.
            #[inline]
            pub fn trace(&self) -> X
            where X: Semiring + PrimitiveSemiring,
            { (0..$n).map(|i| self[i][i]).sum() }

            /// Matrix inverse.
            ///
            /// Fails with `Singular` when the magnitude of the determinant is
            /// below `Precision::default().singular_epsilon`, or when it
            /// is not finite.
            #[inline(always)]
            pub fn inv(&self) -> Result<Self, MatrixError>
            where Self: Inv,
            { Inv::inv_with(self, &Precision::default()) }

            /// Matrix inverse, with an explicit singularity threshold.
            #[inline(always)]
            pub fn inv_with(&self, precision: &Precision) -> Result<Self, MatrixError>
            where Self: Inv,
            { Inv::inv_with(self, precision) }

            /// Divide every element by the determinant.
            ///
            /// This is not an orthonormalization; a singular matrix produces
            /// infinities or NaNs.
            #[inline]
            pub fn normalize(&self) -> Self
            where Self: Det<Output=X>, X: Field + PrimitiveFloat,
            {
                let det = self.det();
                self.map(|x| x / det)
            }
        }

        impl $Mnn<f64> {
            /// The identity matrix.
            pub const IDENTITY: Self = {
                let mut rows = [$Vn([0.0; $n]); $n];
                let mut i = 0;
                while i < $n {
                    rows[i].0[i] = 1.0;
                    i += 1;
                }
                $Mn(rows)
            };
        }
    }
}

// General rectangular.
gen_each!{
    @{Mn_n}
    @{Vn_n}
    rect_inherent!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X> $Mr<$Vc<X>> {
            /// Number of rows.
            pub const ROWS: usize = $r;
            /// Number of columns.
            pub const COLUMNS: usize = $c;

            /// Construct the zero matrix.
            #[inline(always)]
            pub fn zero() -> Self
            where Self: Zero,
            { Zero::zero() }

            /// Construct a matrix from a function on `(row, column)`.
            #[inline]
            pub fn from_fn<F>(mut f: F) -> Self
            where F: FnMut(usize, usize) -> X,
            {
                $Mr(::std::array::from_fn(|r| {
                    $Vc(::std::array::from_fn(|c| f(r, c)))
                }))
            }

            /// Construct from row-major data.
            ///
            /// Values beyond the first `ROWS * COLUMNS` are ignored.
            pub fn from_flat(data: &[X]) -> Result<Self, MatrixError>
            where X: Copy,
            {
                let expected = $r * $c;
                if data.len() < expected {
                    return Err(MatrixError::TooFewElements {
                        rows: $r,
                        columns: $c,
                        expected,
                        actual: data.len(),
                    });
                }
                let rows: &[[X; $c]] = data[..expected].nest();
                Ok(Self::from_fn(|r, c| rows[r][c]))
            }

            /// Cast into a plain `[[T; c]; r]`.
            #[inline(always)]
            pub fn into_array(self) -> [[X; $c]; $r]
            { self.0.map(|row| row.0) }

            /// Row-major copy of the data.
            #[inline]
            pub fn to_flat(&self) -> [X; $r * $c]
            where X: Copy,
            { ::std::array::from_fn(|i| self.0[i / $c].0[i % $c]) }

            /// Copy of a row.
            #[inline(always)]
            pub fn row(&self, r: usize) -> $Vc<X>
            where X: Copy,
            { self.0[r] }

            /// Copy of a column.
            #[inline]
            pub fn col(&self, c: usize) -> V![$r, X]
            where X: Copy,
            { <V![$r, X]>::from_fn(|r| self.0[r].0[c]) }

            /// Checked element access.
            #[inline]
            pub fn try_get(&self, row: usize, column: usize) -> Result<X, MatrixError>
            where X: Copy,
            {
                self.0.get(row)
                    .and_then(|v| v.0.get(column))
                    .cloned()
                    .ok_or(MatrixError::IndexOutOfRange { row, column, rows: $r, columns: $c })
            }

            /// Checked element assignment.
            #[inline]
            pub fn try_set(&mut self, row: usize, column: usize, value: X) -> Result<(), MatrixError>
            {
                match self.0.get_mut(row).and_then(|v| v.0.get_mut(column)) {
                    Some(x) => { *x = value; Ok(()) },
                    None => Err(MatrixError::IndexOutOfRange { row, column, rows: $r, columns: $c }),
                }
            }

            /// Matrix transpose.
            #[inline(always)]
            pub fn t(&self) -> TransposeT<Self>
            where Self: Transpose,
            { Transpose::t(self) }

            /// Map each scalar element of a matrix.
            #[inline]
            pub fn map<B, F>(self, mut f: F) -> $Mr<$Vc<B>>
            where F: FnMut(X) -> B,
            { $Mr(self.0.map(|row| row.map(&mut f))) }
        }

        impl $Mr<$Vc<f64>> {
            /// The zero matrix.
            pub const ZERO: Self = $Mr([$Vc([0.0; $c]); $r]);
        }
    }
}

// ---------------------------------------------------------------------------
// helper traits

/// Marker for the fixed-size matrix types, so that `mat::eye` and
/// `mat::zero` can't be used to build other `One`/`Zero` types.
pub trait IsMatrix: Sized { }

/// Backs `mat::from_fn`.
pub trait FromFn<F>: Sized {
    fn from_fn(f: F) -> Self;
}

/// Backs `mat::from_array`.
pub trait IntoMatrix: Sized {
    type Matrix;

    fn into_matrix(self) -> Self::Matrix;
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    rect_traits!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X> IsMatrix for $Mr<$Vc<X>> { }

        impl<X, F> FromFn<F> for $Mr<$Vc<X>>
        where F: FnMut(usize, usize) -> X,
        {
            #[inline(always)]
            fn from_fn(f: F) -> Self
            { <$Mr<$Vc<X>>>::from_fn(f) }
        }

        impl<X> IntoMatrix for [[X; $c]; $r] {
            type Matrix = $Mr<$Vc<X>>;

            #[inline(always)]
            fn into_matrix(self) -> Self::Matrix
            { $Mr(self.map($Vc)) }
        }

        impl<X: Semiring> Zero for $Mr<$Vc<X>>
        where X: PrimitiveSemiring,
        {
            #[inline]
            fn zero() -> Self
            { $Mr([$Vc([X::zero(); $c]); $r]) }

            #[inline]
            fn is_zero(&self) -> bool
            { self.0.iter().all(|row| row.is_zero()) }
        }
    }
}

gen_each!{
    @{Mnn_Mn_Vn_n}
    square_one!(
        {$Mnn:ident $Mn:ident $Vn:ident $n:tt}
    ) => {
        impl<X: Semiring> One for $Mnn<X>
        where X: PrimitiveSemiring,
        {
            #[inline]
            fn one() -> Self
            { Self::from_fn(|r, c| if r == c { X::one() } else { X::zero() }) }
        }
    }
}

// ---------------------------------------------------------------------------

/// Scalar type of a determinant.
pub type DetT<A> = <A as Det>::Output;

/// Backs `{M22,M33,M44}::det`; callers should use the inherent method.
pub trait Det {
    type Output;

    fn det(&self) -> Self::Output;
}

impl<T: Ring> Det for M22<T>
where T: PrimitiveRing,
{
    type Output = T;

    fn det(&self) -> T {
        let [[a, b], [c, d]] = self.into_array();
        a * d - b * c
    }
}

impl<T: Ring> Det for M33<T>
where T: PrimitiveRing,
{
    type Output = T;

    fn det(&self) -> T {
        let [
            [a0, a1, a2],
            [b0, b1, b2],
            [c0, c1, c2],
        ] = self.into_array();

        T::zero()
        + a0 * b1 * c2
        + a1 * b2 * c0
        + a2 * b0 * c1
        - a0 * b2 * c1
        - a1 * b0 * c2
        - a2 * b1 * c0
    }
}

impl<T: Ring> Det for M44<T>
where T: PrimitiveRing,
{
    type Output = T;

    // Laplace expansion along the first row. The 3x3 minors all share
    // their bottom two rows, so only six distinct 2x2 minors are needed.
    fn det(&self) -> T {
        let [
            [a, b, c, d],
            [e, f, g, h],
            [i, j, k, l],
            [m, n, o, p],
        ] = self.into_array();

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        T::zero()
        + a * (f * kp_lo - g * jp_ln + h * jo_kn)
        - b * (e * kp_lo - g * ip_lm + h * io_km)
        + c * (e * jp_ln - f * ip_lm + h * in_jm)
        - d * (e * jo_kn - f * io_km + g * in_jm)
    }
}

// ---------------------------------------------------------------------------

/// Backs `inv` and `inv_with` on the square matrices.
pub trait Inv: Sized {
    fn inv_with(&self, precision: &Precision) -> Result<Self, MatrixError>;
}

fn check_invertible<T: PrimitiveFloat>(det: T, precision: &Precision) -> Result<T, MatrixError> {
    let value = det.to_f64();
    let epsilon = precision.singular_epsilon;
    if !value.is_finite() || value.abs() < epsilon {
        debug!("refusing to invert matrix with determinant {:e} (epsilon {:e})", value, epsilon);
        return Err(MatrixError::Singular { det: value, epsilon });
    }
    Ok(det)
}

impl<T: Field> Inv for M22<T>
where T: PrimitiveFloat,
{
    fn inv_with(&self, precision: &Precision) -> Result<Self, MatrixError> {
        let det = check_invertible(self.det(), precision)?;
        let [[a, b], [c, d]] = self.into_array();
        Ok(from_array([[d, -b], [-c, a]]).map(|x| x / det))
    }
}

impl<T: Field> Inv for M33<T>
where T: PrimitiveFloat,
{
    fn inv_with(&self, precision: &Precision) -> Result<Self, MatrixError> {
        // cyclic index shifts produce the cofactor signs for free in 3D
        let cofactors = M33::from_fn(|r, c| {
            self[(r+1) % 3][(c+1) % 3] * self[(r+2) % 3][(c+2) % 3]
            - self[(r+1) % 3][(c+2) % 3] * self[(r+2) % 3][(c+1) % 3]
        });
        let det = check_invertible(vee::dot(&self[0], &cofactors[0]), precision)?;
        Ok(M33::from_fn(|r, c| cofactors[c][r] / det))
    }
}

impl<T: Field> Inv for M44<T>
where T: PrimitiveFloat,
{
    fn inv_with(&self, precision: &Precision) -> Result<Self, MatrixError> {
        let det = check_invertible(self.det(), precision)?;

        // indices of the rows (or columns) that survive deleting `i`
        fn others(i: usize) -> [usize; 3] {
            match i {
                0 => [1, 2, 3],
                1 => [0, 2, 3],
                2 => [0, 1, 3],
                _ => [0, 1, 2],
            }
        }

        let cofactors = M44::from_fn(|r, c| {
            let (rows, cols) = (others(r), others(c));
            let minor = M33::from_fn(|i, j| self[rows[i]][cols[j]]).det();
            match (r + c) % 2 {
                0 => minor,
                _ => -minor,
            }
        });
        Ok(M44::from_fn(|r, c| cofactors[c][r] / det))
    }
}

// ---------------------------------------------------------------------------

/// The matrix type with rows and columns swapped.
pub type TransposeT<A> = <A as Transpose>::Output;

/// Backs `{M2,M3,M4}::t`; callers should use the inherent method.
pub trait Transpose {
    type Output;

    fn t(&self) -> Self::Output;
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    rect_transpose!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl<X: Copy> Transpose for $Mr<$Vc<X>> {
            type Output = M![$c, V![$r, X]];

            #[inline]
            fn t(&self) -> Self::Output
            { <M![$c, V![$r, X]]>::from_fn(|r, c| self[c][r]) }
        }
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_eye() {
        assert_eq!(from_array([[0, 0], [0, 0]]), M22::zero());
        assert_eq!(from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1]]), M33::eye());
        assert_eq!(M44::<f64>::eye(), M44::IDENTITY);
        assert_eq!(M34::<f64>::zero(), M34::ZERO);
        assert!(!from_array([[0, 1], [0, 0]]).is_one());
        assert!(M22::<i32>::eye().is_one());
        assert!(M23::<u8>::zero().is_zero());
    }

    #[test]
    fn consts_are_fresh_copies() {
        let mut a = M33::IDENTITY;
        a[0][0] = 7.0;
        assert_eq!(M33::IDENTITY[0][0], 1.0);
        assert_eq!(M33::<f64>::eye(), M33::IDENTITY);
    }

    #[test]
    fn flat_round_trip() {
        let m = M23::from_flat(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(m, from_array([[1, 2, 3], [4, 5, 6]]));
        assert_eq!(m.to_flat(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(m.row(1), V3([4, 5, 6]));
        assert_eq!(m.col(2), V2([3, 6]));
    }

    #[test]
    fn flat_too_short() {
        assert_eq!(
            M22::from_flat(&[1.0, 2.0, 3.0]),
            Err(MatrixError::TooFewElements { rows: 2, columns: 2, expected: 4, actual: 3 }),
        );
    }

    #[test]
    fn checked_access() {
        let mut m = M32::<i32>::zero();
        m.try_set(2, 1, 5).unwrap();
        assert_eq!(m.try_get(2, 1), Ok(5));
        assert_eq!(m[2][1], 5);
        assert_eq!(
            m.try_get(1, 2),
            Err(MatrixError::IndexOutOfRange { row: 1, column: 2, rows: 3, columns: 2 }),
        );
        assert!(m.try_set(3, 0, 1).is_err());
    }

    #[test]
    fn transpose() {
        let m = from_array([[1, 2, 3, 4], [5, 6, 7, 8]]);
        assert_eq!(m.t(), from_array([[1, 5], [2, 6], [3, 7], [4, 8]]));
        assert_eq!(m.t().t(), m);
    }

    #[test]
    fn det_and_trace() {
        assert_eq!(from_array([[4, 7], [2, 6]]).det(), 10);
        assert_eq!(from_array([[1, 2, 3], [0, 1, 4], [5, 6, 0]]).det(), 1);
        let m = from_array([
            [1, 0, 2, -1],
            [3, 0, 0, 5],
            [2, 1, 4, -3],
            [1, 0, 5, 0],
        ]);
        assert_eq!(m.det(), 30);
        assert_eq!(m.trace(), 5);
    }

    #[test]
    fn inverse_2() {
        let actual = inv(&from_array([[4., 7.], [2., 6.]])).unwrap();
        let expected = from_array([[0.6, -0.7], [-0.2, 0.4]]);
        assert_close!(abs=1e-12, expected, actual);
    }

    #[test]
    fn inverse_3() {
        let actual = from_array([
            [1., 2., 3.],
            [0., 1., 4.],
            [5., 6., 0.],
        ]).inv().unwrap();

        let expected = from_array([
            [-24., 18.,  5.],
            [ 20., -15., -4.],
            [ -5.,  4.,  1.],
        ]);
        assert_close!(abs=1e-12, expected, actual);
    }

    #[test]
    fn inverse_4() {
        let actual = M44::from_flat(&[
            1., 0., 2., -1.,
            3., 0., 0., 5.,
            2., 1., 4., -3.,
            1., 0., 5., 0.,
        ]).unwrap().inv().unwrap();

        let expected = from_array([
            [ 5./6.,   1./6.,  0., -1./3. ],
            [-5./2.,  1./10.,  1.,  1./5. ],
            [-1./6., -1./30.,  0.,  4./15.],
            [-1./2.,  1./10.,  0.,  1./5. ],
        ]);
        assert_close!(abs=1e-12, expected, actual);
    }

    #[test]
    fn singular() {
        match M33::<f64>::zero().inv() {
            Err(MatrixError::Singular { det, .. }) => assert_eq!(det, 0.0),
            r => panic!("{:?}", r),
        }

        let nearly = from_array([[1.0, 2.0], [0.5, 1.0 + 1e-12]]);
        assert!(nearly.inv().is_ok());
        assert!(nearly.inv_with(&Precision { singular_epsilon: 1e-9 }).is_err());

        let nan = from_array([[::std::f64::NAN, 0.0], [0.0, 1.0]]);
        assert!(nan.inv().is_err());
    }

    #[test]
    fn normalize_divides_by_det() {
        let m = from_array([[4., 7.], [2., 6.]]);
        assert_close!(abs=1e-12, m.normalize(), from_array([[0.4, 0.7], [0.2, 0.6]]));
    }
}
