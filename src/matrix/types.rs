/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Deref, DerefMut};
use std::hash::{Hash, Hasher};
use std::fmt;

use crate::traits::HashScalar;

// ---------------------------------------------------------------------------

/// A 2-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct V2<X=f64>(pub [X; 2]);

/// A 3-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct V3<X=f64>(pub [X; 3]);

/// A 4-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct V4<X=f64>(pub [X; 4]);

// ---------------------------------------------------------------------------

/// A dense matrix with 2 rows and fixed width, stored as row vectors.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct M2<V>(pub [V; 2]);

/// A dense matrix with 3 rows and fixed width, stored as row vectors.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct M3<V>(pub [V; 3]);

/// A dense matrix with 4 rows and fixed width, stored as row vectors.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct M4<V>(pub [V; 4]);

/// A square dense 2x2 matrix.
///
/// Unlike the graphics-oriented helpers (which are `f64` only), the algebra
/// on this type is available for every primitive scalar.
pub type M22<X=f64> = M2<V2<X>>;
/// A dense 2x3 matrix. (2 rows, 3 columns)
pub type M23<X=f64> = M2<V3<X>>;
/// A dense 2x4 matrix. (2 rows, 4 columns)
pub type M24<X=f64> = M2<V4<X>>;
/// A dense 3x2 matrix; as a transform, a 2D affine map.
pub type M32<X=f64> = M3<V2<X>>;
/// A square dense 3x3 matrix.
pub type M33<X=f64> = M3<V3<X>>;
/// A dense 3x4 matrix. (3 rows, 4 columns)
pub type M34<X=f64> = M3<V4<X>>;
/// A dense 4x2 matrix. (4 rows, 2 columns)
pub type M42<X=f64> = M4<V2<X>>;
/// A dense 4x3 matrix. (4 rows, 3 columns)
pub type M43<X=f64> = M4<V3<X>>;
/// A square dense 4x4 matrix.
pub type M44<X=f64> = M4<V4<X>>;

// ---------------------------------------------------------------------------
// All types behave generally like their backing array type.

pub type Iter<'a, X> = std::slice::Iter<'a, X>;
pub type IterMut<'a, X> = std::slice::IterMut<'a, X>;

gen_each!{
    [
        {V2 X 2} {V3 X 3} {V4 X 4}
        {M2 V 2} {M3 V 3} {M4 V 4}
    ]
    for_each!(
        {$Cn:ident $T:ident $n:tt}
    ) => {
        impl<$T> Deref for $Cn<$T> {
            type Target = [$T; $n];

            #[inline(always)]
            fn deref(&self) -> &Self::Target
            { &self.0 }
        }

        impl<$T> DerefMut for $Cn<$T> {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut Self::Target
            { &mut self.0 }
        }

        // Fix a paper cut not solved by Deref, which is that many methods
        // take `I: IntoIterator`.
        impl<'a, $T> IntoIterator for &'a $Cn<$T> {
            type Item = &'a $T;
            type IntoIter = Iter<'a, $T>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter() }
        }

        impl<'a, $T> IntoIterator for &'a mut $Cn<$T> {
            type Item = &'a mut $T;
            type IntoIter = IterMut<'a, $T>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter
            { self.0.iter_mut() }
        }

        // forward the debug impl without a surrounding "V3(...)", so that
        // debug output of a matrix reads as a nested list
        impl<$T: fmt::Debug> fmt::Debug for $Cn<$T> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt::Debug::fmt(&self.0, f) }
        }
    }
}

// Component-wise hashing. Not derived, because floats don't implement Hash.
gen_each!{
    @{Vn}
    impl_v_hash!({$Vn:ident}) => {
        impl<X: HashScalar> Hash for $Vn<X> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                for x in &self.0 {
                    x.hash_scalar(state);
                }
            }
        }
    }
}

gen_each!{
    @{Mn}
    impl_m_hash!({$Mn:ident}) => {
        impl<V: Hash> Hash for $Mn<V> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                for row in &self.0 {
                    row.hash(state);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
