/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small fixed-size vector types, used as the rows of the matrix types.
//!
//! These are deliberately minimal. They exist so that matrices have
//! something to hand out from `row()`/`col()` and something to multiply.

use crate::traits::{Semiring, Ring, Field};
use crate::traits::internal::{PrimitiveSemiring, PrimitiveRing, PrimitiveFloat};

use super::types::*;

use num_traits::Zero;


/// Construct a fixed-size vector from a function on indices.
///
/// The length is inferred from how the output is used.
#[inline(always)]
pub fn from_fn<V: FromFn<F>, F>(f: F) -> V
{ FromFn::from_fn(f) }

/// Inner product of vectors.
///
/// Same as `V3::dot` and friends.
#[inline(always)]
pub fn dot<V>(a: &V, b: &V) -> ScalarT<V>
where V: Dot,
{ Dot::dot(a, b) }

gen_each!{
    @{Vn_n}
    v_inherent!(
        {$Vn:ident $n:expr}
    ) => {
        impl<X> $Vn<X> {
            /// Get a zero vector.
            #[inline(always)]
            pub fn zero() -> Self
            where Self: Zero,
            { Zero::zero() }

            /// Construct a fixed-size vector from a function on indices.
            #[inline(always)]
            pub fn from_fn<F>(f: F) -> Self
            where F: FnMut(usize) -> X,
            { $Vn(::std::array::from_fn(f)) }

            /// Get the inner product of two vectors.
            ///
            /// It is recommended you write this as `V3::dot(a, b)`, rather than `a.dot(b)`.
            #[inline(always)]
            pub fn dot(&self, other: &Self) -> ScalarT<Self>
            where Self: Dot,
            { Dot::dot(self, other) }

            /// Get the vector's squared magnitude.
            #[inline(always)]
            pub fn sqnorm(&self) -> ScalarT<Self>
            where Self: Dot,
            { Dot::dot(self, self) }

            /// Get the vector's magnitude.
            #[inline(always)]
            pub fn norm(&self) -> X
            where X: Field + PrimitiveFloat,
            { Dot::dot(self, self).sqrt() }

            /// Normalize the vector.
            ///
            /// The zero vector produces NaNs; callers that can receive one
            /// should check `sqnorm()` first.
            #[inline(always)]
            pub fn unit(&self) -> Self
            where X: Field + PrimitiveFloat,
            {
                let norm = self.norm();
                self.map(|x| x / norm)
            }

            /// Get a basis vector.
            #[inline(always)]
            pub fn axis_unit(i: usize) -> Self
            where X: Semiring + PrimitiveSemiring,
            {
                let mut v = $Vn([X::zero(); $n]);
                *v.0.get_mut(i)
                    .unwrap_or_else(|| panic!("Invalid axis for {}d vector: {}", $n, i)) = X::one();
                v
            }

            /// Perform elementwise multiplication, or multiplication of a vector by a diagonal
            /// matrix.
            #[inline(always)]
            pub fn mul_diag(&self, other: &Self) -> Self
            where X: Semiring + PrimitiveSemiring,
            { Self::from_fn(|i| self.0[i] * other.0[i]) }

            /// Apply a function to each element.
            #[inline]
            pub fn map<B, F>(self, f: F) -> $Vn<B>
            where F: FnMut(X) -> B,
            { $Vn(self.0.map(f)) }
        }
    }
}

impl<X: Ring> V3<X>
where X: PrimitiveRing
{
    /// Cross-product. Only defined on 3-dimensional vectors.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        V3([
            self[1] * other[2] - self[2] * other[1],
            self[2] * other[0] - self[0] * other[2],
            self[0] * other[1] - self[1] * other[0],
        ])
    }
}

impl<X: Copy> V2<X> {
    /// Append a component, e.g. to lift a point into homogeneous coordinates.
    #[inline]
    pub fn extend(self, z: X) -> V3<X>
    { V3([self[0], self[1], z]) }
}

impl<X: Copy> V3<X> {
    /// Append a component, e.g. to lift a point into homogeneous coordinates.
    #[inline]
    pub fn extend(self, w: X) -> V4<X>
    { V4([self[0], self[1], self[2], w]) }

    /// Drop the last component.
    #[inline]
    pub fn truncate(self) -> V2<X>
    { V2([self[0], self[1]]) }
}

impl<X: Copy> V4<X> {
    /// Drop the last component.
    #[inline]
    pub fn truncate(self) -> V3<X>
    { V3([self[0], self[1], self[2]]) }
}

// ---------------------------------------------------------------------------
// helper traits

/// Element type of the vector.
pub type ScalarT<V> = <V as IsV>::Scalar;
/// Trait that provides associated types for `V2, V3, V4`.
pub trait IsV {
    type Scalar;
}

gen_each!{
    @{Vn}
    v_is_v!({$Vn:ident}) => {
        impl<X> IsV for $Vn<X> {
            type Scalar = X;
        }
    }
}

/// Backs `vee::from_fn`.
pub trait FromFn<F>: Sized {
    fn from_fn(f: F) -> Self;
}

gen_each!{
    @{Vn}
    v_from_fn!({$Vn:ident}) => {
        impl<X, F> FromFn<F> for $Vn<X>
        where F: FnMut(usize) -> X,
        {
            #[inline(always)]
            fn from_fn(f: F) -> Self
            { $Vn::from_fn(f) }
        }
    }
}

/// Backs `{V2,V3,V4}::dot`; callers should use the inherent method.
pub trait Dot: IsV {
    fn dot(&self, other: &Self) -> ScalarT<Self>;
}

gen_each!{
    @{Vn_n}
    v_dot!({$Vn:ident $n:tt}) => {
        impl<X: Semiring> Dot for $Vn<X>
        where X: PrimitiveSemiring,
        {
            #[inline]
            fn dot(&self, other: &Self) -> X
            { (0..$n).map(|k| self.0[k] * other.0[k]).sum() }
        }
    }
}

gen_each!{
    @{Vn_n}
    v_zero!({$Vn:ident $n:tt}) => {
        impl<X: Semiring> Zero for $Vn<X>
        where X: PrimitiveSemiring,
        {
            #[inline]
            fn zero() -> Self
            { $Vn([X::zero(); $n]) }

            #[inline]
            fn is_zero(&self) -> bool
            { self.0.iter().all(|x| x.is_zero()) }
        }
    }
}

// ---------------------------------------------------------------------------
