/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// The scalar traits in public signatures are closed sets of primitive types.
// What the generic code actually relies on lives in `internal`, so that
// downstream crates never see (or depend on) the arithmetic bounds.

use std::hash::Hasher;

mod sealed {
    pub trait Sealed { }
}
use self::sealed::Sealed;

/// Scalars with addition and multiplication: all primitive floats and integers.
///
/// This trait is sealed.
pub trait Semiring: Sealed { }

/// Scalars that are also closed under negation: floats and signed integers.
///
/// This trait is sealed.
pub trait Ring: Semiring { }

/// Scalars with division: `f32` and `f64`.
///
/// This trait is sealed.
pub trait Field: Ring { }

/// Hashing for matrix components, including floats.
///
/// Floats hash by bit pattern, with `-0.0` folded into `0.0` so that values
/// comparing equal also hash equal. (`NaN` never compares equal to anything,
/// so it places no further constraint.)
pub trait HashScalar: Sealed {
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

gen_each!{
    @{semiring}
    impl_semiring!({$T:ty}) => {
        impl Sealed for $T { }
        impl Semiring for $T { }
    };
}

gen_each!{
    @{ring}
    impl_ring!({$T:ty}) => {
        impl Ring for $T { }
    };
}

gen_each!{
    @{field}
    impl_field!({$T:ty}) => {
        impl Field for $T { }

        impl HashScalar for $T {
            #[inline]
            fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                let folded = if *self == 0.0 { 0.0 } else { *self };
                state.write(&folded.to_bits().to_le_bytes());
            }
        }
    };
}

gen_each!{
    @{int}
    impl_int_hash!({$T:ty}) => {
        impl HashScalar for $T {
            #[inline]
            fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(self, state);
            }
        }
    };
}

/// Arithmetic bounds for the generic implementations, one trait per
/// public scalar trait.
pub(crate) mod internal {
    use std::ops::{Add, Sub, Mul, Div, Neg};
    use std::iter::Sum;
    use std::fmt;
    use num_traits::{Zero, One};

    pub trait PrimitiveSemiring
        : Copy + Default + PartialEq + PartialOrd + fmt::Debug
        + Add<Output=Self> + Mul<Output=Self>
        + Zero + One + Sum
    { }

    pub trait PrimitiveRing
        : PrimitiveSemiring + Sub<Output=Self> + Neg<Output=Self>
    { }

    pub trait PrimitiveFloat
        : PrimitiveRing + Div<Output=Self>
    {
        fn sqrt(self) -> Self;

        /// Lossless widening, for comparisons against `f64` settings.
        fn to_f64(self) -> f64;
    }

    gen_each!{
        @{semiring}
        impl_primitive_semiring!({$T:ty}) => {
            impl PrimitiveSemiring for $T { }
        };
    }

    gen_each!{
        @{ring}
        impl_primitive_ring!({$T:ty}) => {
            impl PrimitiveRing for $T { }
        };
    }

    gen_each!{
        @{field}
        impl_primitive_float!({$T:ty}) => {
            impl PrimitiveFloat for $T {
                #[inline(always)] fn sqrt(self) -> $T { <$T>::sqrt(self) }
                #[inline(always)] fn to_f64(self) -> f64 { f64::from(self) }
            }
        };
    }
}
