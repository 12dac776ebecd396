/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::rc::Rc;

use crate::types::*;
use crate::span::MatrixSpan;
use crate::error::MatrixError;
use crate::MAX_LEN;

/// Anything that can write out row-major `f64` matrix data on request.
///
/// This is the seam between the statically-shaped matrix types and
/// everything that only learns its shape at runtime (lazy products,
/// swappable references). It is object safe.
pub trait MatrixSource {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Whether the data can never change while `self` is borrowed.
    ///
    /// This is only a hint, which enables memoization of lazy products.
    fn is_constant(&self) -> bool;

    /// Write the data into `buf` and return a span describing it.
    ///
    /// `buf` must hold at least `MAX_LEN` elements to be safe for any source.
    /// A `0x0` span means the identity.
    fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError>;
}

/// Construction of a concrete type from any `MatrixSource`.
pub trait FromSource: Sized {
    fn from_source<M: MatrixSource + ?Sized>(source: &M) -> Result<Self, MatrixError>;
}

/// The multiplicative identity of any shape, written as a `0x0` matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Identity;

impl MatrixSource for Identity {
    fn rows(&self) -> usize { 0 }
    fn columns(&self) -> usize { 0 }
    fn is_constant(&self) -> bool { true }

    fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError>
    { MatrixSpan::new(0, 0, buf) }
}

// ---------------------------------------------------------------------------
// smart pointers

gen_each!{
    [
        {('a,) (&'a M)}
        {(    ) (Box<M>)}
        {(    ) (Rc<M>)}
    ]
    impl_source_for_pointers!(
        {($($lt:tt)*) ($Ptr:ty)}
    ) => {
        impl<$($lt)* M: MatrixSource + ?Sized> MatrixSource for $Ptr {
            #[inline(always)]
            fn rows(&self) -> usize { (**self).rows() }

            #[inline(always)]
            fn columns(&self) -> usize { (**self).columns() }

            #[inline(always)]
            fn is_constant(&self) -> bool { (**self).is_constant() }

            #[inline(always)]
            fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError>
            { (**self).write_data(buf) }
        }
    }
}

// ---------------------------------------------------------------------------
// fixed-size types

/// Write `source` into a pre-zeroed `rows x columns` buffer, adapting shapes.
pub(crate) fn adapt_into<M>(source: &M, rows: usize, columns: usize, out: &mut [f64]) -> Result<(), MatrixError>
where M: MatrixSource + ?Sized,
{
    let mut scratch = [0.0; MAX_LEN];
    let data = source.write_data(&mut scratch)?;
    MatrixSpan::new(rows, columns, out)?.fill_from(&data)
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_source_for_matrices!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl MatrixSource for $Mr<$Vc<f64>> {
            #[inline(always)]
            fn rows(&self) -> usize { $r }

            #[inline(always)]
            fn columns(&self) -> usize { $c }

            #[inline(always)]
            fn is_constant(&self) -> bool { true }

            fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
                let mut span = MatrixSpan::new($r, $c, buf)?;
                span.as_mut_slice().copy_from_slice(&self.to_flat());
                Ok(span)
            }
        }

        impl FromSource for $Mr<$Vc<f64>> {
            fn from_source<M: MatrixSource + ?Sized>(source: &M) -> Result<Self, MatrixError> {
                let mut data = [0.0; $r * $c];
                adapt_into(source, $r, $c, &mut data)?;
                Self::from_flat(&data)
            }
        }
    }
}

// vectors are single rows
gen_each!{
    @{Vn_n}
    impl_source_for_vectors!(
        {$Vn:ident $n:tt}
    ) => {
        impl MatrixSource for $Vn<f64> {
            #[inline(always)]
            fn rows(&self) -> usize { 1 }

            #[inline(always)]
            fn columns(&self) -> usize { $n }

            #[inline(always)]
            fn is_constant(&self) -> bool { true }

            fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
                let mut span = MatrixSpan::new(1, $n, buf)?;
                span.as_mut_slice().copy_from_slice(&self.0);
                Ok(span)
            }
        }

        impl FromSource for $Vn<f64> {
            fn from_source<M: MatrixSource + ?Sized>(source: &M) -> Result<Self, MatrixError> {
                let mut data = [0.0; $n];
                adapt_into(source, 1, $n, &mut data)?;
                Ok($Vn(data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat;

    #[test]
    fn identity_is_empty() {
        let mut buf = [1.0; MAX_LEN];
        let span = Identity.write_data(&mut buf).unwrap();
        assert!(span.is_identity());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn adapt_up_pads_with_identity() {
        let m = mat::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let big = M44::from_source(&m).unwrap();
        assert_eq!(big, mat::from_array([
            [1.0, 2.0, 0.0, 0.0],
            [3.0, 4.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]));
        assert_eq!(M44::from_source(&Identity).unwrap(), M44::IDENTITY);
    }

    #[test]
    fn adapt_down_truncates() {
        let m = M33::from_fn(|r, c| (3 * r + c) as f64);
        assert_eq!(M22::from_source(&m).unwrap(), mat::from_array([[0.0, 1.0], [3.0, 4.0]]));
        assert_eq!(V2::from_source(&m).unwrap(), V2([0.0, 1.0]));
    }

    #[test]
    fn vectors_are_rows() {
        let v = V3([1.0, 2.0, 3.0]);
        assert_eq!((v.rows(), v.columns()), (1, 3));
        assert_eq!(V3::from_source(&v).unwrap(), v);
        assert_eq!(M23::from_source(&v).unwrap(), mat::from_array([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 0.0],
        ]));
    }

    #[test]
    fn through_pointers() {
        let boxed: Box<dyn MatrixSource> = Box::new(M32::ZERO);
        assert_eq!((boxed.rows(), boxed.columns()), (3, 2));
        let shared = Rc::new(M22::IDENTITY);
        assert!((&shared).is_constant());
        assert_eq!(M22::from_source(&shared).unwrap(), M22::IDENTITY);
        assert_eq!(M32::from_source(&boxed).unwrap(), M32::ZERO);
    }
}
