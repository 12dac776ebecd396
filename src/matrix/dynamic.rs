/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Index, IndexMut, Mul};
use std::hash::{Hash, Hasher};
use std::fmt;

use crate::types::*;
use crate::traits::HashScalar;
use crate::span::{self, MatrixSpan};
use crate::source::{self, MatrixSource, FromSource};
use crate::error::MatrixError;
use crate::{MAX_DIM, MAX_LEN};

/// A dense matrix whose shape is only known at runtime, up to 4x4.
///
/// Storage is inline, so this is `Copy` and never allocates. A `0x0`
/// `DynMatrix` (the `Default`) acts as the identity in products.
#[derive(Copy, Clone)]
pub struct DynMatrix {
    rows: usize,
    columns: usize,
    // elements past `rows * columns` are always zero
    data: [f64; MAX_LEN],
}

impl Default for DynMatrix {
    fn default() -> Self { DynMatrix { rows: 0, columns: 0, data: [0.0; MAX_LEN] } }
}

fn check_shape(rows: usize, columns: usize) -> Result<(), MatrixError> {
    match rows <= MAX_DIM && columns <= MAX_DIM {
        true => Ok(()),
        false => Err(MatrixError::TooLarge { rows, columns }),
    }
}

impl DynMatrix {
    pub fn zeros(rows: usize, columns: usize) -> Result<Self, MatrixError> {
        check_shape(rows, columns)?;
        Ok(DynMatrix { rows, columns, ..Default::default() })
    }

    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut out = DynMatrix::zeros(n, n)?;
        for i in 0..n {
            out.data[i * n + i] = 1.0;
        }
        Ok(out)
    }

    /// Construct from row-major data. Values past `rows * columns` are ignored.
    pub fn from_flat(rows: usize, columns: usize, data: &[f64]) -> Result<Self, MatrixError> {
        let mut out = DynMatrix::zeros(rows, columns)?;
        let expected = rows * columns;
        if data.len() < expected {
            return Err(MatrixError::TooFewElements { rows, columns, expected, actual: data.len() });
        }
        out.data[..expected].copy_from_slice(&data[..expected]);
        Ok(out)
    }

    pub fn from_span(span: &MatrixSpan<'_>) -> Result<Self, MatrixError>
    { DynMatrix::from_flat(span.rows(), span.columns(), span.as_slice()) }

    /// Exact copy of a source's data and shape.
    pub fn from_source<M: MatrixSource + ?Sized>(source: &M) -> Result<Self, MatrixError> {
        let mut buf = [0.0; MAX_LEN];
        let span = source.write_data(&mut buf)?;
        DynMatrix::from_span(&span)
    }

    /// Copy of a source adapted to a new shape, padding with the identity.
    ///
    /// See `MatrixSpan::fill`.
    pub fn adapted<M: MatrixSource + ?Sized>(rows: usize, columns: usize, source: &M) -> Result<Self, MatrixError> {
        let mut out = DynMatrix::zeros(rows, columns)?;
        source::adapt_into(source, rows, columns, &mut out.data)?;
        Ok(out)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }
    pub fn is_identity(&self) -> bool { self.rows == 0 && self.columns == 0 }

    /// Row-major data of the active shape.
    pub fn as_slice(&self) -> &[f64] { &self.data[..self.rows * self.columns] }

    fn offset(&self, row: usize, column: usize) -> Result<usize, MatrixError> {
        match row < self.rows && column < self.columns {
            true => Ok(row * self.columns + column),
            false => Err(MatrixError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }

    pub fn try_get(&self, row: usize, column: usize) -> Result<f64, MatrixError>
    { self.offset(row, column).map(|i| self.data[i]) }

    pub fn try_set(&mut self, row: usize, column: usize, value: f64) -> Result<(), MatrixError> {
        let i = self.offset(row, column)?;
        self.data[i] = value;
        Ok(())
    }

    /// Matrix transpose.
    pub fn t(&self) -> DynMatrix {
        let mut out = DynMatrix { rows: self.columns, columns: self.rows, ..Default::default() };
        for r in 0..self.rows {
            for c in 0..self.columns {
                out.data[c * self.rows + r] = self.data[r * self.columns + c];
            }
        }
        out
    }

    /// Matrix product, requiring `self.columns() == other.rows()`.
    ///
    /// A `0x0` operand is the identity.
    pub fn try_mul(&self, other: &DynMatrix) -> Result<DynMatrix, MatrixError> {
        let mut left = [0.0; MAX_LEN];
        let mut right = [0.0; MAX_LEN];
        let mut out = [0.0; MAX_LEN];
        let left = self.write_data(&mut left)?;
        let right = other.write_data(&mut right)?;
        DynMatrix::from_span(&span::product_into(&left, &right, &mut out)?)
    }

    /// Convert to a fixed-size type (or anything else constructible from a source).
    pub fn narrow<T: FromSource>(&self) -> Result<T, MatrixError>
    { T::from_source(self) }
}

impl Index<(usize, usize)> for DynMatrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        match self.offset(row, column) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for DynMatrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        match self.offset(row, column) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl MatrixSource for DynMatrix {
    fn rows(&self) -> usize { self.rows }
    fn columns(&self) -> usize { self.columns }
    fn is_constant(&self) -> bool { true }

    fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
        let mut span = MatrixSpan::new(self.rows, self.columns, buf)?;
        span.as_mut_slice().copy_from_slice(self.as_slice());
        Ok(span)
    }
}

impl FromSource for DynMatrix {
    fn from_source<M: MatrixSource + ?Sized>(source: &M) -> Result<Self, MatrixError>
    { DynMatrix::from_source(source) }
}

// Like every other product here, this panics on a dimension mismatch;
// use `try_mul` to get an error instead.
gen_each!{
    [ [(   ) (   )] [('a,) (&'a)] ]
    [ [(   ) (   )] [('b,) (&'b)] ]
    impl_dyn_mul!(
        [ ($($lt_a:tt)*) ($($ref_a:tt)*) ]
        [ ($($lt_b:tt)*) ($($ref_b:tt)*) ]
    ) => {
        impl<$($lt_a)* $($lt_b)*> Mul<$($ref_b)* DynMatrix> for $($ref_a)* DynMatrix {
            type Output = DynMatrix;

            fn mul(self, other: $($ref_b)* DynMatrix) -> DynMatrix {
                match self.try_mul(&other) {
                    Ok(m) => m,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    impl_from_fixed!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
    ) => {
        impl From<$Mr<$Vc<f64>>> for DynMatrix {
            fn from(m: $Mr<$Vc<f64>>) -> Self {
                let mut out = DynMatrix { rows: $r, columns: $c, ..Default::default() };
                out.data[..$r * $c].copy_from_slice(&m.to_flat());
                out
            }
        }
    }
}

gen_each!{
    @{Vn_n}
    impl_from_vector!(
        {$Vn:ident $n:tt}
    ) => {
        impl From<$Vn<f64>> for DynMatrix {
            fn from(v: $Vn<f64>) -> Self {
                let mut out = DynMatrix { rows: 1, columns: $n, ..Default::default() };
                out.data[..$n].copy_from_slice(&v.0);
                out
            }
        }
    }
}

impl PartialEq for DynMatrix {
    fn eq(&self, other: &DynMatrix) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.as_slice() == other.as_slice()
    }
}

impl Hash for DynMatrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.columns.hash(state);
        for x in self.as_slice() {
            x.hash_scalar(state);
        }
    }
}

impl fmt::Debug for DynMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMatrix")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("data", &self.as_slice())
            .finish()
    }
}

gen_each!{
    [ {Display} {LowerExp} {UpperExp} ]
    impl_dyn_fmt!(
        {$Format:ident}
    ) => {
        impl fmt::$Format for DynMatrix {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for r in 0..self.rows {
                    if r > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "[")?;
                    for c in 0..self.columns {
                        if c > 0 {
                            write!(f, ", ")?;
                        }
                        fmt::$Format::fmt(&self.data[r * self.columns + c], f)?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
        }
    }
}
