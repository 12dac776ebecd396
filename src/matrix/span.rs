/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::MatrixError;

/// A rectangular row-major view over a caller-owned buffer.
///
/// Element `(x, y)` (column `x`, row `y`) lives at `x + columns * y`.
/// A `0x0` span stands for the identity wherever spans are combined.
#[derive(Debug)]
pub struct MatrixSpan<'a> {
    rows: usize,
    columns: usize,
    data: &'a mut [f64],
}

impl<'a> MatrixSpan<'a> {
    /// View the first `rows * columns` elements of `buf`.
    pub fn new(rows: usize, columns: usize, buf: &'a mut [f64]) -> Result<Self, MatrixError> {
        // an unrepresentable size can't fit in any buffer
        let required = rows.checked_mul(columns).unwrap_or(usize::max_value());
        if buf.len() < required {
            return Err(MatrixError::BufferTooSmall { required, actual: buf.len() });
        }
        Ok(MatrixSpan { rows, columns, data: &mut buf[..required] })
    }

    /// The empty `0x0` span.
    pub fn identity() -> Self
    { MatrixSpan { rows: 0, columns: 0, data: &mut [] } }

    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn is_identity(&self) -> bool { self.rows == 0 && self.columns == 0 }

    pub fn as_slice(&self) -> &[f64] { &*self.data }
    pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut *self.data }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, MatrixError> {
        match x < self.columns && y < self.rows {
            true => Ok(x + self.columns * y),
            false => Err(MatrixError::IndexOutOfRange {
                row: y,
                column: x,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }

    /// Read column `x` of row `y`.
    pub fn get(&self, x: usize, y: usize) -> Result<f64, MatrixError>
    { self.index_of(x, y).map(|i| self.data[i]) }

    /// Write column `x` of row `y`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), MatrixError> {
        let i = self.index_of(x, y)?;
        self.data[i] = value;
        Ok(())
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> Result<&[f64], MatrixError> {
        if y >= self.rows {
            return Err(MatrixError::IndexOutOfRange {
                row: y,
                column: 0,
                rows: self.rows,
                columns: self.columns,
            });
        }
        let start = y * self.columns;
        Ok(&self.data[start..start + self.columns])
    }

    /// Copy a `source_rows x source_columns` row-major matrix into this span,
    /// adapting between the two shapes.
    ///
    /// The overlapping top-left block is copied. Diagonal cells that lie
    /// inside this span but beyond the source's own diagonal are set to `1`,
    /// so that e.g. a 2x2 linear map becomes the equivalent 4x4 transform.
    /// Every other cell keeps its old value; callers zero the buffer first.
    pub fn fill(&mut self, source: &[f64], source_rows: usize, source_columns: usize) -> Result<(), MatrixError> {
        let expected = source_rows.checked_mul(source_columns).unwrap_or(usize::max_value());
        if source.len() < expected {
            return Err(MatrixError::TooFewElements {
                rows: source_rows,
                columns: source_columns,
                expected,
                actual: source.len(),
            });
        }

        let width = self.columns.min(source_columns);
        for y in 0..self.rows.min(source_rows) {
            let dest = y * self.columns;
            let src = y * source_columns;
            self.data[dest..dest + width].copy_from_slice(&source[src..src + width]);
        }

        for i in source_rows.min(source_columns)..self.rows.min(self.columns) {
            self.data[i + self.columns * i] = 1.0;
        }
        Ok(())
    }

    /// `fill` from another span's data and shape.
    pub fn fill_from(&mut self, source: &MatrixSpan<'_>) -> Result<(), MatrixError>
    { self.fill(source.as_slice(), source.rows, source.columns) }

    /// Copy into another buffer, keeping the shape.
    pub fn copy_into<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
        let mut out = MatrixSpan::new(self.rows, self.columns, buf)?;
        out.as_mut_slice().copy_from_slice(self.as_slice());
        Ok(out)
    }
}

/// Dense product of two spans into `buf`.
///
/// A `0x0` operand is the identity, and the other operand is copied as is.
pub(crate) fn product_into<'b>(
    left: &MatrixSpan<'_>,
    right: &MatrixSpan<'_>,
    buf: &'b mut [f64],
) -> Result<MatrixSpan<'b>, MatrixError> {
    if left.is_identity() {
        return right.copy_into(buf);
    }
    if right.is_identity() {
        return left.copy_into(buf);
    }
    if left.columns != right.rows {
        return Err(MatrixError::DimensionMismatch {
            left_rows: left.rows,
            left_columns: left.columns,
            right_rows: right.rows,
            right_columns: right.columns,
        });
    }

    let out = MatrixSpan::new(left.rows, right.columns, buf)?;
    let inner = left.columns;
    for y in 0..out.rows {
        for x in 0..out.columns {
            out.data[x + out.columns * y] = (0..inner)
                .map(|k| left.data[k + inner * y] * right.data[x + right.columns * k])
                .sum();
        }
    }
    Ok(out)
}
