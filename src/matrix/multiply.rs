/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Deferred matrix products.
//!
//! ```
//! # extern crate densemat_matrix;
//! use densemat_matrix::{lazy, M33};
//!
//! let a = M33::IDENTITY * 2.0;
//! let b = M33::IDENTITY;
//! let tree = lazy(a) * b * a; // nothing is computed yet
//! let product: M33 = tree.narrow().unwrap();
//! assert_eq!(product, M33::IDENTITY * 4.0);
//! ```

use std::cell::Cell;
use std::ops::Mul;

use crate::span::{self, MatrixSpan};
use crate::source::{MatrixSource, FromSource, Identity};
use crate::dynamic::DynMatrix;
use crate::error::MatrixError;
use crate::MAX_LEN;

/// A product `left * right` that is only computed when its data is requested.
///
/// Either operand may be absent, in which case it is the identity. Nodes
/// nest, so a chain `lazy(a) * b * c` is a left-leaning tree that performs
/// its multiplications on stack buffers at evaluation time.
///
/// When every operand reports `is_constant`, the first successful evaluation
/// is remembered until `invalidate` is called.
#[derive(Debug, Clone)]
pub struct MultiplyMatrix<L = Identity, R = Identity> {
    left: Option<L>,
    right: Option<R>,
    memo: Cell<Option<DynMatrix>>,
}

/// Start a lazy product chain.
pub fn lazy<M: MatrixSource>(matrix: M) -> MultiplyMatrix<M, Identity>
{ MultiplyMatrix::of(matrix) }

impl<L, R> MultiplyMatrix<L, R> {
    pub fn new(left: L, right: R) -> Self
    { MultiplyMatrix::from_parts(Some(left), Some(right)) }

    pub fn from_parts(left: Option<L>, right: Option<R>) -> Self
    { MultiplyMatrix { left, right, memo: Cell::new(None) } }

    pub fn left(&self) -> Option<&L> { self.left.as_ref() }
    pub fn right(&self) -> Option<&R> { self.right.as_ref() }

    /// Forget any remembered result.
    pub fn invalidate(&self)
    { self.memo.set(None) }
}

impl<L> MultiplyMatrix<L, Identity> {
    /// A node with a single operand.
    pub fn of(left: L) -> Self
    { MultiplyMatrix::from_parts(Some(left), None) }
}

impl<L: MatrixSource, R: MatrixSource> MultiplyMatrix<L, R> {
    /// Compute the product.
    pub fn evaluate(&self) -> Result<DynMatrix, MatrixError> {
        let mut buf = [0.0; MAX_LEN];
        DynMatrix::from_span(&self.write_data(&mut buf)?)
    }

    /// Compute the product as a fixed-size type.
    ///
    /// The result is adapted to the target shape (see `MatrixSpan::fill`).
    pub fn narrow<T: FromSource>(&self) -> Result<T, MatrixError>
    { T::from_source(self) }
}

// Shape of an operand, or `None` if it acts as the identity.
fn shape_of<M: MatrixSource>(operand: &Option<M>) -> Option<(usize, usize)> {
    operand.as_ref()
        .map(|m| (m.rows(), m.columns()))
        .filter(|&shape| shape != (0, 0))
}

impl<L: MatrixSource, R: MatrixSource> MatrixSource for MultiplyMatrix<L, R> {
    fn rows(&self) -> usize {
        shape_of(&self.left)
            .or_else(|| shape_of(&self.right))
            .map_or(0, |(rows, _)| rows)
    }

    fn columns(&self) -> usize {
        shape_of(&self.right)
            .or_else(|| shape_of(&self.left))
            .map_or(0, |(_, columns)| columns)
    }

    fn is_constant(&self) -> bool {
        self.left.as_ref().map_or(true, |m| m.is_constant())
            && self.right.as_ref().map_or(true, |m| m.is_constant())
    }

    fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
        if let Some(memo) = self.memo.get() {
            trace!("lazy product: reusing {}x{} result", memo.rows(), memo.columns());
            return memo.write_data(buf);
        }

        let mut left_buf = [0.0; MAX_LEN];
        let mut right_buf = [0.0; MAX_LEN];
        let left = match &self.left {
            Some(m) => m.write_data(&mut left_buf)?,
            None => MatrixSpan::identity(),
        };
        let right = match &self.right {
            Some(m) => m.write_data(&mut right_buf)?,
            None => MatrixSpan::identity(),
        };
        trace!(
            "lazy product: {}x{} * {}x{}",
            left.rows(), left.columns(), right.rows(), right.columns()
        );

        let out = span::product_into(&left, &right, buf)?;
        if self.is_constant() {
            self.memo.set(Some(DynMatrix::from_span(&out)?));
        }
        Ok(out)
    }
}

impl<L, R, N: MatrixSource> Mul<N> for MultiplyMatrix<L, R> {
    type Output = MultiplyMatrix<MultiplyMatrix<L, R>, N>;

    fn mul(self, rhs: N) -> Self::Output
    { MultiplyMatrix::new(self, rhs) }
}

impl<'a, L, R, N: MatrixSource> Mul<N> for &'a MultiplyMatrix<L, R> {
    type Output = MultiplyMatrix<&'a MultiplyMatrix<L, R>, N>;

    fn mul(self, rhs: N) -> Self::Output
    { MultiplyMatrix::new(self, rhs) }
}
