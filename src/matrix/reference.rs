/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::cell::{Cell, RefCell};
use std::ops::Mul;
use std::fmt;

use crate::span::MatrixSpan;
use crate::source::MatrixSource;
use crate::multiply::MultiplyMatrix;
use crate::error::MatrixError;

/// A slot holding some other `MatrixSource`, which can be swapped out
/// while lazy products are borrowing the slot.
///
/// An empty slot behaves as the identity. Since the contents may change at
/// any time, a `ReferenceMatrix` never reports `is_constant`, and products
/// containing one are always recomputed.
pub struct ReferenceMatrix<'a> {
    source: RefCell<Option<Box<dyn MatrixSource + 'a>>>,
    busy: Cell<bool>,
}

// Marks the slot as being read until dropped, so that a slot that
// (indirectly) contains itself is caught instead of recursing forever.
struct Busy<'c>(&'c Cell<bool>);

impl<'c> Busy<'c> {
    fn enter(flag: &'c Cell<bool>) -> Option<Busy<'c>> {
        match flag.replace(true) {
            true => None,
            false => Some(Busy(flag)),
        }
    }
}

impl<'c> Drop for Busy<'c> {
    fn drop(&mut self) { self.0.set(false); }
}

impl<'a> ReferenceMatrix<'a> {
    pub fn new() -> Self {
        ReferenceMatrix {
            source: RefCell::new(None),
            busy: Cell::new(false),
        }
    }

    pub fn with_source<M: MatrixSource + 'a>(source: M) -> Self {
        let out = ReferenceMatrix::new();
        out.set_source(source);
        out
    }

    /// Replace the contents.
    ///
    /// # Panics
    ///
    /// Panics if called while this slot's own data is being written,
    /// i.e. from inside the current source.
    pub fn set_source<M: MatrixSource + 'a>(&self, source: M) {
        self.source.replace(Some(Box::new(source)));
    }

    /// Empty the slot, so that it acts as the identity.
    pub fn clear(&self) {
        self.source.replace(None);
    }

    pub fn is_empty(&self) -> bool
    { self.source.borrow().is_none() }

    fn delegate<T>(&self, default: T, f: impl FnOnce(&dyn MatrixSource) -> T) -> T {
        let _busy = match Busy::enter(&self.busy) {
            Some(busy) => busy,
            None => return default,
        };
        match &*self.source.borrow() {
            Some(source) => f(&**source),
            None => default,
        }
    }
}

impl<'a> Default for ReferenceMatrix<'a> {
    fn default() -> Self { ReferenceMatrix::new() }
}

impl<'a> fmt::Debug for ReferenceMatrix<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceMatrix")
            .field("rows", &self.rows())
            .field("columns", &self.columns())
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl<'a> MatrixSource for ReferenceMatrix<'a> {
    fn rows(&self) -> usize
    { self.delegate(0, |source| source.rows()) }

    fn columns(&self) -> usize
    { self.delegate(0, |source| source.columns()) }

    fn is_constant(&self) -> bool { false }

    fn write_data<'b>(&self, buf: &'b mut [f64]) -> Result<MatrixSpan<'b>, MatrixError> {
        let _busy = match Busy::enter(&self.busy) {
            Some(busy) => busy,
            None => {
                debug!("reference matrix contains itself");
                return Err(MatrixError::CyclicReference);
            },
        };
        match &*self.source.borrow() {
            Some(source) => source.write_data(buf),
            None => MatrixSpan::new(0, 0, buf),
        }
    }
}

impl<'r, 'a, N: MatrixSource> Mul<N> for &'r ReferenceMatrix<'a> {
    type Output = MultiplyMatrix<&'r ReferenceMatrix<'a>, N>;

    fn mul(self, rhs: N) -> Self::Output
    { MultiplyMatrix::new(self, rhs) }
}
