/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrices of up to 4x4 `f64`s, with deferred products.
//!
//! There are two layers:
//!
//! * **Fixed-size types.** `V2..V4` and `M2..M4` (aliased as `M22..M44`)
//!   are plain arrays with the usual algebra, available for all primitive
//!   scalars. The `f64` versions additionally have transform constructors.
//! * **Runtime-shaped data.** Anything implementing [`MatrixSource`] can
//!   write its data into a buffer on request. Products of sources can be
//!   built up as [`MultiplyMatrix`] trees (see [`lazy`]) and evaluated
//!   later, and [`ReferenceMatrix`] is a slot whose contents can be swapped
//!   under an existing tree.
//!
//! Vectors are rows: a point is transformed as `v * M`.
//!
//! [`MatrixSource`]: trait.MatrixSource.html
//! [`MultiplyMatrix`]: struct.MultiplyMatrix.html
//! [`ReferenceMatrix`]: struct.ReferenceMatrix.html
//! [`lazy`]: fn.lazy.html

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[cfg_attr(test, macro_use)]
extern crate densemat_assert_close;

#[macro_use]
mod macros;
mod traits;
mod types;
mod methods_v;
mod methods_m;
mod ops;
mod close;
mod error;
mod config;
mod geom;
mod span;
mod source;
mod dynamic;
mod multiply;
mod reference;
mod transform;

/// Largest number of rows or columns of any matrix.
pub const MAX_DIM: usize = 4;
/// Largest number of elements of any matrix.
pub const MAX_LEN: usize = MAX_DIM * MAX_DIM;

pub use crate::traits::{Semiring, Ring, Field};
pub use crate::types::*;

/// Free functions and traits for vectors.
pub mod vee {
    pub use crate::methods_v::{from_fn, dot};
    pub use crate::methods_v::{IsV, ScalarT, FromFn, Dot};
}

/// Free functions and traits for matrices.
pub mod mat {
    pub use crate::methods_m::{from_fn, from_array, eye, zero, inv};
    pub use crate::methods_m::{IsMatrix, FromFn, IntoMatrix};
    pub use crate::methods_m::{Det, DetT, Inv, Transpose, TransposeT};
}

pub use crate::error::MatrixError;
pub use crate::config::Precision;
pub use crate::geom::{Rad, Deg, Rect, Aabb};
pub use crate::span::MatrixSpan;
pub use crate::source::{MatrixSource, FromSource, Identity};
pub use crate::dynamic::DynMatrix;
pub use crate::multiply::{MultiplyMatrix, lazy};
pub use crate::reference::ReferenceMatrix;
