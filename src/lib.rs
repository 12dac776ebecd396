/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small dense matrices with lazy product trees.
//!
//! This is a facade over `densemat-matrix`; see that crate for details.

pub use densemat_matrix::*;

/// Everything needed for everyday use, including the traits that
/// provide methods on matrix types.
pub mod prelude {
    pub use densemat_matrix::{V2, V3, V4, M2, M3, M4};
    pub use densemat_matrix::{M22, M23, M24, M32, M33, M34, M42, M43, M44};
    pub use densemat_matrix::{DynMatrix, MultiplyMatrix, ReferenceMatrix, Identity, lazy};
    pub use densemat_matrix::{MatrixSource, FromSource, MatrixError, Precision};
    pub use densemat_matrix::{Rad, Deg, Rect, Aabb};
    pub use densemat_matrix::{vee, mat};
    pub use densemat_matrix::mat::{Det, Inv, Transpose};
}
