/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Everything that can go wrong in this crate.
///
/// Plain indexing (`m[r][c]`) still panics like any Rust index; the `try_`
/// accessors, span accessors and the dynamic paths report these instead.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum MatrixError {
    #[fail(display = "a {}x{} matrix needs {} elements, but only {} were given", rows, columns, expected, actual)]
    TooFewElements {
        rows: usize,
        columns: usize,
        expected: usize,
        actual: usize,
    },

    #[fail(display = "index (row {}, column {}) is out of range for a {}x{} matrix", row, column, rows, columns)]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[fail(display = "matrix is singular (determinant {:e}, epsilon {:e})", det, epsilon)]
    Singular {
        det: f64,
        epsilon: f64,
    },

    #[fail(display = "argument `{}` = {} is out of range: {}", name, value, reason)]
    ArgumentOutOfRange {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[fail(display = "cannot multiply a {}x{} matrix by a {}x{} matrix", left_rows, left_columns, right_rows, right_columns)]
    DimensionMismatch {
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },

    #[fail(display = "a {}x{} matrix exceeds the 4x4 maximum", rows, columns)]
    TooLarge {
        rows: usize,
        columns: usize,
    },

    #[fail(display = "buffer of length {} cannot hold {} elements", actual, required)]
    BufferTooSmall {
        required: usize,
        actual: usize,
    },

    #[fail(display = "reference matrix refers back to itself")]
    CyclicReference,

    #[fail(display = "invalid config: {}", reason)]
    InvalidConfig {
        reason: String,
    },
}

impl MatrixError {
    pub(crate) fn argument(name: &'static str, value: f64, reason: &'static str) -> Self {
        debug!("rejected argument {} = {}: {}", name, value, reason);
        MatrixError::ArgumentOutOfRange { name, value, reason }
    }
}
