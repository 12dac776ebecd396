/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Numerical settings, meant to be embedded in a consumer's own YAML/JSON config.

use crate::error::MatrixError;
use serde::{Serialize, Deserialize};

/// Tolerances used by numerically sensitive operations.
///
/// Every field has a default, so an empty mapping (`{}`) deserializes to
/// `Precision::default()`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Precision {
    /// A square matrix whose determinant has a magnitude below this is
    /// treated as singular and refused by `inv`.
    #[serde(default = "precision__singular_epsilon")]
    pub singular_epsilon: f64,
}
#[allow(non_snake_case)]
fn precision__singular_epsilon() -> f64 { ::std::f64::EPSILON }

impl Default for Precision {
    fn default() -> Self {
        Precision {
            singular_epsilon: precision__singular_epsilon(),
        }
    }
}

impl Precision {
    pub fn validate(self) -> Result<Precision, MatrixError> {
        let eps = self.singular_epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(MatrixError::InvalidConfig {
                reason: format!("`singular-epsilon: {}` must be finite and non-negative", eps),
            });
        }
        Ok(self)
    }
}
