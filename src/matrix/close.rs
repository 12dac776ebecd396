/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use densemat_assert_close::{CheckClose, CheckCloseError, Tolerances};

use crate::types::*;
use crate::dynamic::DynMatrix;

gen_each!{
    [
        {V2} {V3} {V4}
        {M2} {M3} {M4}
    ]
    impl_check_close!(
        {$Cn:ident}
    ) => {
        impl<T: CheckClose> CheckClose for $Cn<T> {
            type Scalar = T::Scalar;

            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
            { self.0.check_close(&other.0, tol) }
        }
    }
}

impl CheckClose for DynMatrix {
    type Scalar = f64;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>> {
        assert_eq!(
            (self.rows(), self.columns()),
            (other.rows(), other.columns()),
            "compared matrices differ in shape",
        );
        self.as_slice().check_close(other.as_slice(), tol)
    }
}
