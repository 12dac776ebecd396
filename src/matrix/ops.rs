/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Operator impls for the fixed-size vectors and matrices.
//!
//! Every product between fixed shapes is resolved at compile time and
//! computed without touching the heap.

use std::ops::{Add, Sub, AddAssign, SubAssign, Neg};
use std::ops::{Mul, Div, MulAssign, DivAssign};
use std::fmt;

use crate::traits::{Semiring, Ring, Field};
use crate::traits::internal::{PrimitiveSemiring, PrimitiveRing, PrimitiveFloat};
use crate::types::*;
use crate::methods_v::Dot;
use crate::mat;

// Both operands always share a scalar type; there is no mixing of
// e.g. V3<f32> with V3<f64>.

// ---------------------------------------------------------------------------
// elementwise arithmetic

gen_each!{
    @{Vn}
    [ {Add add Semiring PrimitiveSemiring} {Sub sub Ring PrimitiveRing} ]
    [ [() ()] [('a,) (&'a)] ]
    [ [() ()] [('b,) (&'b)] ]
    v_zip_op!(
        {$Vn:ident}
        {$Op:ident $op:ident $Bound:ident $Prim:ident}
        [ ($($la:tt)*) ($($ra:tt)*) ]
        [ ($($lb:tt)*) ($($rb:tt)*) ]
    ) => {
        impl<$($la)* $($lb)* X> $Op<$($rb)* $Vn<X>> for $($ra)* $Vn<X>
        where X: $Bound + $Prim,
        {
            type Output = $Vn<X>;

            #[inline]
            fn $op(self, rhs: $($rb)* $Vn<X>) -> $Vn<X>
            { $Vn::from_fn(|i| $Op::$op(self[i], rhs[i])) }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    [ {Add add Semiring PrimitiveSemiring} {Sub sub Ring PrimitiveRing} ]
    [ [() ()] [('a,) (&'a)] ]
    [ [() ()] [('b,) (&'b)] ]
    m_zip_op!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
        {$Op:ident $op:ident $Bound:ident $Prim:ident}
        [ ($($la:tt)*) ($($ra:tt)*) ]
        [ ($($lb:tt)*) ($($rb:tt)*) ]
    ) => {
        impl<$($la)* $($lb)* X> $Op<$($rb)* $Mr<$Vc<X>>> for $($ra)* $Mr<$Vc<X>>
        where X: $Bound + $Prim,
        {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn $op(self, rhs: $($rb)* $Mr<$Vc<X>>) -> $Mr<$Vc<X>>
            { <$Mr<$Vc<X>>>::from_fn(|r, c| $Op::$op(self[r][c], rhs[r][c])) }
        }
    }
}

// container * scalar, container / scalar
gen_each!{
    @{Vn}
    [ {Mul mul Semiring PrimitiveSemiring} {Div div Field PrimitiveFloat} ]
    [ [() ()] [('a,) (&'a)] ]
    v_scale_op!(
        {$Vn:ident}
        {$Op:ident $op:ident $Bound:ident $Prim:ident}
        [ ($($la:tt)*) ($($ra:tt)*) ]
    ) => {
        impl<$($la)* X> $Op<X> for $($ra)* $Vn<X>
        where X: $Bound + $Prim,
        {
            type Output = $Vn<X>;

            #[inline]
            fn $op(self, s: X) -> $Vn<X>
            { $Vn::from_fn(|i| $Op::$op(self[i], s)) }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    [ {Mul mul Semiring PrimitiveSemiring} {Div div Field PrimitiveFloat} ]
    [ [() ()] [('a,) (&'a)] ]
    m_scale_op!(
        {$Mr:ident $r:tt}
        {$Vc:ident $c:tt}
        {$Op:ident $op:ident $Bound:ident $Prim:ident}
        [ ($($la:tt)*) ($($ra:tt)*) ]
    ) => {
        impl<$($la)* X> $Op<X> for $($ra)* $Mr<$Vc<X>>
        where X: $Bound + $Prim,
        {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn $op(self, s: X) -> $Mr<$Vc<X>>
            { <$Mr<$Vc<X>>>::from_fn(|r, c| $Op::$op(self[r][c], s)) }
        }
    }
}

gen_each!{
    @{Vn}
    [ [() ()] [('a,) (&'a)] ]
    v_neg!({$Vn:ident} [ ($($la:tt)*) ($($ra:tt)*) ]) => {
        impl<$($la)* X> Neg for $($ra)* $Vn<X>
        where X: Ring + PrimitiveRing,
        {
            type Output = $Vn<X>;

            #[inline]
            fn neg(self) -> $Vn<X>
            { $Vn::from_fn(|i| -self[i]) }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    [ [() ()] [('a,) (&'a)] ]
    m_neg!({$Mr:ident $r:tt} {$Vc:ident $c:tt} [ ($($la:tt)*) ($($ra:tt)*) ]) => {
        impl<$($la)* X> Neg for $($ra)* $Mr<$Vc<X>>
        where X: Ring + PrimitiveRing,
        {
            type Output = $Mr<$Vc<X>>;

            #[inline]
            fn neg(self) -> $Mr<$Vc<X>>
            { <$Mr<$Vc<X>>>::from_fn(|r, c| -self[r][c]) }
        }
    }
}

// scalar * container
//
// A blanket `impl<X> Mul<V2<X>> for X` is forbidden by the orphan rules,
// hence one impl per primitive.
gen_each!{
    @{Vn}
    @{semiring}
    [ [() ()] [('a,) (&'a)] ]
    v_scalar_lhs!({$Vn:ident} {$X:ty} [ ($($la:tt)*) ($($ra:tt)*) ]) => {
        impl<$($la)*> Mul<$($ra)* $Vn<$X>> for $X {
            type Output = $Vn<$X>;

            #[inline(always)]
            fn mul(self, v: $($ra)* $Vn<$X>) -> $Vn<$X>
            { v * self }
        }
    }
}

gen_each!{
    @{Mn_n}
    @{Vn_n}
    @{semiring}
    [ [() ()] [('a,) (&'a)] ]
    m_scalar_lhs!({$Mr:ident $r:tt} {$Vc:ident $c:tt} {$X:ty} [ ($($la:tt)*) ($($ra:tt)*) ]) => {
        impl<$($la)*> Mul<$($ra)* $Mr<$Vc<$X>>> for $X {
            type Output = $Mr<$Vc<$X>>;

            #[inline(always)]
            fn mul(self, m: $($ra)* $Mr<$Vc<$X>>) -> $Mr<$Vc<$X>>
            { m * self }
        }
    }
}

// Compound assignment is defined for every right-hand side that the
// by-reference binary operator accepts, so `m *= &square` and `v *= 2.0`
// both come for free.
gen_each!{
    [ {V2} {V3} {V4} {M2} {M3} {M4} ]
    [
        {AddAssign add_assign Add add}
        {SubAssign sub_assign Sub sub}
        {MulAssign mul_assign Mul mul}
        {DivAssign div_assign Div div}
    ]
    assign_op!({$Cn:ident} {$OpAssign:ident $op_assign:ident $Op:ident $op:ident}) => {
        impl<T, B> $OpAssign<B> for $Cn<T>
        where for<'a> &'a Self: $Op<B, Output=Self>,
        {
            #[inline(always)]
            fn $op_assign(&mut self, rhs: B)
            { *self = $Op::$op(&*self, rhs); }
        }
    }
}

// ---------------------------------------------------------------------------
// products

gen_each!{
    [ [() ()] [('v,) (&'v)] ]
    @{2...4}
    @{2...4}
    vec_mat_mul!([ ($($lv:tt)*) ($($rv:tt)*) ] {$r:tt} {$c:tt}) => {
        // row vector * matrix
        impl<$($lv)* 'm, X> Mul<&'m M![$r, V![$c, X]]> for $($rv)* V![$r, X]
        where X: Semiring + PrimitiveSemiring,
        {
            type Output = V![$c, X];

            #[inline]
            fn mul(self, m: &'m M![$r, V![$c, X]]) -> V![$c, X]
            { <V![$c, X]>::from_fn(|c| (0..$r).map(|k| self[k] * m[k][c]).sum()) }
        }

        // matrix * column vector
        impl<$($lv)* 'm, X> Mul<$($rv)* V![$c, X]> for &'m M![$r, V![$c, X]]
        where X: Semiring + PrimitiveSemiring,
        {
            type Output = V![$r, X];

            #[inline]
            fn mul(self, v: $($rv)* V![$c, X]) -> V![$r, X] {
                let v: &V![$c, X] = &v;
                <V![$r, X]>::from_fn(|r| Dot::dot(&self[r], v))
            }
        }
    }
}

gen_each!{
    [ [() ()] [('a,) (&'a)] ]
    [ [() ()] [('b,) (&'b)] ]
    @{2...4}
    @{2...4}
    @{2...4}
    mat_mat_mul!(
        [ ($($la:tt)*) ($($ra:tt)*) ]
        [ ($($lb:tt)*) ($($rb:tt)*) ]
        {$r:tt} {$k:tt} {$c:tt}
    ) => {
        impl<$($la)* $($lb)* X> Mul<$($rb)* M![$k, V![$c, X]]> for $($ra)* M![$r, V![$k, X]]
        where X: Semiring + PrimitiveSemiring,
        {
            type Output = M![$r, V![$c, X]];

            // entry (r, c) is row r of the left dotted with column c of the right
            #[inline]
            fn mul(self, rhs: $($rb)* M![$k, V![$c, X]]) -> M![$r, V![$c, X]]
            { mat::from_fn(|r, c| Dot::dot(&self[r], &rhs.col(c))) }
        }
    }
}

// ---------------------------------------------------------------------------
// formatting
//
// Formatter flags apply to each element, so e.g. `{:.3}` works.

fn fmt_vector<X>(
    xs: &[X],
    f: &mut fmt::Formatter<'_>,
    mut fmt_elem: impl FnMut(&X, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt_elem(x, f)?;
    }
    f.write_str("]")
}

// one row per line, no trailing newline
fn fmt_rows<V>(
    rows: &[V],
    f: &mut fmt::Formatter<'_>,
    mut fmt_row: impl FnMut(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        fmt_row(row, f)?;
    }
    Ok(())
}

gen_each!{
    @{Vn}
    [
        {Binary} {LowerExp} {LowerHex} {Display}
        {Octal} {UpperExp} {UpperHex}
    ]
    v_fmt!({$Vn:ident} {$Trait:ident}) => {
        impl<X: fmt::$Trait> fmt::$Trait for $Vn<X> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt_vector(&self.0, f, fmt::$Trait::fmt) }
        }
    }
}

gen_each!{
    @{Mn}
    [
        {Binary} {LowerExp} {LowerHex} {Display}
        {Octal} {UpperExp} {UpperHex}
    ]
    m_fmt!({$Mn:ident} {$Trait:ident}) => {
        impl<V: fmt::$Trait> fmt::$Trait for $Mn<V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            { fmt_rows(&self.0, f, fmt::$Trait::fmt) }
        }
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat_mat() {
        let eye2 = mat::from_array([[1, 0], [0, 1i32]]);
        let eye3 = mat::from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1i32]]);

        let a = mat::from_array([
            [2, 0, -1],
            [1, 3,  4],
        ]);
        let b = mat::from_array([
            [1,  2],
            [0, -1],
            [5,  1],
        ]);
        let a_b = mat::from_array([
            [-3,  3],
            [21,  3],
        ]);

        assert_eq!(a, &eye2 * &a);
        assert_eq!(a, a * eye3);
        assert_eq!(a_b, &a * b);
        assert_eq!(a_b, a * &b);
        assert_eq!(a_b.t(), b.t() * a.t());
    }

    #[test]
    fn mat_vec() {
        let m = mat::from_array([
            [2, 0, -1],
            [1, 3,  4],
        ]);
        assert_eq!(V2([1, 17]), &m * V3([2, 1, 3]));
        assert_eq!(V3([4, 6, 7]), V2([1, 2]) * &m);

        // with the other dimension longer, so that the sums are checked
        // to run over the right indices
        let m = m.t();
        assert_eq!(V2([1, 17]), V3([2, 1, 3]) * &m);
        assert_eq!(V3([4, 6, 7]), &m * &V2([1, 2]));
    }

    #[test]
    fn elementwise_and_scalar() {
        let a = mat::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = mat::from_array([[0.5, 0.5], [0.5, 0.5]]);
        assert_eq!(&a + &b, mat::from_array([[1.5, 2.5], [3.5, 4.5]]));
        assert_eq!(a - b, mat::from_array([[0.5, 1.5], [2.5, 3.5]]));
        assert_eq!(-a, mat::from_array([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, mat::from_array([[0.5, 1.0], [1.5, 2.0]]));

        assert_eq!(3u8 * V3([1, 2, 3]), V3([3, 6, 9]));
        assert_eq!(-V2([1.0, -2.0]), V2([-1.0, 2.0]));
        assert_eq!(V2([1, 2]) - V2([3, 3]), V2([-2, -1]));
    }

    #[test]
    fn assign_ops() {
        let mut m = M22::<f64>::eye();
        m += M22::eye();
        m *= 3.0;
        assert_eq!(m, mat::from_array([[6.0, 0.0], [0.0, 6.0]]));
        m *= mat::from_array([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(m, mat::from_array([[0.0, 6.0], [6.0, 0.0]]));
        m /= 6.0;
        m -= M22::eye();
        assert_eq!(m, mat::from_array([[-1.0, 1.0], [1.0, -1.0]]));

        let mut v = V3([1, 2, 3]);
        v *= &M33::eye();
        v += V3([1, 1, 1]);
        assert_eq!(v, V3([2, 3, 4]));
    }

    #[test]
    fn display() {
        let m = mat::from_array([[1.0, 0.5], [-2.0, 1.0 / 3.0]]);
        assert_eq!(format!("{}", m), "[1, 0.5]\n[-2, 0.3333333333333333]");
        assert_eq!(format!("{:.2}", m), "[1.00, 0.50]\n[-2.00, 0.33]");
        assert_eq!(format!("{:x}", V3([255, 16, 1])), "[ff, 10, 1]");
        assert_eq!(format!("{:e}", V2([1500.0, 0.25])), "[1.5e3, 2.5e-1]");
    }
}
