/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Stamp out a callback macro over a cartesian product of token groups.
///
/// ```text
/// gen_each!{
///     [{a} {b}]           // an explicit group
///     @{2...4}            // a named group, see below
///     name!({$x:ident} {$n:tt}) => { ... };
/// }
/// ```
///
/// defines `name!` from the given rule and invokes it once for every
/// combination, taking one token tree from each group in order.
///
/// Every shape-specific and scalar-specific impl in this crate goes
/// through here, so the named groups below are what decide the set of
/// shapes and the members of each sealed scalar trait.
macro_rules! gen_each {
    //----------------------------
    // named groups

    (@groups [@{field} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{f32} {f64}]]}
    };
    (@groups [@{ring} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [
            {f32} {f64}
            {i8} {i16} {i32} {i64} {isize}
        ]]}
    };
    (@groups [@{semiring} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [
            {f32} {f64}
            {i8} {i16} {i32} {i64} {isize}
            {u8} {u16} {u32} {u64} {usize}
        ]]}
    };
    (@groups [@{int} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [
            {i8} {i16} {i32} {i64} {isize}
            {u8} {u16} {u32} {u64} {usize}
        ]]}
    };
    // vector types, alone or with their length
    (@groups [@{Vn} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{V2} {V3} {V4}]]}
    };
    (@groups [@{Vn_n} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{V2 2} {V3 3} {V4 4}]]}
    };
    // matrix containers (generic width), alone or with their row count
    (@groups [@{Mn} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{M2} {M3} {M4}]]}
    };
    (@groups [@{Mn_n} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{M2 2} {M3 3} {M4 4}]]}
    };
    // square matrices: alias, container, row type, size
    (@groups [@{Mnn_Mn_Vn_n} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [
            {M22 M2 V2 2} {M33 M3 V3 3} {M44 M4 V4 4}
        ]]}
    };
    // any single dimension
    (@groups [@{2...4} $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [{2} {3} {4}]]}
    };

    //----------------------------
    // explicit groups, then the callback

    (@groups [[$($alt:tt)*] $($rest:tt)*] [$($done:tt)*]) => {
        gen_each!{@groups [$($rest)*] [$($done)* [$($alt)*]]}
    };
    (@groups [$mac:ident!($($pattern:tt)*) => {$($body:tt)*} $(;)*] [$($groups:tt)*]) => {
        macro_rules! $mac {
            ($($pattern)*) => {$($body)*};
        }
        gen_each!{@product [$($groups)*] $mac ()}
    };

    //----------------------------
    // the product itself
    //
    // `@fan` only sees the remaining groups as a single token tree; a
    // repetition inside the one over `$alt` would not be allowed.

    (@product [] $mac:ident ($($args:tt)*)) => {
        $mac!{$($args)*}
    };
    (@product [[$($alt:tt)*] $($rest:tt)*] $mac:ident $args:tt) => {
        gen_each!{@fan [$($alt)*] [$($rest)*] $mac $args}
    };
    (@fan [$($alt:tt)*] $rest:tt $mac:ident $args:tt) => {
        $( gen_each!{@push $alt $rest $mac $args} )*
    };
    (@push $alt:tt $rest:tt $mac:ident ($($args:tt)*)) => {
        gen_each!{@product $rest $mac ($($args)* $alt)}
    };

    //----------------------------
    // entry point

    ($($arg:tt)*) => {
        gen_each!{@groups [$($arg)*] []}
    };
}

/// Synthesize a `Vn` vector type from a `tt` of the size.
macro_rules! V {
    (2, $X:ty) => { V2<$X> };
    (3, $X:ty) => { V3<$X> };
    (4, $X:ty) => { V4<$X> };
}

/// Synthesize an `Mn` matrix type from a `tt` of the size.
macro_rules! M {
    (2, $V:ty) => { M2<$V> };
    (3, $V:ty) => { M3<$V> };
    (4, $V:ty) => { M4<$V> };
}
