/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The handful of geometric value types consumed by the transform constructors.

use crate::types::{V2, V3};

/// An angle in radians.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Rad(pub f64);

/// An angle in degrees.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Deg(pub f64);

impl From<Deg> for Rad {
    fn from(Deg(x): Deg) -> Rad { Rad(x.to_radians()) }
}

impl From<Rad> for Deg {
    fn from(Rad(x): Rad) -> Deg { Deg(x.to_degrees()) }
}

impl Rad {
    pub fn sin(self) -> f64 { self.0.sin() }
    pub fn cos(self) -> f64 { self.0.cos() }
    pub fn tan(self) -> f64 { self.0.tan() }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) { self.0.sin_cos() }
}

/// An axis-aligned 2D rectangle, anchored at its minimum corner.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self
    { Rect { x, y, width, height } }

    pub fn min(&self) -> V2 { V2([self.x, self.y]) }
    pub fn size(&self) -> V2 { V2([self.width, self.height]) }
    pub fn center(&self) -> V2 { self.min() + self.size() * 0.5 }
}

/// An axis-aligned 3D box given by its two extreme corners.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Aabb {
    pub min: V3,
    pub max: V3,
}

impl Aabb {
    pub fn new(min: V3, max: V3) -> Self
    { Aabb { min, max } }

    pub fn size(&self) -> V3 { self.max - self.min }
    pub fn center(&self) -> V3 { (self.min + self.max) * 0.5 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles() {
        assert_close!(Rad::from(Deg(180.0)).0, ::std::f64::consts::PI);
        assert_close!(Deg::from(Rad(::std::f64::consts::FRAC_PI_2)).0, 90.0);
        assert_close!(abs=1e-15, Rad::from(Deg(90.0)).cos(), 0.0);
    }

    #[test]
    fn boxes() {
        let r = Rect::new(1.0, 2.0, 4.0, 6.0);
        assert_eq!(r.center(), V2([3.0, 5.0]));

        let b = Aabb::new(V3([-1.0, 0.0, 2.0]), V3([1.0, 4.0, 3.0]));
        assert_eq!(b.size(), V3([2.0, 4.0, 1.0]));
        assert_eq!(b.center(), V3([0.0, 2.0, 2.5]));
    }
}
