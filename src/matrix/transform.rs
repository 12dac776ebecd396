/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Constructors for common transforms.
//!
//! Everything here uses row vectors (`v' = v * M`), so translations live in
//! the last row, and a chain of transforms applies left to right. Projections
//! are right-handed and map depth onto `[0, 1]`.

use crate::types::*;
use crate::geom::{Rad, Rect, Aabb};
use crate::error::MatrixError;
use crate::mat;

// ---------------------------------------------------------------------------
// 2D

impl M22 {
    /// Counter-clockwise rotation.
    pub fn rotation(angle: impl Into<Rad>) -> M22 {
        let (s, c) = Rad::sin_cos(angle.into());
        mat::from_array([
            [ c, s],
            [-s, c],
        ])
    }

    pub fn scale(scale: V2) -> M22 {
        mat::from_array([
            [scale[0], 0.0],
            [0.0, scale[1]],
        ])
    }
}

/// `M32` is a 2D affine transform: a linear part in the first two rows,
/// and a translation in the third.
impl M32 {
    pub fn rotation(angle: impl Into<Rad>) -> M32
    { affine_2d(M22::rotation(angle), V2::zero()) }

    pub fn scale(scale: V2) -> M32
    { affine_2d(M22::scale(scale), V2::zero()) }

    pub fn translation(offset: V2) -> M32
    { affine_2d(M22::IDENTITY, offset) }

    /// Maps the unit square `[0, 1]^2` onto `rect`.
    pub fn from_rect(rect: &Rect) -> M32
    { affine_2d(M22::scale(rect.size()), rect.min()) }

    /// Maps the square `[-0.5, 0.5]^2` onto `rect`.
    pub fn from_rect_centered(rect: &Rect) -> M32
    { affine_2d(M22::scale(rect.size()), rect.center()) }
}

fn affine_2d(linear: M22, offset: V2) -> M32 {
    M3([linear[0], linear[1], offset])
}

// ---------------------------------------------------------------------------
// 3D linear, or 2D homogeneous

impl M33 {
    /// Rotation about the x axis.
    pub fn rotation_x(angle: impl Into<Rad>) -> M33 {
        let (s, c) = Rad::sin_cos(angle.into());
        mat::from_array([
            [1.0, 0.0, 0.0],
            [0.0,   c,   s],
            [0.0,  -s,   c],
        ])
    }

    /// Rotation about the y axis.
    pub fn rotation_y(angle: impl Into<Rad>) -> M33 {
        let (s, c) = Rad::sin_cos(angle.into());
        mat::from_array([
            [  c, 0.0,  -s],
            [0.0, 1.0, 0.0],
            [  s, 0.0,   c],
        ])
    }

    /// Rotation about the z axis.
    pub fn rotation_z(angle: impl Into<Rad>) -> M33 {
        let (s, c) = Rad::sin_cos(angle.into());
        mat::from_array([
            [  c,   s, 0.0],
            [ -s,   c, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about an arbitrary axis, which need not be normalized.
    pub fn rotation_axis(axis: V3, angle: impl Into<Rad>) -> Result<M33, MatrixError> {
        let norm = axis.norm();
        if !(norm > 0.0 && norm.is_finite()) {
            return Err(MatrixError::argument("axis", norm, "must have a finite, nonzero length"));
        }
        let V3([x, y, z]) = axis / norm;
        let (s, c) = Rad::sin_cos(angle.into());
        let t = 1.0 - c;

        Ok(mat::from_array([
            [x * x * t +     c, x * y * t + z * s, x * z * t - y * s],
            [x * y * t - z * s, y * y * t +     c, y * z * t + x * s],
            [x * z * t + y * s, y * z * t - x * s, z * z * t +     c],
        ]))
    }

    pub fn scale(scale: V3) -> M33
    { M3(M33::IDENTITY.0.map(|axis| axis.mul_diag(&scale))) }

    pub fn uniform_scale(scale: f64) -> M33
    { M33::scale(V3([scale; 3])) }

    /// 2D translation in homogeneous coordinates.
    pub fn translation(offset: V2) -> M33
    { M33::from_affine_2d(&M32::translation(offset)) }

    /// Maps the unit square `[0, 1]^2` onto `rect`, in homogeneous coordinates.
    pub fn from_rect(rect: &Rect) -> M33
    { M33::from_affine_2d(&M32::from_rect(rect)) }

    /// Maps the square `[-0.5, 0.5]^2` onto `rect`, in homogeneous coordinates.
    pub fn from_rect_centered(rect: &Rect) -> M33
    { M33::from_affine_2d(&M32::from_rect_centered(rect)) }

    fn from_affine_2d(m: &M32) -> M33 {
        M3([m[0].extend(0.0), m[1].extend(0.0), m[2].extend(1.0)])
    }
}

// ---------------------------------------------------------------------------
// 3D homogeneous

impl M44 {
    pub fn rotation_x(angle: impl Into<Rad>) -> M44
    { M44::from_linear(&M33::rotation_x(angle)) }

    pub fn rotation_y(angle: impl Into<Rad>) -> M44
    { M44::from_linear(&M33::rotation_y(angle)) }

    pub fn rotation_z(angle: impl Into<Rad>) -> M44
    { M44::from_linear(&M33::rotation_z(angle)) }

    pub fn rotation_axis(axis: V3, angle: impl Into<Rad>) -> Result<M44, MatrixError>
    { M33::rotation_axis(axis, angle).map(|m| M44::from_linear(&m)) }

    pub fn scale(scale: V3) -> M44
    { M44::from_linear(&M33::scale(scale)) }

    pub fn uniform_scale(scale: f64) -> M44
    { M44::scale(V3([scale; 3])) }

    pub fn translation(offset: V3) -> M44
    { M44::affine(&M33::IDENTITY, offset) }

    /// Maps the unit cube `[0, 1]^3` onto `aabb`.
    pub fn from_aabb(aabb: &Aabb) -> M44
    { M44::affine(&M33::scale(aabb.size()), aabb.min) }

    /// Maps the cube `[-0.5, 0.5]^3` onto `aabb`.
    pub fn from_aabb_centered(aabb: &Aabb) -> M44
    { M44::affine(&M33::scale(aabb.size()), aabb.center()) }

    /// Maps the unit square in the `z = 0` plane onto `rect`.
    pub fn from_rect(rect: &Rect) -> M44 {
        let V2([w, h]) = rect.size();
        M44::affine(&M33::scale(V3([w, h, 1.0])), rect.min().extend(0.0))
    }

    /// Right-handed view matrix for a camera at `eye` looking at `target`.
    pub fn look_at(eye: V3, target: V3, up: V3) -> Result<M44, MatrixError> {
        let back = eye - target;
        if back.sqnorm() == 0.0 {
            return Err(MatrixError::argument("target", 0.0, "must differ from eye"));
        }
        let z = back.unit();

        let side = up.cross(&z);
        let side_norm = side.norm();
        if !(side_norm > 1e-12) {
            return Err(MatrixError::argument("up", side_norm, "must not be parallel to the view direction"));
        }
        let x = side / side_norm;
        let y = z.cross(&x);

        Ok(mat::from_array([
            [x[0], y[0], z[0], 0.0],
            [x[1], y[1], z[1], 0.0],
            [x[2], y[2], z[2], 0.0],
            [-V3::dot(&x, &eye), -V3::dot(&y, &eye), -V3::dot(&z, &eye), 1.0],
        ]))
    }

    /// Perspective projection from a vertical field of view.
    pub fn perspective_fov(fov: impl Into<Rad>, aspect: f64, near: f64, far: f64) -> Result<M44, MatrixError> {
        let Rad(fov) = fov.into();
        if !(fov > 0.0 && fov < ::std::f64::consts::PI) {
            return Err(MatrixError::argument("fov", fov, "must lie strictly between 0 and pi"));
        }
        if !(aspect > 0.0) {
            return Err(MatrixError::argument("aspect", aspect, "must be positive"));
        }
        check_depth_range(near, far)?;

        let y_scale = 1.0 / (fov * 0.5).tan();
        let x_scale = y_scale / aspect;
        Ok(perspective_matrix(x_scale, y_scale, 0.0, 0.0, near, far))
    }

    /// Perspective projection of a view volume with the given size at the near plane.
    pub fn perspective(width: f64, height: f64, near: f64, far: f64) -> Result<M44, MatrixError> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        check_depth_range(near, far)?;

        Ok(perspective_matrix(2.0 * near / width, 2.0 * near / height, 0.0, 0.0, near, far))
    }

    /// Perspective projection of an arbitrary frustum.
    pub fn perspective_off_center(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<M44, MatrixError> {
        check_distinct(("left", left), ("right", right))?;
        check_distinct(("bottom", bottom), ("top", top))?;
        check_depth_range(near, far)?;

        Ok(perspective_matrix(
            2.0 * near / (right - left),
            2.0 * near / (top - bottom),
            (left + right) / (right - left),
            (top + bottom) / (top - bottom),
            near,
            far,
        ))
    }

    /// Orthographic projection of a view volume with the given size.
    pub fn orthographic(width: f64, height: f64, near: f64, far: f64) -> Result<M44, MatrixError> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        check_distinct(("near", near), ("far", far))?;

        let mut m = M44::IDENTITY;
        m[0][0] = 2.0 / width;
        m[1][1] = 2.0 / height;
        m[2][2] = 1.0 / (near - far);
        m[3][2] = near / (near - far);
        Ok(m)
    }

    /// Orthographic projection of an arbitrary box.
    pub fn orthographic_off_center(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<M44, MatrixError> {
        check_distinct(("left", left), ("right", right))?;
        check_distinct(("bottom", bottom), ("top", top))?;
        check_distinct(("near", near), ("far", far))?;

        let mut m = M44::IDENTITY;
        m[0][0] = 2.0 / (right - left);
        m[1][1] = 2.0 / (top - bottom);
        m[2][2] = 1.0 / (near - far);
        m[3] = V4([
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            near / (near - far),
            1.0,
        ]);
        Ok(m)
    }

    /// Embed a linear map, with identity padding.
    fn from_linear(m: &M33) -> M44
    { M44::affine(m, V3::zero()) }

    fn affine(linear: &M33, offset: V3) -> M44 {
        M4([
            linear[0].extend(0.0),
            linear[1].extend(0.0),
            linear[2].extend(0.0),
            offset.extend(1.0),
        ])
    }
}

fn perspective_matrix(x_scale: f64, y_scale: f64, x_skew: f64, y_skew: f64, near: f64, far: f64) -> M44 {
    let depth = far / (near - far);
    mat::from_array([
        [x_scale,     0.0,          0.0,  0.0],
        [    0.0, y_scale,          0.0,  0.0],
        [ x_skew,  y_skew,        depth, -1.0],
        [    0.0,     0.0, near * depth,  0.0],
    ])
}

fn check_positive(name: &'static str, value: f64) -> Result<(), MatrixError> {
    match value > 0.0 && value.is_finite() {
        true => Ok(()),
        false => Err(MatrixError::argument(name, value, "must be positive")),
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), MatrixError> {
    match value.is_finite() {
        true => Ok(()),
        false => Err(MatrixError::argument(name, value, "must be finite")),
    }
}

// both finite, and not equal
fn check_distinct(
    (first_name, first): (&'static str, f64),
    (name, value): (&'static str, f64),
) -> Result<(), MatrixError> {
    check_finite(first_name, first)?;
    check_finite(name, value)?;
    match value != first {
        true => Ok(()),
        false => Err(MatrixError::argument(name, value, "must differ from the opposite bound")),
    }
}

fn check_depth_range(near: f64, far: f64) -> Result<(), MatrixError> {
    check_positive("near", near)?;
    check_positive("far", far)?;
    match near < far {
        true => Ok(()),
        false => Err(MatrixError::argument("near", near, "must be less than far")),
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Deg;

    fn project(v: V3, m: &M44) -> V3 {
        let V4([x, y, z, w]) = v.extend(1.0) * m;
        V3([x, y, z]) / w
    }

    #[test]
    fn rotations_2d() {
        assert_close!(abs=1e-15, V2([1.0, 0.0]) * &M22::rotation(Deg(90.0)), V2([0.0, 1.0]));

        let m = M32::rotation(Deg(90.0));
        assert_close!(abs=1e-15, V3([0.0, 1.0, 1.0]) * &m, V2([-1.0, 0.0]));
    }

    #[test]
    fn affine_2d() {
        let rect = Rect::new(1.0, 2.0, 4.0, 6.0);
        assert_eq!(V3([1.0, 1.0, 1.0]) * &M32::from_rect(&rect), V2([5.0, 8.0]));
        assert_eq!(V3([0.0, 0.0, 1.0]) * &M32::from_rect_centered(&rect), rect.center());
        assert_eq!(V3([2.0, 3.0, 1.0]) * &M33::translation(V2([1.0, -1.0])), V3([3.0, 2.0, 1.0]));
        assert_eq!(V3([0.5, 0.5, 1.0]) * &M33::from_rect(&rect), V3([3.0, 5.0, 1.0]));
        assert_eq!(V3([0.5, 0.5, 1.0]) * &M33::from_rect_centered(&rect), V3([5.0, 8.0, 1.0]));
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let m = M33::rotation_z(Deg(90.0));
        assert_close!(abs=1e-15, V3([1.0, 0.0, 0.0]) * &m, V3([0.0, 1.0, 0.0]));
    }

    #[test]
    fn axis_rotations_agree() {
        let angle = Rad(0.7);
        let cases = [
            (V3([2.0, 0.0, 0.0]), M33::rotation_x(angle)),
            (V3([0.0, 0.5, 0.0]), M33::rotation_y(angle)),
            (V3([0.0, 0.0, 9.0]), M33::rotation_z(angle)),
        ];
        for (axis, expected) in cases.iter() {
            assert_close!(abs=1e-15, M33::rotation_axis(*axis, angle).unwrap(), *expected);
        }

        let m = M33::rotation_axis(V3([1.0, 1.0, 1.0]), Deg(120.0)).unwrap();
        assert_close!(abs=1e-12, V3([1.0, 0.0, 0.0]) * &m, V3([0.0, 1.0, 0.0]));
        assert_close!(abs=1e-12, m.det(), 1.0);
    }

    #[test]
    fn zero_axis() {
        match M44::rotation_axis(V3::zero(), Deg(10.0)) {
            Err(MatrixError::ArgumentOutOfRange { name: "axis", .. }) => {},
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn scale_and_translation() {
        assert_eq!(&M44::scale(V3([2.0, 3.0, 4.0])) * V4([1.0, 1.0, 1.0, 1.0]), V4([2.0, 3.0, 4.0, 1.0]));
        assert_eq!(M44::uniform_scale(2.0), M44::scale(V3([2.0; 3])));
        assert_eq!(M33::uniform_scale(2.0).trace(), 6.0);
        assert_eq!(
            M33::scale(V3([2.0, 3.0, 4.0])),
            mat::from_array([[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]]),
        );

        let t = M44::translation(V3([1.0, 2.0, 3.0]));
        assert_eq!(V4([1.0, 1.0, 1.0, 1.0]) * &t, V4([2.0, 3.0, 4.0, 1.0]));
        assert_eq!(V4([1.0, 1.0, 1.0, 0.0]) * &t, V4([1.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn boxes() {
        let aabb = Aabb::new(V3([-1.0, 0.0, 2.0]), V3([1.0, 4.0, 3.0]));
        assert_eq!(project(V3([1.0, 1.0, 1.0]), &M44::from_aabb(&aabb)), aabb.max);
        assert_eq!(project(V3([0.0, 0.0, 0.0]), &M44::from_aabb(&aabb)), aabb.min);
        assert_eq!(project(V3::zero(), &M44::from_aabb_centered(&aabb)), aabb.center());

        let rect = Rect::new(1.0, 2.0, 4.0, 6.0);
        assert_eq!(project(V3([1.0, 1.0, 7.0]), &M44::from_rect(&rect)), V3([5.0, 8.0, 7.0]));
    }

    #[test]
    fn look_at() {
        let m = M44::look_at(V3([0.0, 0.0, 5.0]), V3::zero(), V3([0.0, 1.0, 0.0])).unwrap();
        assert_close!(abs=1e-15, m, M44::translation(V3([0.0, 0.0, -5.0])));

        // the target ends up straight ahead, along -z
        let m = M44::look_at(V3([3.0, 1.0, -2.0]), V3([0.0, 2.0, 1.0]), V3([0.0, 1.0, 0.0])).unwrap();
        let target = project(V3([0.0, 2.0, 1.0]), &m);
        assert_close!(abs=1e-12, target, V3([0.0, 0.0, -(19.0f64).sqrt()]));
    }

    #[test]
    fn look_at_degenerate() {
        let eye = V3([1.0, 2.0, 3.0]);
        assert!(M44::look_at(eye, eye, V3([0.0, 1.0, 0.0])).is_err());
        assert!(M44::look_at(eye, V3([1.0, 0.0, 3.0]), V3([0.0, 1.0, 0.0])).is_err());
    }

    #[test]
    fn perspective_depth_range() {
        let (near, far) = (0.5, 20.0);
        let projections = [
            M44::perspective_fov(Deg(60.0), 16.0 / 9.0, near, far).unwrap(),
            M44::perspective(2.0, 1.0, near, far).unwrap(),
            M44::perspective_off_center(-1.0, 1.0, -0.5, 0.5, near, far).unwrap(),
        ];
        for m in projections.iter() {
            assert_eq!(m[2][3], -1.0);
            assert_close!(abs=1e-12, project(V3([0.0, 0.0, -near]), m)[2], 0.0);
            assert_close!(abs=1e-12, project(V3([0.0, 0.0, -far]), m)[2], 1.0);
        }

        // the corners of the near plane land on the corners of clip space
        let m = M44::perspective_off_center(-1.0, 3.0, 0.0, 2.0, near, far).unwrap();
        assert_close!(abs=1e-12, project(V3([3.0, 2.0, -near]), &m), V3([1.0, 1.0, 0.0]));
        assert_close!(abs=1e-12, project(V3([-1.0, 0.0, -near]), &m), V3([-1.0, -1.0, 0.0]));
    }

    #[test]
    fn perspective_rejects() {
        assert!(M44::perspective_fov(Deg(0.0), 1.0, 1.0, 2.0).is_err());
        assert!(M44::perspective_fov(Deg(200.0), 1.0, 1.0, 2.0).is_err());
        assert!(M44::perspective_fov(Deg(90.0), 0.0, 1.0, 2.0).is_err());
        assert!(M44::perspective_fov(Deg(90.0), 1.0, 0.0, 2.0).is_err());
        assert!(M44::perspective_fov(Deg(90.0), 1.0, 1.0, -2.0).is_err());
        match M44::perspective(1.0, 1.0, 3.0, 2.0) {
            Err(MatrixError::ArgumentOutOfRange { name: "near", .. }) => {},
            r => panic!("{:?}", r),
        }
        assert!(M44::perspective_off_center(1.0, 1.0, 0.0, 1.0, 1.0, 2.0).is_err());
    }

    #[test]
    fn orthographic() {
        let m = M44::orthographic(4.0, 2.0, 1.0, 11.0).unwrap();
        assert_close!(abs=1e-12, project(V3([2.0, 1.0, -1.0]), &m), V3([1.0, 1.0, 0.0]));
        assert_close!(abs=1e-12, project(V3([-2.0, -1.0, -11.0]), &m), V3([-1.0, -1.0, 1.0]));

        let m = M44::orthographic_off_center(0.0, 4.0, -2.0, 0.0, 1.0, 11.0).unwrap();
        assert_close!(abs=1e-12, project(V3([4.0, 0.0, -1.0]), &m), V3([1.0, 1.0, 0.0]));
        assert_close!(abs=1e-12, project(V3([0.0, -2.0, -11.0]), &m), V3([-1.0, -1.0, 1.0]));

        assert!(M44::orthographic(1.0, 1.0, 2.0, 2.0).is_err());
        assert!(M44::orthographic_off_center(0.0, 1.0, 1.0, 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn projections_reject_nonfinite_bounds() {
        let nan = ::std::f64::NAN;
        let inf = ::std::f64::INFINITY;
        match M44::orthographic(1.0, 1.0, nan, 1.0) {
            Err(MatrixError::ArgumentOutOfRange { name: "near", .. }) => {},
            r => panic!("{:?}", r),
        }
        assert!(M44::orthographic(1.0, 1.0, 0.0, inf).is_err());
        assert!(M44::orthographic_off_center(nan, 1.0, 0.0, 1.0, 0.0, 1.0).is_err());
        assert!(M44::orthographic_off_center(0.0, 1.0, 0.0, nan, 0.0, 1.0).is_err());
        assert!(M44::orthographic_off_center(0.0, 1.0, 0.0, 1.0, -inf, 1.0).is_err());
        assert!(M44::perspective_off_center(nan, 1.0, 0.0, 1.0, 1.0, 2.0).is_err());
    }
}
