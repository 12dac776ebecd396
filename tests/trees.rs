/* ************************************************************************ **
** This file is part of densemat, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazy product trees built from a mix of sources, the way a consumer
//! would wire up a chain of transforms.

#[macro_use]
extern crate densemat_assert_close;
#[macro_use]
extern crate log;
extern crate densemat;
extern crate env_logger;
extern crate failure;
extern crate serde;
extern crate serde_yaml;

use densemat::prelude::*;
use serde::Deserialize;

type FailResult<T> = Result<T, failure::Error>;

fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn camera_chain() -> FailResult<()> {
    init_logging();

    let model = M44::scale(V3([2.0, 2.0, 2.0])) * M44::translation(V3([0.0, 0.0, -1.0]));
    let view = M44::look_at(V3([0.0, 0.0, 5.0]), V3::zero(), V3([0.0, 1.0, 0.0]))?;
    let projection = M44::perspective_fov(Deg(90.0), 1.0, 1.0, 100.0)?;

    let camera = ReferenceMatrix::with_source(view);
    let tree = lazy(model) * &camera * projection;
    assert_eq!((tree.rows(), tree.columns()), (4, 4));

    let expected = model * view * projection;
    assert_close!(abs=1e-12, tree.narrow::<M44>()?, expected);

    // moving the camera is seen by the existing tree
    let moved = M44::look_at(V3([0.0, 3.0, 3.0]), V3::zero(), V3([0.0, 1.0, 0.0]))?;
    camera.set_source(moved);
    assert_close!(abs=1e-12, tree.narrow::<M44>()?, model * moved * projection);

    // a point in front of the camera lands inside the depth range
    let V4([_, _, z, w]) = V4([0.0, 0.0, 0.0, 1.0]) * &tree.narrow::<M44>()?;
    debug!("clip space depth: {}", z / w);
    assert!(0.0 < z / w && z / w < 1.0);
    Ok(())
}

#[test]
fn nested_references() -> FailResult<()> {
    init_logging();

    let inner = ReferenceMatrix::with_source(M33::rotation_z(Deg(90.0)));
    let outer = ReferenceMatrix::with_source(lazy(M33::uniform_scale(2.0)) * &inner);
    let tree = lazy(V3([1.0, 0.0, 0.0])) * &outer;
    assert!(!tree.is_constant());

    assert_close!(abs=1e-15, tree.narrow::<V3>()?, V3([0.0, 2.0, 0.0]));

    inner.set_source(M33::rotation_z(Deg(180.0)));
    assert_close!(abs=1e-15, tree.narrow::<V3>()?, V3([-2.0, 0.0, 0.0]));

    outer.clear();
    assert_eq!(tree.narrow::<V3>()?, V3([1.0, 0.0, 0.0]));
    Ok(())
}

#[test]
fn mixed_shapes_and_dynamic_operands() -> FailResult<()> {
    let affine = M32::translation(V2([1.0, 2.0]));
    let row = DynMatrix::from(V3([3.0, 4.0, 1.0]));
    let tree = lazy(row) * affine * M22::rotation(Deg(90.0));

    assert_eq!((tree.rows(), tree.columns()), (1, 2));
    assert_close!(abs=1e-12, tree.narrow::<V2>()?, V2([-6.0, 4.0]));

    let boxed: Box<dyn MatrixSource> = Box::new(tree);
    assert_close!(abs=1e-12, DynMatrix::from_source(&*boxed)?, DynMatrix::from_flat(1, 2, &[-6.0, 4.0])?);
    Ok(())
}

#[test]
fn errors_convert_to_failure() {
    let tree = lazy(M23::ZERO) * M23::ZERO;
    let err: failure::Error = tree.evaluate().unwrap_err().into();
    assert_eq!(err.to_string(), "cannot multiply a 2x3 matrix by a 2x3 matrix");
}

#[test]
fn precision_in_a_config_file() -> FailResult<()> {
    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct Settings {
        #[serde(default)]
        precision: Precision,
        name: String,
    }

    let settings: Settings = serde_yaml::from_str("name: hello")?;
    assert_eq!(settings.name, "hello");
    assert_eq!(settings.precision, Precision::default());

    let settings: Settings = serde_yaml::from_str("
name: strict
precision:
  singular-epsilon: 0.5
")?;
    let precision = settings.precision.validate()?;

    // det = 0.25, which now counts as singular
    let m = M22::IDENTITY * 0.5;
    assert!(m.inv().is_ok());
    match m.inv_with(&precision) {
        Err(MatrixError::Singular { .. }) => {},
        r => panic!("{:?}", r),
    }
    Ok(())
}
