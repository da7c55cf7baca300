//! Local↔world coordinate transforms and world-frame bounding extents.
//!
//! Every volume node owns one [`LocalTransform`] (an invertible isometry) and
//! caches one [`BoxExtent`], the world-frame axis-aligned bounding box of its
//! solid under that transform. The extent is exact — query-time tolerance is
//! never baked into it.

use nalgebra::{Isometry3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Solid description handed over by the geometry loader.
///
/// Dimensions are half-extents along the local axes. Anything the loader
/// describes beyond a box or a trapezoid is rejected at node construction
/// with [`GeometryError::UnsupportedShape`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Solid {
    /// Rectangular box.
    Box {
        half_width: f64,
        half_height: f64,
        half_length: f64,
    },
    /// Trapezoidal cross-section: the local-x half-width varies linearly
    /// along local z, from `half_width1` at `z = -half_length` to
    /// `half_width2` at `z = +half_length`.
    Trapezoid {
        half_width1: f64,
        half_width2: f64,
        half_height: f64,
        half_length: f64,
    },
    /// Any other primitive the loader may describe, carried by name so the
    /// rejection error can report it.
    Other(String),
}

impl Solid {
    /// Half-dimensions `(x, y, z)` as a plain box.
    ///
    /// Only [`Solid::Box`] qualifies; trapezoids are not boxes for nodes that
    /// require a rectangular cross-section.
    pub(crate) fn as_box(&self, volume: &str) -> Result<(f64, f64, f64), GeometryError> {
        match *self {
            Solid::Box { half_width, half_height, half_length } => {
                Ok((half_width, half_height, half_length))
            }
            Solid::Trapezoid { .. } => Err(GeometryError::UnsupportedShape {
                volume: volume.to_owned(),
                shape: "Trapezoid".to_owned(),
            }),
            Solid::Other(ref shape) => Err(GeometryError::UnsupportedShape {
                volume: volume.to_owned(),
                shape: shape.clone(),
            }),
        }
    }

    /// Trapezoid parameters `(half_width1, half_width2, half_height,
    /// half_length)`. A box is the degenerate trapezoid with equal
    /// half-widths.
    pub(crate) fn as_trapezoid(
        &self,
        volume: &str,
    ) -> Result<(f64, f64, f64, f64), GeometryError> {
        match *self {
            Solid::Box { half_width, half_height, half_length } => {
                Ok((half_width, half_width, half_height, half_length))
            }
            Solid::Trapezoid { half_width1, half_width2, half_height, half_length } => {
                Ok((half_width1, half_width2, half_height, half_length))
            }
            Solid::Other(ref shape) => Err(GeometryError::UnsupportedShape {
                volume: volume.to_owned(),
                shape: shape.clone(),
            }),
        }
    }

    /// Largest half-dimensions of the solid, for bounding-extent purposes.
    fn bounding_half_dims(&self) -> (f64, f64, f64) {
        match *self {
            Solid::Box { half_width, half_height, half_length } => {
                (half_width, half_height, half_length)
            }
            Solid::Trapezoid { half_width1, half_width2, half_height, half_length } => {
                (half_width1.max(half_width2), half_height, half_length)
            }
            Solid::Other(_) => (0.0, 0.0, 0.0),
        }
    }
}

/// Invertible local-to-world map, owned exclusively by one volume node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalTransform {
    to_world: Isometry3<f64>,
}

impl LocalTransform {
    pub fn new(to_world: Isometry3<f64>) -> Self {
        Self { to_world }
    }

    /// Pure translation, the common case for nested detector volumes.
    pub fn from_translation(offset: Vector3<f64>) -> Self {
        Self { to_world: Isometry3::translation(offset.x, offset.y, offset.z) }
    }

    /// Identity transform: the local frame is the world frame.
    pub fn identity() -> Self {
        Self { to_world: Isometry3::identity() }
    }

    pub fn local_to_world(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_world.transform_point(p)
    }

    pub fn world_to_local(&self, p: &Point3<f64>) -> Point3<f64> {
        self.to_world.inverse_transform_point(p)
    }

    pub fn local_to_world_vect(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.to_world.transform_vector(v)
    }

    pub fn world_to_local_vect(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.to_world.inverse_transform_vector(v)
    }

    /// World-frame position of the local origin. This is the coordinate the
    /// standard sort policy keys on.
    pub fn origin(&self) -> Point3<f64> {
        self.local_to_world(&Point3::origin())
    }
}

/// World-frame axis-aligned bounding box of a volume.
///
/// Built once at node construction by mapping the eight corners of the
/// solid's local bounding box through the node's transform and reducing to
/// per-axis min/max. Always fully contains the volume; never inflated by any
/// tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxExtent {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoxExtent {
    /// Reduce the transformed corners of a local box to a world-frame AABB.
    pub fn from_solid(solid: &Solid, trans: &LocalTransform) -> Self {
        let (hw, hh, hl) = solid.bounding_half_dims();
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &sx in &[-1.0, 1.0] {
            for &sy in &[-1.0, 1.0] {
                for &sz in &[-1.0, 1.0] {
                    let corner =
                        trans.local_to_world(&Point3::new(sx * hw, sy * hh, sz * hl));
                    for axis in 0..3 {
                        min[axis] = min[axis].min(corner[axis]);
                        max[axis] = max[axis].max(corner[axis]);
                    }
                }
            }
        }
        Self { min, max }
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    pub fn min_x(&self) -> f64 {
        self.min.x
    }

    pub fn max_x(&self) -> f64 {
        self.max.x
    }

    pub fn min_y(&self) -> f64 {
        self.min.y
    }

    pub fn max_y(&self) -> f64 {
        self.max.y
    }

    pub fn min_z(&self) -> f64 {
        self.min.z
    }

    pub fn max_z(&self) -> f64 {
        self.max.z
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Exact extent membership, boundary inclusive, no tolerance.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    const EPS: f64 = 1e-12;

    #[test]
    fn translation_round_trip() {
        let trans = LocalTransform::from_translation(Vector3::new(10.0, -2.0, 300.0));
        let p = Point3::new(1.5, 2.5, -3.5);
        let q = trans.world_to_local(&trans.local_to_world(&p));
        assert!((p - q).norm() < EPS);
    }

    #[test]
    fn rotated_extent_covers_all_corners() {
        // 90 degree rotation about y swaps the roles of x and z.
        let rot = UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            std::f64::consts::FRAC_PI_2,
        );
        let iso = Isometry3::from_parts(Vector3::new(0.0, 0.0, 0.0).into(), rot);
        let solid = Solid::Box { half_width: 1.0, half_height: 2.0, half_length: 3.0 };
        let ext = BoxExtent::from_solid(&solid, &LocalTransform::new(iso));
        assert!((ext.max_x() - 3.0).abs() < 1e-9);
        assert!((ext.max_y() - 2.0).abs() < 1e-9);
        assert!((ext.max_z() - 1.0).abs() < 1e-9);
        assert!((ext.min_x() + 3.0).abs() < 1e-9);
    }

    #[test]
    fn trapezoid_extent_uses_wider_end() {
        let solid = Solid::Trapezoid {
            half_width1: 4.0,
            half_width2: 1.0,
            half_height: 2.0,
            half_length: 5.0,
        };
        let ext = BoxExtent::from_solid(&solid, &LocalTransform::identity());
        assert_eq!(ext.max_x(), 4.0);
        assert_eq!(ext.min_x(), -4.0);
        assert_eq!(ext.max_z(), 5.0);
    }

    #[test]
    fn extent_contains_is_boundary_inclusive() {
        let solid = Solid::Box { half_width: 1.0, half_height: 1.0, half_length: 1.0 };
        let ext = BoxExtent::from_solid(&solid, &LocalTransform::identity());
        assert!(ext.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!ext.contains(&Point3::new(1.0 + 1e-9, 0.0, 0.0)));
    }

    #[test]
    fn non_box_solid_is_rejected() {
        let solid = Solid::Other("Sphere".into());
        let err = solid.as_box("volCryostat").unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedShape {
                volume: "volCryostat".into(),
                shape: "Sphere".into()
            }
        );
        assert!(solid.as_trapezoid("volAuxDet0").is_err());
    }
}
