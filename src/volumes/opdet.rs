//! Optical detector element inside a cryostat.

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::ids::OpDetId;
use crate::transform::{BoxExtent, LocalTransform, Solid};

/// One optical detector. Participates in nearest-detector queries via
/// [`OpDetGeo::distance_to_point`].
#[derive(Clone, Debug)]
pub struct OpDetGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    id: Option<OpDetId>,
}

impl OpDetGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        solid.as_box(&name)?;
        let extent = BoxExtent::from_solid(solid, &trans);
        Ok(Self { name, trans, extent, id: None })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-frame center of the detector.
    pub fn center(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    /// Euclidean distance from `point` to the detector center.
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        (point - self.center()).norm()
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<OpDetId> {
        self.id
    }

    pub(crate) fn update_after_sorting(&mut self, id: OpDetId) {
        self.id = Some(id);
    }
}
