//! Sense wire: the finest-grained element of the readout hierarchy.

use nalgebra::{Point3, Vector3};

use crate::ids::WireId;
use crate::transform::LocalTransform;

/// One sense wire. The wire runs along its local z axis, centered on the
/// local origin.
#[derive(Clone, Debug)]
pub struct WireGeo {
    trans: LocalTransform,
    half_length: f64,
    id: Option<WireId>,
}

impl WireGeo {
    pub fn new(trans: LocalTransform, half_length: f64) -> Self {
        Self { trans, half_length, id: None }
    }

    /// World-frame center of the wire; the key the standard wire sort uses.
    pub fn center(&self) -> Point3<f64> {
        self.trans.origin()
    }

    /// World-frame direction of the wire axis (unit vector).
    pub fn direction(&self) -> Vector3<f64> {
        self.trans.local_to_world_vect(&Vector3::z())
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.trans
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<WireId> {
        self.id
    }

    pub(crate) fn update_after_sorting(&mut self, id: WireId) {
        self.id = Some(id);
    }
}
