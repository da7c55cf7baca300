//! Wire plane: an ordered set of parallel sense wires inside a TPC.

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::ids::{PlaneId, WireId};
use crate::sorting::GeoObjectSorter;
use crate::transform::{BoxExtent, LocalTransform, Solid};
use crate::volumes::WireGeo;

/// One sense-wire plane. Owns its wires; the wire sequence is reordered in
/// place by the canonical sorter but never grows or shrinks after
/// construction.
#[derive(Clone, Debug)]
pub struct PlaneGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    wires: Vec<WireGeo>,
    id: Option<PlaneId>,
}

impl PlaneGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
        wires: Vec<WireGeo>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        solid.as_box(&name)?;
        if wires.is_empty() {
            return Err(GeometryError::EmptyVolume { name });
        }
        let extent = BoxExtent::from_solid(solid, &trans);
        Ok(Self { name, trans, extent, wires, id: None })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-frame position of the plane's local origin; the key the standard
    /// plane sort uses.
    pub fn origin(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.trans
    }

    pub fn n_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn wires(&self) -> &[WireGeo] {
        &self.wires
    }

    /// Checked wire accessor.
    pub fn wire(&self, w: usize) -> Result<&WireGeo, GeometryError> {
        self.wires.get(w).ok_or(GeometryError::ChildOutOfRange {
            kind: "wire",
            index: w,
            size: self.wires.len(),
        })
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<PlaneId> {
        self.id
    }

    pub(crate) fn sort_sub_volumes(&mut self, sorter: &dyn GeoObjectSorter) {
        sorter.sort_wires(&mut self.wires);
    }

    /// Set this plane's identity and push derived identities to its wires.
    pub(crate) fn update_after_sorting(&mut self, id: PlaneId) {
        self.id = Some(id);
        for (w, wire) in self.wires.iter_mut().enumerate() {
            wire.update_after_sorting(WireId { plane: id, wire: w as u32 });
        }
    }
}
