//! Time-projection chamber: the mid-level container of the readout
//! hierarchy.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::ids::{PlaneId, TpcId};
use crate::sorting::GeoObjectSorter;
use crate::transform::{BoxExtent, LocalTransform, Solid};
use crate::volumes::PlaneGeo;

/// Drift-axis orientation of a TPC, fixed at construction by the loader.
///
/// The plane sort direction depends on it: planes are ordered so that the
/// plane number increases along the drift direction. `Unknown` makes plane
/// sorting a fatal error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriftDirection {
    PosX,
    NegX,
    Unknown,
}

/// One time-projection chamber. Owns its wire planes.
#[derive(Clone, Debug)]
pub struct TpcGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    half_width: f64,
    half_height: f64,
    half_length: f64,
    drift: DriftDirection,
    planes: Vec<PlaneGeo>,
    id: Option<TpcId>,
}

impl TpcGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
        drift: DriftDirection,
        planes: Vec<PlaneGeo>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        let (half_width, half_height, half_length) = solid.as_box(&name)?;
        if planes.is_empty() {
            return Err(GeometryError::EmptyVolume { name });
        }
        let extent = BoxExtent::from_solid(solid, &trans);
        Ok(Self {
            name,
            trans,
            extent,
            half_width,
            half_height,
            half_length,
            drift,
            planes,
            id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-frame position of the TPC's local origin; the key the standard
    /// TPC sort uses.
    pub fn origin(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.trans
    }

    pub fn drift_direction(&self) -> DriftDirection {
        self.drift
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// True iff `point` lies within the TPC's half-extents inflated by
    /// `tolerance` on every axis (boundary inclusive).
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.trans.world_to_local(point);
        local.x.abs() <= self.half_width + tolerance
            && local.y.abs() <= self.half_height + tolerance
            && local.z.abs() <= self.half_length + tolerance
    }

    pub fn n_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn planes(&self) -> &[PlaneGeo] {
        &self.planes
    }

    /// Checked plane accessor.
    pub fn plane(&self, p: usize) -> Result<&PlaneGeo, GeometryError> {
        self.planes.get(p).ok_or(GeometryError::ChildOutOfRange {
            kind: "plane",
            index: p,
            size: self.planes.len(),
        })
    }

    /// Largest wire count over this TPC's planes.
    pub fn max_wires(&self) -> usize {
        self.planes.iter().map(PlaneGeo::n_wires).max().unwrap_or(0)
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<TpcId> {
        self.id
    }

    /// Sort this TPC's planes (drift-direction aware) and, inside each, its
    /// wires. The drift direction must be resolved before this runs.
    pub(crate) fn sort_sub_volumes(
        &mut self,
        sorter: &dyn GeoObjectSorter,
    ) -> Result<(), GeometryError> {
        if self.drift == DriftDirection::Unknown {
            return Err(GeometryError::UnknownDriftDirection { tpc: self.name.clone() });
        }
        sorter.sort_planes(&mut self.planes, self.drift)?;
        for plane in &mut self.planes {
            plane.sort_sub_volumes(sorter);
        }
        Ok(())
    }

    /// Set this TPC's identity and push derived identities to its planes.
    pub(crate) fn update_after_sorting(&mut self, id: TpcId) {
        self.id = Some(id);
        for (p, plane) in self.planes.iter_mut().enumerate() {
            plane.update_after_sorting(PlaneId { tpc: id, plane: p as u32 });
        }
    }
}
