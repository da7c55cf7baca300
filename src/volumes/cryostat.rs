//! Cryostat: the top-level container of the readout hierarchy. Owns its TPCs
//! and optical detectors.

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::ids::{CryostatId, OpDetId, TpcId};
use crate::sorting::GeoObjectSorter;
use crate::transform::{BoxExtent, LocalTransform, Solid};
use crate::volumes::{OpDetGeo, TpcGeo};

/// One cryostat volume.
#[derive(Clone, Debug)]
pub struct CryostatGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    half_width: f64,
    half_height: f64,
    half_length: f64,
    tpcs: Vec<TpcGeo>,
    op_dets: Vec<OpDetGeo>,
    id: Option<CryostatId>,
}

impl CryostatGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
        tpcs: Vec<TpcGeo>,
        op_dets: Vec<OpDetGeo>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GeometryError::MissingVolume { name: "volCryostat".to_owned() });
        }
        let (half_width, half_height, half_length) = solid.as_box(&name)?;
        if tpcs.is_empty() {
            return Err(GeometryError::EmptyVolume { name });
        }
        let extent = BoxExtent::from_solid(solid, &trans);
        log::debug!("cryostat volume is {name}");
        Ok(Self {
            name,
            trans,
            extent,
            half_width,
            half_height,
            half_length,
            tpcs,
            op_dets,
            id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-frame position of the cryostat's local origin; the key the
    /// standard cryostat sort uses.
    pub fn origin(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.trans
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

    /// World-frame boundaries as `[min_x, max_x, min_y, max_y, min_z, max_z]`.
    pub fn boundaries(&self) -> [f64; 6] {
        [
            self.extent.min_x(),
            self.extent.max_x(),
            self.extent.min_y(),
            self.extent.max_y(),
            self.extent.min_z(),
            self.extent.max_z(),
        ]
    }

    /// True iff `point` lies within the cryostat's half-extents inflated by
    /// `tolerance` on every axis (boundary inclusive).
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.trans.world_to_local(point);
        local.x.abs() <= self.half_width + tolerance
            && local.y.abs() <= self.half_height + tolerance
            && local.z.abs() <= self.half_length + tolerance
    }

    pub fn n_tpcs(&self) -> usize {
        self.tpcs.len()
    }

    pub fn tpcs(&self) -> &[TpcGeo] {
        &self.tpcs
    }

    /// Checked TPC accessor.
    pub fn tpc(&self, t: usize) -> Result<&TpcGeo, GeometryError> {
        self.tpcs.get(t).ok_or(GeometryError::ChildOutOfRange {
            kind: "TPC",
            index: t,
            size: self.tpcs.len(),
        })
    }

    pub fn n_op_dets(&self) -> usize {
        self.op_dets.len()
    }

    pub fn op_dets(&self) -> &[OpDetGeo] {
        &self.op_dets
    }

    /// Checked optical-detector accessor.
    pub fn op_det(&self, o: usize) -> Result<&OpDetGeo, GeometryError> {
        self.op_dets.get(o).ok_or(GeometryError::ChildOutOfRange {
            kind: "optical detector",
            index: o,
            size: self.op_dets.len(),
        })
    }

    /// First TPC (in current sibling order) whose tolerance-inflated bounds
    /// contain `point`, or `None` when the point falls in a gap.
    ///
    /// Linear scan over the direct children; the small fan-out of real
    /// detectors keeps this acceptable without a spatial index.
    pub fn tpc_at(&self, point: &Point3<f64>, tolerance: f64) -> Option<&TpcGeo> {
        self.tpcs.iter().find(|tpc| tpc.contains(point, tolerance))
    }

    /// Identity of the TPC containing `point`, if any. Only meaningful after
    /// reindexing.
    pub fn position_to_tpc_id(&self, point: &Point3<f64>, tolerance: f64) -> Option<TpcId> {
        self.tpc_at(point, tolerance).and_then(TpcGeo::id)
    }

    /// Index of the optical detector closest to `point` under strict `<`
    /// comparison; equidistant detectors keep the first in iteration order
    /// (canonical only after sorting). `None` when there are no optical
    /// detectors.
    pub fn closest_op_det(&self, point: &Point3<f64>) -> Option<usize> {
        let mut closest: Option<(usize, f64)> = None;
        for (o, det) in self.op_dets.iter().enumerate() {
            let dist = det.distance_to_point(point);
            if closest.is_none_or(|(_, best)| dist < best) {
                closest = Some((o, dist));
            }
        }
        closest.map(|(o, _)| o)
    }

    /// Like [`CryostatGeo::closest_op_det`], but hands back the detector.
    pub fn closest_op_det_ptr(&self, point: &Point3<f64>) -> Option<&OpDetGeo> {
        self.closest_op_det(point).map(|o| &self.op_dets[o])
    }

    /// Largest plane count over this cryostat's TPCs.
    pub fn max_planes(&self) -> usize {
        self.tpcs.iter().map(TpcGeo::n_planes).max().unwrap_or(0)
    }

    /// Largest wire count over this cryostat's planes.
    pub fn max_wires(&self) -> usize {
        self.tpcs.iter().map(TpcGeo::max_wires).max().unwrap_or(0)
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<CryostatId> {
        self.id
    }

    /// Human-readable one-line summary, each line prefixed with `indent`.
    pub fn info(&self, indent: &str) -> String {
        let o = self.origin();
        format!(
            "{indent}cryostat {} ({}) at ({:.1}, {:.1}, {:.1}), \
             {} TPCs, {} optical detectors",
            self.id.map_or_else(|| "unindexed".to_owned(), |id| id.to_string()),
            self.name,
            o.x,
            o.y,
            o.z,
            self.n_tpcs(),
            self.n_op_dets(),
        )
    }

    /// Sort this cryostat's TPCs and optical detectors, then recurse into
    /// each TPC.
    pub(crate) fn sort_sub_volumes(
        &mut self,
        sorter: &dyn GeoObjectSorter,
    ) -> Result<(), GeometryError> {
        sorter.sort_tpcs(&mut self.tpcs);
        for tpc in &mut self.tpcs {
            tpc.sort_sub_volumes(sorter)?;
        }
        sorter.sort_op_dets(&mut self.op_dets);
        Ok(())
    }

    /// Set this cryostat's identity and push derived identities to its TPCs
    /// and optical detectors.
    pub(crate) fn update_after_sorting(&mut self, id: CryostatId) {
        self.id = Some(id);
        for (t, tpc) in self.tpcs.iter_mut().enumerate() {
            tpc.update_after_sorting(TpcId { cryostat: id, tpc: t as u32 });
        }
        for (o, det) in self.op_dets.iter_mut().enumerate() {
            det.update_after_sorting(OpDetId { cryostat: id, op_det: o as u32 });
        }
    }
}

impl std::fmt::Display for CryostatGeo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.info(""))
    }
}
