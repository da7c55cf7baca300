//! Top-level geometry core: owns the volume hierarchy, drives the canonical
//! sort and the reindex pass, and answers position queries.
//!
//! Lifecycle: the loader builds the nodes, [`GeometryCore::new`] sorts and
//! reindexes them once, and everything afterwards is a read-only query.
//! `sort` and `reindex` take `&mut self`, queries take `&self`, so the borrow
//! checker is the single-writer/many-readers lock the design calls for.

use itertools::Itertools;
use nalgebra::Point3;

use crate::error::GeometryError;
use crate::ids::{AuxDetId, CryostatId, TpcId};
use crate::sorting::standard::name_suffix;
use crate::sorting::{DISTANCE_TOL, GeoObjectSorter};
use crate::volumes::{AuxDetGeo, CryostatGeo, TpcGeo};

/// Most specific volume resolved for a world point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VolumeRef {
    /// The point is inside a cryostat but in none of its TPCs.
    Cryostat(CryostatId),
    /// The point is inside a TPC.
    Tpc(TpcId),
}

/// The geometry core. Owns the cryostat hierarchy and the flat auxiliary
/// detector sequence.
#[derive(Clone, Debug)]
pub struct GeometryCore {
    cryostats: Vec<CryostatGeo>,
    aux_dets: Vec<AuxDetGeo>,
}

impl GeometryCore {
    /// Take ownership of loader-built nodes, sort every sibling set with
    /// `sorter` and assign identities. The value is never observable in an
    /// unsorted state.
    pub fn new(
        cryostats: Vec<CryostatGeo>,
        aux_dets: Vec<AuxDetGeo>,
        sorter: &dyn GeoObjectSorter,
    ) -> Result<Self, GeometryError> {
        let mut core = Self { cryostats, aux_dets };
        core.sort(sorter)?;
        Ok(core)
    }

    /// Sort every sibling set top-down with `sorter`, then reindex.
    ///
    /// Exclusive: requires `&mut self`, so no query can observe a partially
    /// sorted hierarchy.
    pub fn sort(&mut self, sorter: &dyn GeoObjectSorter) -> Result<(), GeometryError> {
        sorter.sort_cryostats(&mut self.cryostats);
        for cryo in &mut self.cryostats {
            cryo.sort_sub_volumes(sorter)?;
        }
        sorter.sort_aux_dets(&mut self.aux_dets);
        for ad in &mut self.aux_dets {
            ad.sort_sub_volumes(sorter);
        }
        self.reindex();
        log::debug!(
            "geometry sorted: {} cryostats, {} auxiliary detectors",
            self.cryostats.len(),
            self.aux_dets.len()
        );
        Ok(())
    }

    /// Recompute every volume's identity tuple from its current position
    /// among its siblings, parent before child. Idempotent between sorts.
    pub fn reindex(&mut self) {
        for (c, cryo) in self.cryostats.iter_mut().enumerate() {
            cryo.update_after_sorting(CryostatId(c as u32));
        }
        for (a, ad) in self.aux_dets.iter_mut().enumerate() {
            ad.update_after_sorting(AuxDetId(a as u32));
        }
    }

    pub fn n_cryostats(&self) -> usize {
        self.cryostats.len()
    }

    pub fn cryostats(&self) -> &[CryostatGeo] {
        &self.cryostats
    }

    /// Checked cryostat accessor.
    pub fn cryostat(&self, c: usize) -> Result<&CryostatGeo, GeometryError> {
        self.cryostats.get(c).ok_or(GeometryError::ChildOutOfRange {
            kind: "cryostat",
            index: c,
            size: self.cryostats.len(),
        })
    }

    pub fn n_aux_dets(&self) -> usize {
        self.aux_dets.len()
    }

    pub fn aux_dets(&self) -> &[AuxDetGeo] {
        &self.aux_dets
    }

    /// Checked auxiliary-detector accessor.
    pub fn aux_det(&self, a: usize) -> Result<&AuxDetGeo, GeometryError> {
        self.aux_dets.get(a).ok_or(GeometryError::ChildOutOfRange {
            kind: "auxiliary detector",
            index: a,
            size: self.aux_dets.len(),
        })
    }

    /// Largest plane count over all TPCs.
    pub fn max_planes(&self) -> usize {
        self.cryostats.iter().map(CryostatGeo::max_planes).max().unwrap_or(0)
    }

    /// Largest wire count over all planes.
    pub fn max_wires(&self) -> usize {
        self.cryostats.iter().map(CryostatGeo::max_wires).max().unwrap_or(0)
    }

    /// First cryostat (in canonical order) whose tolerance-inflated bounds
    /// contain `point`, or `None` when the point is outside all of them.
    pub fn cryostat_at(&self, point: &Point3<f64>, tolerance: f64) -> Option<&CryostatGeo> {
        self.cryostats.iter().find(|c| c.contains(point, tolerance))
    }

    /// TPC containing `point`, descending cryostat → TPC, or `None` when the
    /// point misses every TPC.
    pub fn position_to_tpc(&self, point: &Point3<f64>, tolerance: f64) -> Option<&TpcGeo> {
        self.cryostat_at(point, tolerance)?.tpc_at(point, tolerance)
    }

    /// Most specific volume containing `point`: a TPC when one matches, the
    /// enclosing cryostat when the point falls in an inter-TPC gap, `None`
    /// when the point is outside the known geometry. "Not found" is an
    /// expected outcome, not an error.
    pub fn locate(&self, point: &Point3<f64>, tolerance: f64) -> Option<VolumeRef> {
        let cryo = self.cryostat_at(point, tolerance)?;
        if let Some(tpc) = cryo.tpc_at(point, tolerance)
            && let Some(id) = tpc.id()
        {
            return Some(VolumeRef::Tpc(id));
        }
        cryo.id().map(VolumeRef::Cryostat)
    }

    /// Validate the post-sort ordering and post-reindex identity invariants,
    /// returning the first violation found.
    pub fn validate_invariants(&self) -> Result<(), GeometryError> {
        for (a, b) in self.cryostats.iter().tuple_windows() {
            if a.origin().x > b.origin().x + DISTANCE_TOL {
                return Err(GeometryError::Unsorted(format!(
                    "cryostats `{}` and `{}` out of X order",
                    a.name(),
                    b.name()
                )));
            }
        }
        for (c, cryo) in self.cryostats.iter().enumerate() {
            if cryo.id() != Some(CryostatId(c as u32)) {
                return Err(GeometryError::Unsorted(format!(
                    "cryostat `{}` at position {c} carries id {:?}",
                    cryo.name(),
                    cryo.id()
                )));
            }
            for (ta, tb) in cryo.tpcs().iter().tuple_windows() {
                if ta.origin().x > tb.origin().x + DISTANCE_TOL {
                    return Err(GeometryError::Unsorted(format!(
                        "TPCs `{}` and `{}` out of X order",
                        ta.name(),
                        tb.name()
                    )));
                }
            }
            for (t, tpc) in cryo.tpcs().iter().enumerate() {
                let expected = TpcId { cryostat: CryostatId(c as u32), tpc: t as u32 };
                if tpc.id() != Some(expected) {
                    return Err(GeometryError::Unsorted(format!(
                        "TPC `{}` at position {t} carries id {:?}",
                        tpc.name(),
                        tpc.id()
                    )));
                }
                for plane in tpc.planes() {
                    for (wa, wb) in plane.wires().iter().tuple_windows() {
                        if wa.center().z > wb.center().z + DISTANCE_TOL {
                            return Err(GeometryError::Unsorted(format!(
                                "wires out of Z order in plane `{}`",
                                plane.name()
                            )));
                        }
                    }
                }
            }
        }
        for (a, b) in self.aux_dets.iter().tuple_windows() {
            if name_suffix(a.name()) > name_suffix(b.name()) {
                return Err(GeometryError::Unsorted(format!(
                    "auxiliary detectors `{}` and `{}` out of name order",
                    a.name(),
                    b.name()
                )));
            }
        }
        Ok(())
    }

    /// Human-readable summary of the whole geometry, one line per cryostat.
    pub fn info(&self, indent: &str) -> String {
        let mut out = format!(
            "{indent}{} cryostats, {} auxiliary detectors",
            self.cryostats.len(),
            self.aux_dets.len()
        );
        let nested = format!("{indent}  ");
        for cryo in &self.cryostats {
            out.push('\n');
            out.push_str(&cryo.info(&nested));
        }
        out
    }
}

impl std::fmt::Display for GeometryCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.info(""))
    }
}
