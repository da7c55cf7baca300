//! Canonical ordering of sibling volumes.
//!
//! A [`GeoObjectSorter`] imposes a deterministic, physically meaningful total
//! order on every sibling set of the hierarchy. The policy is injected at
//! initialization and invoked top-down: cryostats first, then TPCs and
//! optical detectors within each cryostat, then planes (carrying the owning
//! TPC's drift direction) and wires within each TPC; auxiliary detectors and
//! their sensitive volumes sort independently. After sorting, a reindex pass
//! reassigns every identity tuple (see [`crate::geometry::GeometryCore`]).
//!
//! All sorts must be stable: residual ties beyond the documented tie-break
//! chain preserve construction order.

pub mod standard;

pub use standard::StandardSorter;

use crate::error::GeometryError;
use crate::volumes::{
    AuxDetGeo, AuxDetSensitiveGeo, CryostatGeo, DriftDirection, OpDetGeo, PlaneGeo, TpcGeo,
    WireGeo,
};

/// Tolerance when comparing distances in geometry (length units).
pub const DISTANCE_TOL: f64 = 0.001;

/// Per-level comparison policy.
///
/// One method per sibling kind; implementations reorder the slice in place
/// and must use stable sorts. [`GeoObjectSorter::sort_planes`] receives the
/// drift direction derived one level up; an unresolved direction is a fatal
/// ordering error.
pub trait GeoObjectSorter {
    fn sort_cryostats(&self, cryostats: &mut [CryostatGeo]);

    fn sort_tpcs(&self, tpcs: &mut [TpcGeo]);

    fn sort_op_dets(&self, op_dets: &mut [OpDetGeo]);

    fn sort_planes(
        &self,
        planes: &mut [PlaneGeo],
        drift: DriftDirection,
    ) -> Result<(), GeometryError>;

    fn sort_wires(&self, wires: &mut [WireGeo]);

    fn sort_aux_dets(&self, aux_dets: &mut [AuxDetGeo]);

    fn sort_aux_det_sensitive(&self, volumes: &mut [AuxDetSensitiveGeo]);
}
