//! Standard ordering policy for detector geometries.

use std::cmp::Ordering;

use crate::error::GeometryError;
use crate::sorting::{DISTANCE_TOL, GeoObjectSorter};
use crate::volumes::{
    AuxDetGeo, AuxDetSensitiveGeo, CryostatGeo, DriftDirection, OpDetGeo, PlaneGeo, TpcGeo,
    WireGeo,
};

/// The standard comparison policy:
/// - auxiliary detectors and sensitive volumes by the numeric suffix of the
///   generated volume name;
/// - cryostats, TPCs and optical detectors by world X of the local origin;
/// - planes so the plane number increases along the drift direction, with
///   Z then Y breaking near-ties;
/// - wires by world Z of the center, with Y then X breaking near-ties.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardSorter;

/// Numeric suffix of a generated volume name (`"volAuxDet12"` → 12).
///
/// Names without a trailing number sort as 0; the stable sort keeps their
/// construction order.
pub(crate) fn name_suffix(name: &str) -> u32 {
    let digits = name.chars().rev().take_while(char::is_ascii_digit).count();
    name[name.len() - digits..].parse().unwrap_or(0)
}

/// Base plane order: descending world X (the drift direction of the
/// reference configuration is negative X), then ascending Z, then ascending
/// Y, each coordinate compared up to [`DISTANCE_TOL`].
fn plane_order(p1: &PlaneGeo, p2: &PlaneGeo) -> Ordering {
    let a = p1.origin();
    let b = p2.origin();
    if (a.x - b.x).abs() > DISTANCE_TOL {
        return b.x.total_cmp(&a.x);
    }
    if (a.z - b.z).abs() > DISTANCE_TOL {
        return a.z.total_cmp(&b.z);
    }
    a.y.total_cmp(&b.y)
}

/// Wire order: ascending world Z of the center, then Y, then X, each
/// coordinate compared up to [`DISTANCE_TOL`].
fn wire_order(w1: &WireGeo, w2: &WireGeo) -> Ordering {
    let a = w1.center();
    let b = w2.center();
    if (a.z - b.z).abs() > DISTANCE_TOL {
        return a.z.total_cmp(&b.z);
    }
    if (a.y - b.y).abs() > DISTANCE_TOL {
        return a.y.total_cmp(&b.y);
    }
    a.x.total_cmp(&b.x)
}

impl GeoObjectSorter for StandardSorter {
    fn sort_cryostats(&self, cryostats: &mut [CryostatGeo]) {
        cryostats.sort_by(|a, b| a.origin().x.total_cmp(&b.origin().x));
    }

    fn sort_tpcs(&self, tpcs: &mut [TpcGeo]) {
        tpcs.sort_by(|a, b| a.origin().x.total_cmp(&b.origin().x));
    }

    fn sort_op_dets(&self, op_dets: &mut [OpDetGeo]) {
        op_dets.sort_by(|a, b| a.center().x.total_cmp(&b.center().x));
    }

    fn sort_planes(
        &self,
        planes: &mut [PlaneGeo],
        drift: DriftDirection,
    ) -> Result<(), GeometryError> {
        // Planes increase in drift direction; the base order assumes
        // negative drift, positive drift takes the reversed result.
        match drift {
            DriftDirection::NegX => planes.sort_by(plane_order),
            DriftDirection::PosX => {
                planes.sort_by(plane_order);
                planes.reverse();
            }
            DriftDirection::Unknown => {
                return Err(GeometryError::UnknownDriftDirection { tpc: String::new() });
            }
        }
        Ok(())
    }

    fn sort_wires(&self, wires: &mut [WireGeo]) {
        wires.sort_by(wire_order);
    }

    fn sort_aux_dets(&self, aux_dets: &mut [AuxDetGeo]) {
        aux_dets.sort_by_key(|ad| name_suffix(ad.name()));
    }

    fn sort_aux_det_sensitive(&self, volumes: &mut [AuxDetSensitiveGeo]) {
        volumes.sort_by_key(|sv| name_suffix(sv.name()));
    }
}
