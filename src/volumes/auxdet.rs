//! Auxiliary detector modules and their sensitive sub-volumes.
//!
//! Auxiliary detectors sit outside the cryostat hierarchy in a flat sequence
//! and may have a trapezoidal cross-section: the local-x half-width varies
//! linearly along local z between the two recorded half-widths. A box is the
//! degenerate trapezoid with equal half-widths.

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::ids::{AuxDetId, AuxDetSensitiveId};
use crate::sorting::GeoObjectSorter;
use crate::transform::{BoxExtent, LocalTransform, Solid};

/// Tolerant point-in-trapezoid test in the volume's local frame.
///
/// The x bound at a given z interpolates between `half_width1` (at
/// `z = -half_length`) and `half_width2` (at `z = +half_length`):
/// `bound(z) = half_center_width - z * (half_center_width - half_width2) /
/// half_length` with `half_center_width = (half_width1 + half_width2) / 2`.
/// `tolerance` is additive slack applied on every axis and on the
/// interpolated bound, boundary inclusive.
fn trapezoid_contains(
    local: &Point3<f64>,
    half_width1: f64,
    half_width2: f64,
    half_height: f64,
    half_length: f64,
    tolerance: f64,
) -> bool {
    let half_center_width = 0.5 * (half_width1 + half_width2);
    let bound = half_center_width - local.z * (half_center_width - half_width2) / half_length;
    local.z >= -(half_length + tolerance)
        && local.z <= half_length + tolerance
        && local.y >= -(half_height + tolerance)
        && local.y <= half_height + tolerance
        && local.x >= -bound - tolerance
        && local.x <= bound + tolerance
}

/// One sensitive sub-volume of an auxiliary detector module.
#[derive(Clone, Debug)]
pub struct AuxDetSensitiveGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    half_width1: f64,
    half_width2: f64,
    half_height: f64,
    half_length: f64,
    id: Option<AuxDetSensitiveId>,
}

impl AuxDetSensitiveGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        let (half_width1, half_width2, half_height, half_length) =
            solid.as_trapezoid(&name)?;
        let extent = BoxExtent::from_solid(solid, &trans);
        Ok(Self {
            name,
            trans,
            extent,
            half_width1,
            half_width2,
            half_height,
            half_length,
            id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn center(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    pub fn half_width1(&self) -> f64 {
        self.half_width1
    }

    pub fn half_width2(&self) -> f64 {
        self.half_width2
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// Tolerant containment test; see [`trapezoid_contains`] for the bound
    /// convention.
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.trans.world_to_local(point);
        trapezoid_contains(
            &local,
            self.half_width1,
            self.half_width2,
            self.half_height,
            self.half_length,
            tolerance,
        )
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<AuxDetSensitiveId> {
        self.id
    }

    pub(crate) fn update_after_sorting(&mut self, id: AuxDetSensitiveId) {
        self.id = Some(id);
    }
}

/// One auxiliary detector module. Owns its sensitive sub-volumes and carries
/// the generated volume name whose numeric suffix drives the standard sort.
#[derive(Clone, Debug)]
pub struct AuxDetGeo {
    name: String,
    trans: LocalTransform,
    extent: BoxExtent,
    half_width1: f64,
    half_width2: f64,
    half_height: f64,
    half_length: f64,
    sensitive: Vec<AuxDetSensitiveGeo>,
    id: Option<AuxDetId>,
}

impl AuxDetGeo {
    pub fn new(
        name: impl Into<String>,
        trans: LocalTransform,
        solid: &Solid,
        sensitive: Vec<AuxDetSensitiveGeo>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GeometryError::MissingVolume { name: "volAuxDet".to_owned() });
        }
        let (half_width1, half_width2, half_height, half_length) =
            solid.as_trapezoid(&name)?;
        let extent = BoxExtent::from_solid(solid, &trans);
        Ok(Self {
            name,
            trans,
            extent,
            half_width1,
            half_width2,
            half_height,
            half_length,
            sensitive,
            id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn center(&self) -> Point3<f64> {
        self.trans.origin()
    }

    pub fn extent(&self) -> &BoxExtent {
        &self.extent
    }

    pub fn half_width1(&self) -> f64 {
        self.half_width1
    }

    pub fn half_width2(&self) -> f64 {
        self.half_width2
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// Tolerant containment test; see [`trapezoid_contains`] for the bound
    /// convention.
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.trans.world_to_local(point);
        trapezoid_contains(
            &local,
            self.half_width1,
            self.half_width2,
            self.half_height,
            self.half_length,
            tolerance,
        )
    }

    pub fn n_sensitive(&self) -> usize {
        self.sensitive.len()
    }

    pub fn sensitive_volumes(&self) -> &[AuxDetSensitiveGeo] {
        &self.sensitive
    }

    /// Checked sensitive-volume accessor.
    pub fn sensitive_volume(&self, s: usize) -> Result<&AuxDetSensitiveGeo, GeometryError> {
        self.sensitive.get(s).ok_or(GeometryError::ChildOutOfRange {
            kind: "sensitive volume",
            index: s,
            size: self.sensitive.len(),
        })
    }

    /// First sensitive sub-volume (in current sibling order) containing
    /// `point`, or `None` when the point falls in a gap.
    pub fn sensitive_at(&self, point: &Point3<f64>, tolerance: f64) -> Option<usize> {
        self.sensitive.iter().position(|sv| sv.contains(point, tolerance))
    }

    /// Identity assigned by the last reindex pass, `None` before the first.
    pub fn id(&self) -> Option<AuxDetId> {
        self.id
    }

    pub(crate) fn sort_sub_volumes(&mut self, sorter: &dyn GeoObjectSorter) {
        sorter.sort_aux_det_sensitive(&mut self.sensitive);
    }

    /// Set this module's identity and push derived identities to its
    /// sensitive sub-volumes.
    pub(crate) fn update_after_sorting(&mut self, id: AuxDetId) {
        self.id = Some(id);
        for (s, sv) in self.sensitive.iter_mut().enumerate() {
            sv.update_after_sorting(AuxDetSensitiveId { aux_det: id, sensitive: s as u32 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge() -> AuxDetGeo {
        // Wide end (4.0) at z = -10, narrow end (1.0) at z = +10.
        AuxDetGeo::new(
            "volAuxDet3",
            LocalTransform::identity(),
            &Solid::Trapezoid {
                half_width1: 4.0,
                half_width2: 1.0,
                half_height: 2.0,
                half_length: 10.0,
            },
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn interpolated_bound_at_extremes() {
        let ad = wedge();
        // At z = -10 the half-width is 4.0.
        assert!(ad.contains(&Point3::new(3.9, 0.0, -10.0), 0.0));
        assert!(!ad.contains(&Point3::new(4.1, 0.0, -10.0), 0.0));
        // At z = +10 it has shrunk to 1.0.
        assert!(ad.contains(&Point3::new(0.9, 0.0, 10.0), 0.0));
        assert!(!ad.contains(&Point3::new(1.5, 0.0, 10.0), 0.0));
        // At the center it is the mean, 2.5.
        assert!(ad.contains(&Point3::new(2.4, 0.0, 0.0), 0.0));
        assert!(!ad.contains(&Point3::new(2.6, 0.0, 0.0), 0.0));
    }

    #[test]
    fn tolerance_is_additive_on_the_interpolated_bound() {
        let ad = wedge();
        assert!(!ad.contains(&Point3::new(2.6, 0.0, 0.0), 0.0));
        assert!(ad.contains(&Point3::new(2.6, 0.0, 0.0), 0.2));
        // Boundary inclusive exactly at bound + tolerance.
        assert!(ad.contains(&Point3::new(2.7, 0.0, 0.0), 0.2));
        // The other axes get the same slack.
        assert!(ad.contains(&Point3::new(0.0, 2.2, 0.0), 0.2));
        assert!(ad.contains(&Point3::new(0.0, 0.0, -10.2), 0.2));
        assert!(!ad.contains(&Point3::new(0.0, 0.0, -10.3), 0.2));
    }

    #[test]
    fn box_module_is_degenerate_trapezoid() {
        let ad = AuxDetGeo::new(
            "volAuxDet0",
            LocalTransform::identity(),
            &Solid::Box { half_width: 2.0, half_height: 1.0, half_length: 5.0 },
            Vec::new(),
        )
        .unwrap();
        assert_eq!(ad.half_width1(), ad.half_width2());
        assert!(ad.contains(&Point3::new(1.9, 0.0, 4.9), 0.0));
        assert!(ad.contains(&Point3::new(1.9, 0.0, -4.9), 0.0));
        assert!(!ad.contains(&Point3::new(2.1, 0.0, 0.0), 0.0));
    }
}
