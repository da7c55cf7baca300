//! Channel → auxiliary-detector mapping.
//!
//! The map is produced by a detector-specific builder and handed to the core
//! fully populated; the core only reads it. Two-stage lookup: a module name
//! resolves to its index in the auxiliary-detector sequence, then a channel
//! number indexes (by position) into that module's channel vector of
//! sensitive sub-volume indices.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::volumes::AuxDetGeo;

/// Read-only name→index and channel→sensitive-volume association for the
/// auxiliary detectors.
#[derive(Clone, Debug, Default)]
pub struct AuxDetChannelMap {
    name_to_index: HashMap<String, usize>,
    channels_by_aux_det: HashMap<usize, Vec<usize>>,
}

impl AuxDetChannelMap {
    /// Module index for a generated module name.
    pub fn aux_det_index(&self, name: &str) -> Result<usize, GeometryError> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::UnknownAuxDetName { name: name.to_owned() })
    }

    /// Resolve `(module index, sensitive sub-volume index)` for a channel of
    /// the named module.
    ///
    /// Channel numbers are positions in the module's channel vector,
    /// contiguous from 0; a channel at or past the vector size is a
    /// configuration error carrying the module index and the vector size.
    pub fn resolve_channel(
        &self,
        name: &str,
        channel: u32,
    ) -> Result<(usize, usize), GeometryError> {
        let aux_det = self.aux_det_index(name)?;
        let channels = self
            .channels_by_aux_det
            .get(&aux_det)
            .ok_or(GeometryError::MissingChannelVector { aux_det })?;
        match channels.get(channel as usize) {
            Some(&sensitive) => Ok((aux_det, sensitive)),
            None => Err(GeometryError::ChannelOutOfRange {
                aux_det,
                channel,
                size: channels.len(),
            }),
        }
    }

    /// Number of channels registered for a module index, 0 when none.
    pub fn n_channels(&self, aux_det: usize) -> usize {
        self.channels_by_aux_det.get(&aux_det).map_or(0, Vec::len)
    }
}

/// Builder for [`AuxDetChannelMap`], used by detector-specific channel-mapping
/// code. Duplicate module names are rejected at build time.
#[derive(Clone, Debug, Default)]
pub struct AuxDetChannelMapBuilder {
    names: Vec<(String, usize)>,
    channels: HashMap<usize, Vec<usize>>,
}

impl AuxDetChannelMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module name at the given index in the auxiliary-detector
    /// sequence.
    pub fn aux_det(mut self, name: impl Into<String>, index: usize) -> Self {
        self.names.push((name.into(), index));
        self
    }

    /// Append a channel to a module's channel vector; the channel number is
    /// the current vector length.
    pub fn channel(mut self, aux_det: usize, sensitive: usize) -> Self {
        self.channels.entry(aux_det).or_default().push(sensitive);
        self
    }

    pub fn build(self) -> Result<AuxDetChannelMap, GeometryError> {
        let mut name_to_index = HashMap::with_capacity(self.names.len());
        for (name, index) in self.names {
            if name_to_index.insert(name.clone(), index).is_some() {
                return Err(GeometryError::DuplicateAuxDetName { name });
            }
        }
        Ok(AuxDetChannelMap { name_to_index, channels_by_aux_det: self.channels })
    }
}

/// First auxiliary detector (in the supplied sequence order) whose
/// tolerance-inflated trapezoidal bounds contain `point`.
///
/// The sequence is supplied by the caller rather than owned, because
/// auxiliary detectors may be queried independently of the hierarchy's own
/// sort; the scan order is only canonical once the sequence is sorted.
pub fn aux_det_at(
    point: &Point3<f64>,
    aux_dets: &[AuxDetGeo],
    tolerance: f64,
) -> Option<usize> {
    aux_dets.iter().position(|ad| ad.contains(point, tolerance))
}

/// Like [`aux_det_at`], but absence is a typed error carrying the point and
/// tolerance, for callers that treat a miss as misconfiguration.
pub fn aux_det_at_or_err(
    point: &Point3<f64>,
    aux_dets: &[AuxDetGeo],
    tolerance: f64,
) -> Result<usize, GeometryError> {
    aux_det_at(point, aux_dets, tolerance).ok_or(GeometryError::AuxDetNotFound {
        point: [point.x, point.y, point.z],
        tolerance,
    })
}

/// `(module index, sensitive sub-volume index)` of the first sensitive
/// sub-volume containing `point`, scanning the containing module's
/// sub-volumes in sequence order.
pub fn sensitive_at(
    point: &Point3<f64>,
    aux_dets: &[AuxDetGeo],
    tolerance: f64,
) -> Option<(usize, usize)> {
    let ad = aux_det_at(point, aux_dets, tolerance)?;
    let sv = aux_dets[ad].sensitive_at(point, tolerance)?;
    Some((ad, sv))
}

/// Like [`sensitive_at`], but absence is a typed error carrying the point
/// and tolerance.
pub fn sensitive_at_or_err(
    point: &Point3<f64>,
    aux_dets: &[AuxDetGeo],
    tolerance: f64,
) -> Result<(usize, usize), GeometryError> {
    sensitive_at(point, aux_dets, tolerance).ok_or(GeometryError::AuxDetNotFound {
        point: [point.x, point.y, point.z],
        tolerance,
    })
}
