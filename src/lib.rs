//! # detgeo
//!
//! detgeo models the nested physical geometry of a particle detector —
//! cryostats, time-projection chambers, sense-wire planes and wires, plus
//! optical detectors and auxiliary detector modules — and answers two kinds
//! of queries against it:
//! - *which sub-volume contains this 3-D point?* (tolerant, boundary-aware
//!   containment over the hierarchy);
//! - *what is the canonical, physically meaningful ordering of sibling
//!   volumes?* (deterministic sorting plus identity assignment).
//!
//! ## Initialization protocol
//!
//! An external loader builds the volume nodes (transforms and solids
//! resolved); [`geometry::GeometryCore::new`] then sorts every sibling set
//! with an injected [`sorting::GeoObjectSorter`] policy and runs the reindex
//! pass that assigns every identity tuple, parent before child. From then on
//! the hierarchy is immutable and all queries are pure reads; re-sorting
//! requires exclusive access (`&mut self`).
//!
//! ## Lookup contracts
//!
//! "Point not in any known volume" is an expected outcome and comes back as
//! `Option::None`; configuration violations (unknown module name,
//! out-of-range channel, unresolved drift direction, unsupported solid) are
//! typed [`GeometryError`]s carrying the offending keys.
//!
//! Child scans are linear over the current sibling order; real detectors
//! have tens of children per level, so no spatial index is used. This is a
//! documented design ceiling, not an oversight.

pub mod channelmap;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod sorting;
pub mod transform;
pub mod volumes;

pub use error::GeometryError;
pub use geometry::{GeometryCore, VolumeRef};

/// A convenient prelude importing the most-used types.
pub mod prelude {
    pub use crate::channelmap::{AuxDetChannelMap, AuxDetChannelMapBuilder};
    pub use crate::error::GeometryError;
    pub use crate::geometry::{GeometryCore, VolumeRef};
    pub use crate::ids::{
        AuxDetId, AuxDetSensitiveId, CryostatId, OpDetId, PlaneId, TpcId, WireId,
    };
    pub use crate::sorting::{DISTANCE_TOL, GeoObjectSorter, StandardSorter};
    pub use crate::transform::{BoxExtent, LocalTransform, Solid};
    pub use crate::volumes::{
        AuxDetGeo, AuxDetSensitiveGeo, CryostatGeo, DriftDirection, OpDetGeo, PlaneGeo,
        TpcGeo, WireGeo,
    };
}
