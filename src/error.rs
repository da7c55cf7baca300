//! GeometryError: unified error type for detgeo public APIs.
//!
//! Construction-time and configuration-lookup failures are fatal and surfaced
//! immediately through this type. "Point not in any known volume" is an
//! expected outcome of a query and is reported as `Option`, never as an error.

use thiserror::Error;

/// Unified error type for geometry operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The loader handed a node a solid it cannot model.
    #[error("volume `{volume}` has unsupported shape `{shape}`")]
    UnsupportedShape { volume: String, shape: String },
    /// A container's outline volume could not be resolved by the loader.
    #[error("cannot find outline volume `{name}`")]
    MissingVolume { name: String },
    /// A container that requires sub-volumes was constructed without any.
    #[error("volume `{name}` has no sub-volumes")]
    EmptyVolume { name: String },
    /// Request for a child index past the end of a child sequence.
    #[error("request for non-existent {kind} {index} (have {size})")]
    ChildOutOfRange {
        kind: &'static str,
        index: usize,
        size: usize,
    },
    /// Planes cannot be ordered until the TPC's drift direction is resolved.
    #[error("drift direction of TPC `{tpc}` is unknown, can't sort the planes")]
    UnknownDriftDirection { tpc: String },
    /// No auxiliary detector is registered under the given name.
    #[error("no auxiliary detector matching name `{name}`")]
    UnknownAuxDetName { name: String },
    /// The channel is not a valid position in the module's channel vector.
    #[error(
        "channel {channel} cannot be found in vector associated to auxiliary \
         detector index {aux_det}; vector has size {size}"
    )]
    ChannelOutOfRange {
        aux_det: usize,
        channel: u32,
        size: usize,
    },
    /// No channel vector was registered for the given module index.
    #[error(
        "auxiliary detector index {aux_det} does not correspond to any vector \
         of sensitive volumes"
    )]
    MissingChannelVector { aux_det: usize },
    /// Two modules registered under the same generated name.
    #[error("duplicate auxiliary detector name `{name}`")]
    DuplicateAuxDetName { name: String },
    /// Flat-list lookup found no module containing the point.
    #[error("can't find auxiliary detector for position {point:?} with tolerance {tolerance}")]
    AuxDetNotFound { point: [f64; 3], tolerance: f64 },
    /// An ordering or indexing invariant does not hold.
    #[error("geometry invariant violated: {0}")]
    Unsorted(String),
}
