//! Volume hierarchy nodes.
//!
//! Two independent families:
//! - the readout hierarchy: [`CryostatGeo`] → [`TpcGeo`] → [`PlaneGeo`] →
//!   [`WireGeo`], plus [`OpDetGeo`] elements owned by each cryostat;
//! - the flat auxiliary-detector sequence: [`AuxDetGeo`] modules owning
//!   [`AuxDetSensitiveGeo`] sub-volumes.
//!
//! Every node owns its local-to-world transform, caches its world-frame
//! extent, and exclusively owns its children (the hierarchy is a strict
//! tree). After construction children are only ever permuted in place by the
//! canonical sorter; identities are assigned by the reindex pass.

pub mod auxdet;
pub mod cryostat;
pub mod opdet;
pub mod plane;
pub mod tpc;
pub mod wire;

pub use auxdet::{AuxDetGeo, AuxDetSensitiveGeo};
pub use cryostat::CryostatGeo;
pub use opdet::OpDetGeo;
pub use plane::PlaneGeo;
pub use tpc::{DriftDirection, TpcGeo};
pub use wire::WireGeo;
