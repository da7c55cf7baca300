//! Strongly-typed identity tuples for detector volumes.
//!
//! Every volume is located within the hierarchy by an ordered tuple of
//! sibling indices; a child's ID embeds its parent's ID as a prefix. IDs are
//! assigned exclusively by the reindex pass and are therefore only meaningful
//! after the canonical sort has run — before that, nodes report `None`.
//!
//! The derived `Ord` follows field order, so IDs compare exactly like the
//! underlying index tuples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a cryostat within the detector.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct CryostatId(pub u32);

impl fmt::Display for CryostatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C:{}", self.0)
    }
}

/// Index of a TPC within its cryostat.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TpcId {
    pub cryostat: CryostatId,
    pub tpc: u32,
}

impl fmt::Display for TpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} T:{}", self.cryostat, self.tpc)
    }
}

/// Index of a wire plane within its TPC.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlaneId {
    pub tpc: TpcId,
    pub plane: u32,
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} P:{}", self.tpc, self.plane)
    }
}

/// Index of a sense wire within its plane.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WireId {
    pub plane: PlaneId,
    pub wire: u32,
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} W:{}", self.plane, self.wire)
    }
}

/// Index of an optical detector within its cryostat.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OpDetId {
    pub cryostat: CryostatId,
    pub op_det: u32,
}

impl fmt::Display for OpDetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} O:{}", self.cryostat, self.op_det)
    }
}

/// Index of an auxiliary detector module in the flat module sequence.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct AuxDetId(pub u32);

impl fmt::Display for AuxDetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{}", self.0)
    }
}

/// Index of a sensitive sub-volume within its auxiliary detector module.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AuxDetSensitiveId {
    pub aux_det: AuxDetId,
    pub sensitive: u32,
}

impl fmt::Display for AuxDetSensitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} S:{}", self.aux_det, self.sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_ordering_matches_tuple_ordering() {
        let a = TpcId { cryostat: CryostatId(0), tpc: 5 };
        let b = TpcId { cryostat: CryostatId(1), tpc: 0 };
        assert!(a < b);
        let c = WireId {
            plane: PlaneId { tpc: a, plane: 2 },
            wire: 7,
        };
        let d = WireId {
            plane: PlaneId { tpc: a, plane: 2 },
            wire: 8,
        };
        assert!(c < d);
    }

    #[test]
    fn ids_serialize_as_plain_index_tuples() {
        let id = TpcId { cryostat: CryostatId(1), tpc: 2 };
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"cryostat":1,"tpc":2}"#);
        let back: TpcId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_embeds_parent_prefix() {
        let wid = WireId {
            plane: PlaneId {
                tpc: TpcId { cryostat: CryostatId(1), tpc: 2 },
                plane: 0,
            },
            wire: 330,
        };
        assert_eq!(wid.to_string(), "C:1 T:2 P:0 W:330");
        let sid = AuxDetSensitiveId { aux_det: AuxDetId(4), sensitive: 1 };
        assert_eq!(sid.to_string(), "A:4 S:1");
    }
}
