//! Guardian records produced by the key ceremony
//!
//! The private record holds a guardian's secret key material and is the only
//! thing this crate encrypts. The public record is what the guardian
//! publishes into the election package.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::ids::GuardianId;
use crate::error::GuardianResult;

/// A guardian's election key pair and the polynomial behind its shares
///
/// Values are opaque encodings owned by the ceremony implementation.
#[derive(Clone, Serialize, Deserialize)]
pub struct ElectionKeyPair {
    /// Secret key (opaque encoding)
    pub secret_key: String,

    /// Public key (opaque encoding)
    pub public_key: String,

    /// Secret polynomial coefficients
    #[serde(default)]
    pub coefficients: Vec<String>,

    /// Public commitments to the coefficients
    #[serde(default)]
    pub commitments: Vec<String>,
}

/// Everything a guardian must keep secret after the ceremony
#[derive(Clone, Serialize, Deserialize)]
pub struct GuardianPrivateRecord {
    /// Guardian identifier
    pub guardian_id: GuardianId,

    /// Position of the guardian in the ceremony (1-based)
    pub sequence_order: u32,

    /// The guardian's own key pair
    pub election_keys: ElectionKeyPair,

    /// Partial key backups received from other guardians
    #[serde(default)]
    pub backups: BTreeMap<GuardianId, String>,

    /// Public keys of every guardian, as seen by this guardian
    #[serde(default)]
    pub guardian_public_keys: BTreeMap<GuardianId, String>,
}

impl GuardianPrivateRecord {
    /// Serialize to the canonical JSON bytes that get encrypted
    ///
    /// The buffer is zeroed when dropped.
    pub fn to_canonical_bytes(&self) -> GuardianResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(serde_json::to_vec(self)?))
    }

    /// Parse a record from its canonical bytes
    pub fn from_canonical_bytes(bytes: &[u8]) -> GuardianResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The public record this guardian publishes
    pub fn publish(&self) -> GuardianRecord {
        GuardianRecord {
            guardian_id: self.guardian_id.clone(),
            sequence_order: self.sequence_order,
            election_public_key: self.election_keys.public_key.clone(),
            election_commitments: self.election_keys.commitments.clone(),
        }
    }
}

// Secret fields never reach Debug output
impl fmt::Debug for GuardianPrivateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardianPrivateRecord")
            .field("guardian_id", &self.guardian_id)
            .field("sequence_order", &self.sequence_order)
            .field("backups", &self.backups.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ElectionKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectionKeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Public record of a guardian, safe to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianRecord {
    pub guardian_id: GuardianId,
    pub sequence_order: u32,
    pub election_public_key: String,
    pub election_commitments: Vec<String>,
}
