//! Election setup data: inputs, ceremony output, build output

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::guardian::{GuardianPrivateRecord, GuardianRecord};
use crate::error::{GuardianError, GuardianResult};

/// Validated inputs to the setup pipeline
#[derive(Debug, Clone)]
pub struct SetupInputs {
    guardian_count: u32,
    quorum: u32,
    manifest: serde_json::Value,
    verification_url: Option<String>,
}

impl SetupInputs {
    /// Create setup inputs, checking the guardian count and quorum
    pub fn new(
        guardian_count: u32,
        quorum: u32,
        manifest: serde_json::Value,
        verification_url: Option<String>,
    ) -> GuardianResult<Self> {
        if guardian_count == 0 {
            return Err(GuardianError::Configuration(
                "Guardian count must be at least 1".into(),
            ));
        }
        if quorum == 0 || quorum > guardian_count {
            return Err(GuardianError::Configuration(format!(
                "Quorum must be between 1 and {} (the guardian count), got {}",
                guardian_count, quorum
            )));
        }
        if !manifest.is_object() {
            return Err(GuardianError::Configuration(
                "Election manifest must be a JSON object".into(),
            ));
        }

        Ok(Self {
            guardian_count,
            quorum,
            manifest,
            verification_url,
        })
    }

    pub fn guardian_count(&self) -> u32 {
        self.guardian_count
    }

    pub fn quorum(&self) -> u32 {
        self.quorum
    }

    pub fn manifest(&self) -> &serde_json::Value {
        &self.manifest
    }

    pub fn verification_url(&self) -> Option<&str> {
        self.verification_url.as_deref()
    }
}

/// Output of a completed key ceremony
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeremonyResult {
    /// Joint election public key (opaque encoding)
    pub joint_public_key: String,

    /// Hash committing to all guardian commitments (opaque encoding)
    pub commitment_hash: String,

    /// One private record per guardian
    pub guardians: Vec<GuardianPrivateRecord>,
}

impl CeremonyResult {
    /// Check the result against the inputs the ceremony was run with
    pub fn validate(&self, inputs: &SetupInputs) -> GuardianResult<()> {
        if self.joint_public_key.is_empty() {
            return Err(GuardianError::Ceremony(
                "Ceremony produced no joint public key".into(),
            ));
        }

        if self.guardians.len() != inputs.guardian_count() as usize {
            return Err(GuardianError::Ceremony(format!(
                "Expected {} guardians, ceremony produced {}",
                inputs.guardian_count(),
                self.guardians.len()
            )));
        }

        let mut seen = HashSet::new();
        for record in &self.guardians {
            if !seen.insert(&record.guardian_id) {
                return Err(GuardianError::Ceremony(format!(
                    "Duplicate guardian id: {}",
                    record.guardian_id
                )));
            }
        }

        Ok(())
    }

    /// Public records of every guardian, in ceremony order
    pub fn public_records(&self) -> Vec<GuardianRecord> {
        self.guardians.iter().map(|g| g.publish()).collect()
    }
}

/// Public election context assembled from the ceremony
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionContext {
    pub number_of_guardians: u32,
    pub quorum: u32,
    pub joint_public_key: String,
    pub commitment_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything the election builder produces for the public package
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub context: ElectionContext,
    pub manifest: serde_json::Value,
    pub guardian_records: Vec<GuardianRecord>,
}
