//! Election builder step
//!
//! Assembles the public election package from the ceremony output. A builder
//! may decline to produce a result; the pipeline treats that as a failure.

use chrono::Utc;

use crate::error::GuardianResult;
use crate::models::{BuildResult, CeremonyResult, ElectionContext, SetupInputs};

/// Builds the public election artifacts
pub trait ElectionBuilder {
    /// Build the election, or return `None` if nothing could be built
    fn build_election(
        &self,
        inputs: &SetupInputs,
        ceremony: &CeremonyResult,
    ) -> GuardianResult<Option<BuildResult>>;
}

/// Builder that copies the ceremony's public values into a context
pub struct ContextBuilder;

impl ElectionBuilder for ContextBuilder {
    fn build_election(
        &self,
        inputs: &SetupInputs,
        ceremony: &CeremonyResult,
    ) -> GuardianResult<Option<BuildResult>> {
        if ceremony.joint_public_key.is_empty() {
            return Ok(None);
        }

        let context = ElectionContext {
            number_of_guardians: inputs.guardian_count(),
            quorum: inputs.quorum(),
            joint_public_key: ceremony.joint_public_key.clone(),
            commitment_hash: ceremony.commitment_hash.clone(),
            verification_url: inputs.verification_url().map(str::to_string),
            created_at: Utc::now(),
        };

        Ok(Some(BuildResult {
            context,
            manifest: inputs.manifest().clone(),
            guardian_records: ceremony.public_records(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guardian::tests::sample_record;
    use serde_json::json;

    fn ceremony(joint_key: &str) -> CeremonyResult {
        CeremonyResult {
            joint_public_key: joint_key.into(),
            commitment_hash: "H".into(),
            guardians: vec![sample_record("a", 1), sample_record("b", 2)],
        }
    }

    #[test]
    fn test_builds_context() {
        let inputs =
            SetupInputs::new(2, 2, json!({"name": "x"}), Some("https://v".into())).unwrap();

        let built = ContextBuilder
            .build_election(&inputs, &ceremony("K"))
            .unwrap()
            .unwrap();

        assert_eq!(built.context.number_of_guardians, 2);
        assert_eq!(built.context.quorum, 2);
        assert_eq!(built.context.joint_public_key, "K");
        assert_eq!(built.context.verification_url.as_deref(), Some("https://v"));
        assert_eq!(built.manifest, json!({"name": "x"}));
        assert_eq!(built.guardian_records.len(), 2);
    }

    #[test]
    fn test_no_joint_key_builds_nothing() {
        let inputs = SetupInputs::new(2, 1, json!({}), None).unwrap();
        assert!(ContextBuilder
            .build_election(&inputs, &ceremony(""))
            .unwrap()
            .is_none());
    }
}
