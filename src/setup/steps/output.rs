//! Public artifact output step
//!
//! Writes the unencrypted election package. Nothing secret passes through
//! here; guardian private keys are exported separately by
//! [`crate::export::export_private_keys`].

use std::path::PathBuf;

use tracing::info;

use crate::config::OutputPlan;
use crate::error::GuardianResult;
use crate::models::BuildResult;
use crate::storage::write_json_atomic;

/// Files written for the public package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicExport {
    pub package_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Writes the public election artifacts
pub trait PublicArtifactExporter {
    fn export_public(&self, plan: &OutputPlan, build: &BuildResult) -> GuardianResult<PublicExport>;
}

/// Writes context, manifest and guardian records as JSON files
pub struct JsonPackageExporter;

impl PublicArtifactExporter for JsonPackageExporter {
    fn export_public(&self, plan: &OutputPlan, build: &BuildResult) -> GuardianResult<PublicExport> {
        let mut files = Vec::with_capacity(build.guardian_records.len() + 2);

        let context_file = plan.context_file();
        write_json_atomic(&context_file, &build.context)?;
        files.push(context_file);

        let manifest_file = plan.manifest_file();
        write_json_atomic(&manifest_file, &build.manifest)?;
        files.push(manifest_file);

        for record in &build.guardian_records {
            let path = plan.guardian_record_file(&record.guardian_id);
            write_json_atomic(&path, record)?;
            files.push(path);
        }

        info!(
            dir = %plan.package_dir().display(),
            files = files.len(),
            "Wrote public election package"
        );

        Ok(PublicExport {
            package_dir: plan.package_dir().to_path_buf(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyExport;
    use crate::models::guardian::tests::sample_record;
    use crate::models::{ElectionContext, GuardianRecord};
    use crate::storage::read_json_required;
    use chrono::Utc;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_writes_package() {
        let temp_dir = TempDir::new().unwrap();
        let plan = OutputPlan::new(temp_dir.path().join("pkg"), KeyExport::Skip);
        let build = BuildResult {
            context: ElectionContext {
                number_of_guardians: 1,
                quorum: 1,
                joint_public_key: "K".into(),
                commitment_hash: "H".into(),
                verification_url: None,
                created_at: Utc::now(),
            },
            manifest: json!({"election_scope_id": "e1"}),
            guardian_records: vec![sample_record("a", 1).publish()],
        };

        let export = JsonPackageExporter.export_public(&plan, &build).unwrap();
        assert_eq!(export.files.len(), 3);

        let context: ElectionContext = read_json_required(plan.context_file()).unwrap();
        assert_eq!(context, build.context);

        let record: GuardianRecord =
            read_json_required(temp_dir.path().join("pkg/guardians/guardian_a.json")).unwrap();
        assert_eq!(record.election_public_key, "public-a");

        let raw = std::fs::read_to_string(temp_dir.path().join("pkg/guardians/guardian_a.json"))
            .unwrap();
        assert!(!raw.contains("secret-a"));
    }
}
