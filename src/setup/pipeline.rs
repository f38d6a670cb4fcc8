//! Election setup pipeline
//!
//! Runs the setup once, strictly in order:
//! `InputsRetrieved → CeremonyComplete → ElectionBuilt → Exported`.
//! Any failure stops the pipeline where it is; later stages never run.

use tracing::{error, info};

use crate::config::{KeyExport, OutputPlan};
use crate::crypto::EnvelopeCipher;
use crate::error::{GuardianError, GuardianResult};
use crate::export::{export_private_keys, ExportReport};
use crate::models::SetupInputs;

use super::steps::{ElectionBuilder, KeyCeremony, PublicArtifactExporter, PublicExport};

/// Stage the pipeline has reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    InputsRetrieved,
    CeremonyComplete,
    ElectionBuilt,
    Exported,
}

/// Result of a completed setup
#[derive(Debug)]
pub struct SetupOutcome {
    pub stage: PipelineStage,
    pub public: PublicExport,
    /// `None` when private key export was skipped
    pub private: Option<ExportReport>,
}

/// The setup pipeline and its collaborators
pub struct SetupPipeline<C, B, P> {
    ceremony: C,
    builder: B,
    exporter: P,
    cipher: Option<EnvelopeCipher>,
}

impl<C, B, P> SetupPipeline<C, B, P>
where
    C: KeyCeremony,
    B: ElectionBuilder,
    P: PublicArtifactExporter,
{
    /// Create a pipeline without a key; it can only run with [`KeyExport::Skip`]
    pub fn new(ceremony: C, builder: B, exporter: P) -> Self {
        Self {
            ceremony,
            builder,
            exporter,
            cipher: None,
        }
    }

    /// Set the cipher used to encrypt exported private keys
    pub fn with_cipher(mut self, cipher: EnvelopeCipher) -> Self {
        self.cipher = Some(cipher);
        self
    }

    /// Run every stage once
    pub fn run(&self, inputs: &SetupInputs, plan: &OutputPlan) -> GuardianResult<SetupOutcome> {
        let mut stage = PipelineStage::InputsRetrieved;

        // Checked up front so a missing key never costs a ceremony run
        let cipher = match (plan.keys(), &self.cipher) {
            (KeyExport::ExportTo(_), None) => {
                return Err(GuardianError::Configuration(
                    "An encryption key is required to export private keys".into(),
                ))
            }
            (_, cipher) => cipher.as_ref(),
        };

        info!(
            guardians = inputs.guardian_count(),
            quorum = inputs.quorum(),
            ?stage,
            "Starting election setup"
        );

        let ceremony = self.ceremony.run_key_ceremony(inputs).map_err(|e| {
            error!(?stage, "Key ceremony failed");
            e
        })?;
        // Collaborators are not trusted to have checked their own output
        ceremony.validate(inputs).map_err(|e| {
            error!(?stage, error = %e, "Key ceremony result rejected");
            e
        })?;
        stage = PipelineStage::CeremonyComplete;
        info!(?stage, guardians = ceremony.guardians.len(), "Key ceremony complete");

        let build = self
            .builder
            .build_election(inputs, &ceremony)?
            .ok_or_else(|| {
                error!(?stage, "Election builder returned no result");
                GuardianError::BuildFailure("election builder returned no result".into())
            })?;
        stage = PipelineStage::ElectionBuilt;
        info!(?stage, "Election built");

        let public = self.exporter.export_public(plan, &build)?;
        let private = match cipher {
            Some(cipher) => export_private_keys(cipher, plan.keys(), &ceremony.guardians)
                .map_err(|e| {
                    error!(
                        package_dir = %plan.package_dir().display(),
                        "Private key export failed; the election package is incomplete and \
                         the whole setup must be re-run"
                    );
                    e
                })?,
            None => None,
        };
        stage = PipelineStage::Exported;
        info!(?stage, keys_exported = private.is_some(), "Election setup complete");

        Ok(SetupOutcome {
            stage,
            public,
            private,
        })
    }
}
