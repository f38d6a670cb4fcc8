//! Key ceremony step
//!
//! The ceremony protocol itself lives outside this crate. The pipeline only
//! needs something that turns setup inputs into a [`CeremonyResult`].

use std::path::PathBuf;

use tracing::info;

use crate::error::{GuardianError, GuardianResult};
use crate::models::{CeremonyResult, SetupInputs};
use crate::storage::read_json_required;

/// Runs the key ceremony for a set of guardians
pub trait KeyCeremony {
    /// Produce the joint key and one private record per guardian
    fn run_key_ceremony(&self, inputs: &SetupInputs) -> GuardianResult<CeremonyResult>;
}

/// A ceremony that was run elsewhere and saved as JSON
pub struct CeremonyFile {
    path: PathBuf,
}

impl CeremonyFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl KeyCeremony for CeremonyFile {
    fn run_key_ceremony(&self, inputs: &SetupInputs) -> GuardianResult<CeremonyResult> {
        let result: CeremonyResult = read_json_required(&self.path).map_err(|e| {
            GuardianError::Ceremony(format!(
                "Could not load ceremony result from {}: {}",
                self.path.display(),
                e
            ))
        })?;

        result.validate(inputs)?;

        info!(
            path = %self.path.display(),
            guardians = result.guardians.len(),
            "Loaded key ceremony result"
        );
        Ok(result)
    }
}
