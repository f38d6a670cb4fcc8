//! Encrypted export of guardian private records
//!
//! Each record is serialized, sealed in an envelope and written to
//! `<dir>/guardian_<id>` with owner-only permissions. The first failure
//! aborts the export; files already written for earlier guardians stay on
//! disk and the whole export has to be redone.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::paths::{guardian_key_file, KeyExport};
use crate::crypto::EnvelopeCipher;
use crate::error::{GuardianError, GuardianResult};
use crate::models::GuardianPrivateRecord;
use crate::storage::write_secret_file;

/// Outcome of a successful private key export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Directory the key files were written to
    pub output_dir: PathBuf,
    /// One path per guardian, in record order
    pub files: Vec<PathBuf>,
}

impl ExportReport {
    /// Operator warning to print alongside the output directory
    pub fn advisory(&self) -> String {
        format!(
            "The files in {} are encrypted secret keys and should be protected securely.",
            self.output_dir.display()
        )
    }
}

/// Export every record to the destination, or do nothing for [`KeyExport::Skip`]
pub fn export_private_keys(
    cipher: &EnvelopeCipher,
    destination: &KeyExport,
    records: &[GuardianPrivateRecord],
) -> GuardianResult<Option<ExportReport>> {
    let dir = match destination {
        KeyExport::Skip => {
            info!("Private key export skipped");
            return Ok(None);
        }
        KeyExport::ExportTo(dir) => dir,
    };

    reject_duplicate_ids(records)?;

    fs::create_dir_all(dir).map_err(|e| {
        GuardianError::Io(format!(
            "Failed to create key directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files = Vec::with_capacity(records.len());
    for record in records {
        let path = export_record(cipher, dir, record).map_err(|e| {
            error!(
                guardian_id = %record.guardian_id,
                written = files.len(),
                "Guardian key export aborted"
            );
            GuardianError::export(record.guardian_id.as_str(), e)
        })?;
        files.push(path);
    }

    info!(dir = %dir.display(), count = files.len(), "Exported encrypted guardian keys");

    Ok(Some(ExportReport {
        output_dir: dir.clone(),
        files,
    }))
}

/// Two records with one id would share a file, losing the first share
fn reject_duplicate_ids(records: &[GuardianPrivateRecord]) -> GuardianResult<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(&record.guardian_id) {
            return Err(GuardianError::InvalidInput(format!(
                "Duplicate guardian id: {}",
                record.guardian_id
            )));
        }
    }
    Ok(())
}

/// Serialize, encrypt and write a single record
fn export_record(
    cipher: &EnvelopeCipher,
    dir: &Path,
    record: &GuardianPrivateRecord,
) -> GuardianResult<PathBuf> {
    let plaintext = record.to_canonical_bytes()?;
    let envelope = cipher.encrypt(&plaintext)?;

    let path = guardian_key_file(dir, &record.guardian_id);
    write_secret_file(&path, &envelope)?;
    Ok(path)
}
