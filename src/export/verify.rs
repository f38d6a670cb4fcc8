//! Verification of exported key files
//!
//! Decrypts every `guardian_*` file in a directory and checks that it holds
//! the record of the guardian it is named after. Plaintext is dropped
//! (and zeroed) as soon as the check is done.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::config::GUARDIAN_PREFIX;
use crate::crypto::EnvelopeCipher;
use crate::error::{ErrorKind, GuardianError, GuardianResult};
use crate::models::GuardianPrivateRecord;

/// Result of checking one key file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFileStatus {
    /// Decrypted and named after the guardian it contains
    Valid,
    /// Envelope could not be opened
    Unreadable(ErrorKind),
    /// Decrypted, but the content is not a guardian record
    Malformed,
    /// Decrypted record belongs to a different guardian
    Mismatched { found: String },
}

impl KeyFileStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for KeyFileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "OK"),
            Self::Unreadable(ErrorKind::Authentication) => {
                write!(f, "FAILED (wrong key or tampered)")
            }
            Self::Unreadable(ErrorKind::InvalidInput) => write!(f, "FAILED (truncated)"),
            Self::Unreadable(ErrorKind::Io) => write!(f, "FAILED (unreadable)"),
            Self::Unreadable(kind) => write!(f, "FAILED ({:?})", kind),
            Self::Malformed => write!(f, "FAILED (not a guardian record)"),
            Self::Mismatched { found } => write!(f, "FAILED (contains guardian '{}')", found),
        }
    }
}

/// One verified key file
#[derive(Debug, Clone)]
pub struct KeyFileCheck {
    /// Guardian id taken from the file name
    pub guardian_id: String,
    pub path: PathBuf,
    pub status: KeyFileStatus,
}

/// Verify every guardian key file in `dir`, sorted by file name
pub fn verify_key_files(cipher: &EnvelopeCipher, dir: &Path) -> GuardianResult<Vec<KeyFileCheck>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        GuardianError::Io(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut checks = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| GuardianError::Io(format!("Failed to read directory entry: {}", e)))?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(guardian_id) = file_name.strip_prefix(GUARDIAN_PREFIX) else {
            continue;
        };

        let status = check_file(cipher, &path, guardian_id);
        if !status.is_valid() {
            warn!(guardian_id, status = %status, "Key file failed verification");
        }

        checks.push(KeyFileCheck {
            guardian_id: guardian_id.to_string(),
            path,
            status,
        });
    }

    checks.sort_by(|a, b| a.guardian_id.cmp(&b.guardian_id));

    info!(
        dir = %dir.display(),
        total = checks.len(),
        valid = checks.iter().filter(|c| c.status.is_valid()).count(),
        "Verified guardian key files"
    );

    Ok(checks)
}

fn check_file(cipher: &EnvelopeCipher, path: &Path, expected_id: &str) -> KeyFileStatus {
    let envelope = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => return KeyFileStatus::Unreadable(ErrorKind::Io),
    };

    let plaintext = match cipher.decrypt(&envelope) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(e) => return KeyFileStatus::Unreadable(e.kind()),
    };

    match GuardianPrivateRecord::from_canonical_bytes(&plaintext) {
        Ok(record) if record.guardian_id.as_str() == expected_id => KeyFileStatus::Valid,
        Ok(record) => KeyFileStatus::Mismatched {
            found: record.guardian_id.to_string(),
        },
        Err(_) => KeyFileStatus::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyExport;
    use crate::export::export_private_keys;
    use crate::models::guardian::tests::sample_record;
    use tempfile::TempDir;

    fn cipher() -> EnvelopeCipher {
        EnvelopeCipher::from_slice(&[0x07; 32]).unwrap()
    }

    fn exported_dir(cipher: &EnvelopeCipher) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let records = vec![sample_record("b", 2), sample_record("a", 1)];
        export_private_keys(
            cipher,
            &KeyExport::ExportTo(temp_dir.path().to_path_buf()),
            &records,
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_all_valid_sorted() {
        let cipher = cipher();
        let temp_dir = exported_dir(&cipher);

        let checks = verify_key_files(&cipher, temp_dir.path()).unwrap();
        let ids: Vec<_> = checks.iter().map(|c| c.guardian_id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
        assert!(checks.iter().all(|c| c.status.is_valid()));
    }

    #[test]
    fn test_ignores_other_files() {
        let cipher = cipher();
        let temp_dir = exported_dir(&cipher);
        fs::write(temp_dir.path().join("README"), "hello").unwrap();
        fs::create_dir(temp_dir.path().join("guardian_dir")).unwrap();

        assert_eq!(verify_key_files(&cipher, temp_dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_tampered_file_reported() {
        let cipher = cipher();
        let temp_dir = exported_dir(&cipher);
        let path = temp_dir.path().join("guardian_a");

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        fs::write(&path, bytes).unwrap();

        let checks = verify_key_files(&cipher, temp_dir.path()).unwrap();
        assert_eq!(checks[0].status, KeyFileStatus::Unreadable(ErrorKind::Authentication));
        assert!(checks[1].status.is_valid());
    }

    #[test]
    fn test_wrong_key_reported() {
        let temp_dir = exported_dir(&cipher());
        let other = EnvelopeCipher::from_slice(&[0x08; 32]).unwrap();

        let checks = verify_key_files(&other, temp_dir.path()).unwrap();
        assert!(checks
            .iter()
            .all(|c| c.status == KeyFileStatus::Unreadable(ErrorKind::Authentication)));
    }

    #[test]
    fn test_truncated_and_renamed_files() {
        let cipher = cipher();
        let temp_dir = exported_dir(&cipher);

        fs::write(temp_dir.path().join("guardian_short"), [0u8; 5]).unwrap();
        fs::copy(
            temp_dir.path().join("guardian_a"),
            temp_dir.path().join("guardian_c"),
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("guardian_d"),
            cipher.encrypt(b"{\"not\":\"a record\"}").unwrap(),
        )
        .unwrap();

        let checks = verify_key_files(&cipher, temp_dir.path()).unwrap();
        let status = |id: &str| {
            checks
                .iter()
                .find(|c| c.guardian_id == id)
                .map(|c| c.status.clone())
                .unwrap()
        };

        assert_eq!(status("short"), KeyFileStatus::Unreadable(ErrorKind::InvalidInput));
        assert_eq!(status("c"), KeyFileStatus::Mismatched { found: "a".into() });
        assert_eq!(status("d"), KeyFileStatus::Malformed);
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = verify_key_files(&cipher(), &temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, GuardianError::Io(_)));
    }

    #[test]
    fn test_status_display_never_shows_content() {
        assert_eq!(KeyFileStatus::Valid.to_string(), "OK");
        assert_eq!(
            KeyFileStatus::Unreadable(ErrorKind::Authentication).to_string(),
            "FAILED (wrong key or tampered)"
        );
    }
}
