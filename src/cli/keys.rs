//! Key management CLI commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::{EncryptionKey, KEY_ENV_VAR};
use crate::crypto::EnvelopeCipher;
use crate::display::format_key_checks;
use crate::error::{ErrorKind, GuardianError, GuardianResult};
use crate::export::{verify_key_files, KeyFileCheck, KeyFileStatus};

/// Key management commands
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Generate a new key-encryption key
    Generate,

    /// Check that every guardian key file in a directory decrypts
    Verify {
        /// Directory holding guardian_* key files
        dir: PathBuf,
    },
}

/// Handle key commands
pub fn handle_key_command(
    cmd: KeyCommands,
    resolve_key: impl FnOnce() -> GuardianResult<EncryptionKey>,
) -> GuardianResult<()> {
    match cmd {
        KeyCommands::Generate => generate_key(),
        KeyCommands::Verify { dir } => verify_keys(dir, &resolve_key()?),
    }
}

fn generate_key() -> GuardianResult<()> {
    let key = EncryptionKey::generate()?;
    println!("{}", key.to_base64());
    eprintln!();
    eprintln!("Set {} to this value before running setup.", KEY_ENV_VAR);
    eprintln!("Store it securely: exported guardian keys cannot be recovered without it.");
    Ok(())
}

fn verify_keys(dir: PathBuf, key: &EncryptionKey) -> GuardianResult<()> {
    let cipher = EnvelopeCipher::new(key);
    let checks = verify_key_files(&cipher, &dir)?;

    println!("{}", format_key_checks(&checks));

    match verification_failure(&checks, &dir) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Error for a verification run, or `None` when every file is valid.
///
/// All failures authenticating points at the key or tampering; any unreadable
/// file is an I/O problem; anything else means files with the wrong content.
fn verification_failure(checks: &[KeyFileCheck], dir: &Path) -> Option<GuardianError> {
    let failed: Vec<&KeyFileStatus> = checks
        .iter()
        .map(|c| &c.status)
        .filter(|s| !s.is_valid())
        .collect();
    if failed.is_empty() {
        return None;
    }

    let message = format!(
        "{} of {} key files in {} failed verification",
        failed.len(),
        checks.len(),
        dir.display()
    );

    let all_auth = failed
        .iter()
        .all(|s| matches!(s, KeyFileStatus::Unreadable(ErrorKind::Authentication)));
    let any_io = failed
        .iter()
        .any(|s| matches!(s, KeyFileStatus::Unreadable(ErrorKind::Io)));

    Some(if all_auth {
        GuardianError::Authentication(message)
    } else if any_io {
        GuardianError::Io(message)
    } else {
        GuardianError::InvalidInput(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(id: &str, status: KeyFileStatus) -> KeyFileCheck {
        KeyFileCheck {
            guardian_id: id.to_string(),
            path: PathBuf::from(format!("/keys/guardian_{}", id)),
            status,
        }
    }

    fn failure(checks: &[KeyFileCheck]) -> Option<GuardianError> {
        verification_failure(checks, Path::new("/keys"))
    }

    #[test]
    fn test_all_valid_is_ok() {
        assert!(failure(&[check("a", KeyFileStatus::Valid)]).is_none());
        assert!(failure(&[]).is_none());
    }

    #[test]
    fn test_wrong_key_is_authentication() {
        let err = failure(&[
            check("a", KeyFileStatus::Unreadable(ErrorKind::Authentication)),
            check("b", KeyFileStatus::Unreadable(ErrorKind::Authentication)),
        ])
        .unwrap();
        assert!(err.is_authentication());
        assert!(err.to_string().contains("2 of 2 key files"));
    }

    #[test]
    fn test_wrong_content_is_invalid_input() {
        let err = failure(&[
            check("a", KeyFileStatus::Valid),
            check("b", KeyFileStatus::Malformed),
            check(
                "c",
                KeyFileStatus::Mismatched {
                    found: "a".to_string(),
                },
            ),
        ])
        .unwrap();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("2 of 3 key files"));

        let err = failure(&[check("a", KeyFileStatus::Unreadable(ErrorKind::InvalidInput))]).unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_mixed_failures_are_not_authentication() {
        let err = failure(&[
            check("a", KeyFileStatus::Unreadable(ErrorKind::Authentication)),
            check("b", KeyFileStatus::Malformed),
        ])
        .unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_unreadable_file_is_io() {
        let err = failure(&[
            check("a", KeyFileStatus::Unreadable(ErrorKind::Io)),
            check("b", KeyFileStatus::Malformed),
        ])
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
