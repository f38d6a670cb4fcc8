//! Key file display formatting
//!
//! Formats verification results for terminal output.

use crate::export::KeyFileCheck;

/// Format key file checks as a table
pub fn format_key_checks(checks: &[KeyFileCheck]) -> String {
    if checks.is_empty() {
        return "No guardian key files found.".to_string();
    }

    let id_width = checks
        .iter()
        .map(|c| c.guardian_id.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {}\n",
        "Guardian",
        "Status",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<6}\n",
        "",
        "",
        id_width = id_width,
    ));

    for check in checks {
        output.push_str(&format!(
            "{:<id_width$}  {}\n",
            check.guardian_id,
            check.status,
            id_width = id_width,
        ));
    }

    let valid = checks.iter().filter(|c| c.status.is_valid()).count();
    output.push_str(&format!("\n{} of {} key files verified", valid, checks.len()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::export::KeyFileStatus;
    use std::path::PathBuf;

    fn check(id: &str, status: KeyFileStatus) -> KeyFileCheck {
        KeyFileCheck {
            guardian_id: id.to_string(),
            path: PathBuf::from(format!("/k/guardian_{}", id)),
            status,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_key_checks(&[]), "No guardian key files found.");
    }

    #[test]
    fn test_table() {
        let output = format_key_checks(&[
            check("alice", KeyFileStatus::Valid),
            check("a-very-long-guardian", KeyFileStatus::Unreadable(ErrorKind::Authentication)),
        ]);

        assert!(output.contains("Guardian"));
        assert!(output.contains("alice                 OK"));
        assert!(output.contains("a-very-long-guardian  FAILED (wrong key or tampered)"));
        assert!(output.ends_with("1 of 2 key files verified"));
    }
}
