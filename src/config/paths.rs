//! Output layout for the election setup
//!
//! Decides where public artifacts and encrypted guardian keys are written.
//! The destination for private keys is chosen once by the caller as a
//! [`KeyExport`] variant.

use std::path::{Path, PathBuf};

use crate::models::GuardianId;

/// File name prefix for per-guardian files
pub const GUARDIAN_PREFIX: &str = "guardian_";

/// Election context file inside the package directory
pub const CONTEXT_FILE: &str = "context.json";

/// Election manifest file inside the package directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Subdirectory of the package directory holding guardian public records
pub const GUARDIANS_DIR: &str = "guardians";

/// Where encrypted guardian private keys go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyExport {
    /// Do not persist private keys; they only exist in memory
    #[default]
    Skip,
    /// Write one encrypted file per guardian into this directory
    ExportTo(PathBuf),
}

impl KeyExport {
    /// Build from an optional directory argument
    pub fn from_option(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::ExportTo(dir),
            None => Self::Skip,
        }
    }

    /// The target directory, if any
    pub fn dir(&self) -> Option<&Path> {
        match self {
            Self::Skip => None,
            Self::ExportTo(dir) => Some(dir),
        }
    }
}

/// Path of the encrypted key file for a guardian
pub fn guardian_key_file(dir: &Path, guardian_id: &GuardianId) -> PathBuf {
    dir.join(guardian_key_file_name(guardian_id))
}

/// File name of the encrypted key file for a guardian
pub fn guardian_key_file_name(guardian_id: &GuardianId) -> String {
    format!("{}{}", GUARDIAN_PREFIX, guardian_id)
}

/// Destinations for everything the setup produces
#[derive(Debug, Clone)]
pub struct OutputPlan {
    /// Directory for the unencrypted election package
    package_dir: PathBuf,
    /// Destination for encrypted private keys
    keys: KeyExport,
}

impl OutputPlan {
    /// Create a new output plan
    pub fn new(package_dir: PathBuf, keys: KeyExport) -> Self {
        Self { package_dir, keys }
    }

    /// Get the package directory
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Get the private key destination
    pub fn keys(&self) -> &KeyExport {
        &self.keys
    }

    /// Path to context.json
    pub fn context_file(&self) -> PathBuf {
        self.package_dir.join(CONTEXT_FILE)
    }

    /// Path to manifest.json
    pub fn manifest_file(&self) -> PathBuf {
        self.package_dir.join(MANIFEST_FILE)
    }

    /// Directory holding guardian public records
    pub fn guardians_dir(&self) -> PathBuf {
        self.package_dir.join(GUARDIANS_DIR)
    }

    /// Path to a guardian's public record
    pub fn guardian_record_file(&self, guardian_id: &GuardianId) -> PathBuf {
        self.guardians_dir()
            .join(format!("{}{}.json", GUARDIAN_PREFIX, guardian_id))
    }
}
