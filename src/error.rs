//! Custom error types for guardian-keys
//!
//! This module defines the error hierarchy for key protection and the setup
//! pipeline using thiserror. Messages carry diagnostics only, never key bytes
//! or decrypted guardian material.

use thiserror::Error;

/// The main error type for guardian-keys operations
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Missing or malformed encryption key, wrong key length, bad inputs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A runtime primitive the cipher relies on could not be used
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// Input that cannot be processed (truncated envelope, unsafe guardian id)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// AEAD tag verification failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A single guardian's key could not be exported; the export was aborted
    #[error("Export failed for guardian '{guardian_id}': {reason}")]
    Export { guardian_id: String, reason: String },

    /// The key ceremony did not produce a usable result
    #[error("Key ceremony error: {0}")]
    Ceremony(String),

    /// The election builder returned no result
    #[error("Election build failed: {0}")]
    BuildFailure(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

/// Discriminant of a [`GuardianError`], for callers that branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    DependencyUnavailable,
    InvalidInput,
    Authentication,
    Export,
    Ceremony,
    BuildFailure,
    Io,
    Json,
}

impl GuardianError {
    /// Create an export error for the given guardian
    pub fn export(guardian_id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Export {
            guardian_id: guardian_id.into(),
            reason: reason.to_string(),
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::DependencyUnavailable(_) => ErrorKind::DependencyUnavailable,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Export { .. } => ErrorKind::Export,
            Self::Ceremony(_) => ErrorKind::Ceremony,
            Self::BuildFailure(_) => ErrorKind::BuildFailure,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Json,
        }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is an authentication (tag mismatch) error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Whether re-running without operator intervention could succeed.
    ///
    /// Only I/O failures qualify; every other kind needs the configuration
    /// or the input fixed first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for GuardianError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GuardianError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for guardian-keys operations
pub type GuardianResult<T> = Result<T, GuardianError>;
