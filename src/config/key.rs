//! Key-encryption key configuration
//!
//! Resolves the 256-bit key that protects exported guardian records. The key
//! is supplied to the process as standard base64 in
//! `GUARDIAN_KEY_ENCRYPTION_KEY` and decoded once into an [`EncryptionKey`],
//! which is then passed explicitly to the cipher.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{GuardianError, GuardianResult};

/// Environment variable holding the base64-encoded key
pub const KEY_ENV_VAR: &str = "GUARDIAN_KEY_ENCRYPTION_KEY";

/// Length of an AES-256 key in bytes
pub const KEY_LEN: usize = 32;

/// A 32-byte key, zeroed when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    /// Build a key from raw bytes, which must be exactly [`KEY_LEN`] long
    pub fn from_bytes(bytes: &[u8]) -> GuardianResult<Self> {
        if bytes.len() != KEY_LEN {
            return Err(GuardianError::Configuration(format!(
                "Encryption key must be {} bytes (256 bits), got {} bytes",
                KEY_LEN,
                bytes.len()
            )));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Decode a key from standard base64 text
    pub fn from_base64(encoded: &str) -> GuardianResult<Self> {
        // The decoder's own message quotes the offending byte, so it is dropped
        let mut decoded = STANDARD.decode(encoded.trim()).map_err(|_| {
            GuardianError::Configuration(
                "Invalid encryption key format (must be standard base64)".into(),
            )
        })?;

        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Resolve the key from `GUARDIAN_KEY_ENCRYPTION_KEY`
    pub fn from_env() -> GuardianResult<Self> {
        Self::from_env_var(KEY_ENV_VAR)
    }

    /// Resolve the key from an arbitrary environment variable
    pub fn from_env_var(name: &str) -> GuardianResult<Self> {
        let value = std::env::var(name).ok();
        Self::from_env_value(name, value.as_deref())
    }

    /// Resolve the key from a looked-up environment value
    fn from_env_value(name: &str, value: Option<&str>) -> GuardianResult<Self> {
        match value {
            Some(v) if !v.trim().is_empty() => Self::from_base64(v),
            _ => Err(GuardianError::Configuration(format!(
                "{} environment variable not set",
                name
            ))),
        }
    }

    /// Generate a fresh random key from the OS CSPRNG
    pub fn generate() -> GuardianResult<Self> {
        use aes_gcm::aead::{rand_core::RngCore, OsRng};

        let mut bytes = [0u8; KEY_LEN];
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            GuardianError::DependencyUnavailable(format!("OS random source failed: {}", e))
        })?;
        let key = Self { bytes };
        bytes.zeroize();
        Ok(key)
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Encode the key as standard base64, the format expected in the environment
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }
}

// Don't print the key in Debug output
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}
