//! AES-256-GCM envelope encryption
//!
//! An envelope is `nonce (12 bytes) || ciphertext || tag (16 bytes)` with no
//! header and no associated data. Each encryption draws a fresh random nonce
//! from the OS, so encrypting the same plaintext twice yields different
//! envelopes.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use crate::config::EncryptionKey;
use crate::error::{GuardianError, GuardianResult};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Stateless AEAD wrapper bound to one key
pub struct EnvelopeCipher {
    cipher: Aes256Gcm,
}

impl EnvelopeCipher {
    /// Create a cipher from an explicit key
    pub fn new(key: &EncryptionKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes())),
        }
    }

    /// Create a cipher from raw key bytes, which must be exactly 32 bytes
    pub fn from_slice(key: &[u8]) -> GuardianResult<Self> {
        Ok(Self::new(&EncryptionKey::from_bytes(key)?))
    }

    /// Encrypt plaintext into a self-contained envelope
    pub fn encrypt(&self, plaintext: &[u8]) -> GuardianResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut nonce_bytes).map_err(|e| {
            GuardianError::DependencyUnavailable(format!(
                "OS random source failed while generating nonce: {}",
                e
            ))
        })?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        // Only fails when the plaintext exceeds the GCM length limit
        let ciphertext = self.cipher.encrypt(nonce, plaintext).map_err(|_| {
            GuardianError::InvalidInput(format!(
                "Plaintext of {} bytes cannot be encrypted",
                plaintext.len()
            ))
        })?;

        let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    /// Decrypt an envelope, failing closed if the tag does not verify
    pub fn decrypt(&self, envelope: &[u8]) -> GuardianResult<Vec<u8>> {
        if envelope.len() < NONCE_SIZE {
            return Err(GuardianError::InvalidInput(format!(
                "Ciphertext too short (minimum {} bytes, got {})",
                NONCE_SIZE,
                envelope.len()
            )));
        }

        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            GuardianError::Authentication(
                "Decryption failed (wrong key or corrupted data)".to_string(),
            )
        })
    }
}

/// Encrypt with an explicit key, or with the key from the environment when `None`
pub fn encrypt(plaintext: &[u8], key: Option<&[u8]>) -> GuardianResult<Vec<u8>> {
    resolve_cipher(key)?.encrypt(plaintext)
}

/// Decrypt with an explicit key, or with the key from the environment when `None`
pub fn decrypt(envelope: &[u8], key: Option<&[u8]>) -> GuardianResult<Vec<u8>> {
    resolve_cipher(key)?.decrypt(envelope)
}

fn resolve_cipher(key: Option<&[u8]>) -> GuardianResult<EnvelopeCipher> {
    match key {
        Some(bytes) => EnvelopeCipher::from_slice(bytes),
        None => Ok(EnvelopeCipher::new(&EncryptionKey::from_env()?)),
    }
}
