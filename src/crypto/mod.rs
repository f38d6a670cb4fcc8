//! Cryptographic functions for guardian-keys
//!
//! Provides AES-256-GCM envelope encryption for guardian private records
//! at rest.

pub mod envelope;

pub use envelope::{decrypt, encrypt, EnvelopeCipher, NONCE_SIZE, TAG_SIZE};
