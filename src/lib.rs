//! guardian-keys - Encrypted export of election guardian private keys
//!
//! This library runs the election setup after a key ceremony and protects
//! the guardians' private records at rest. Each record is sealed with
//! AES-256-GCM under a key supplied through the environment and written to
//! its own owner-only file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Key resolution and output layout
//! - `error`: Custom error types
//! - `crypto`: Envelope encryption
//! - `models`: Guardian records and setup data
//! - `storage`: JSON and secret file helpers
//! - `export`: Encrypted key export and verification
//! - `setup`: The setup pipeline and its steps
//! - `cli` / `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use guardian_keys::config::{EncryptionKey, KeyExport};
//! use guardian_keys::crypto::EnvelopeCipher;
//! use guardian_keys::export::export_private_keys;
//!
//! let cipher = EnvelopeCipher::new(&EncryptionKey::from_env()?);
//! let report = export_private_keys(&cipher, &KeyExport::ExportTo(dir), &records)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod setup;
pub mod storage;

pub use error::{ErrorKind, GuardianError, GuardianResult};
