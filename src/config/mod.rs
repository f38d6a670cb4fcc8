//! Configuration module for guardian-keys
//!
//! This module provides:
//! - Resolution of the key-encryption key from the environment
//! - Output layout for the election package and the guardian key files

pub mod key;
pub mod paths;

pub use key::{EncryptionKey, KEY_ENV_VAR, KEY_LEN};
pub use paths::{KeyExport, OutputPlan, GUARDIAN_PREFIX};
