//! Export of guardian private keys
//!
//! Writes encrypted per-guardian key files and verifies them afterwards.

pub mod private_keys;
pub mod verify;

pub use private_keys::{export_private_keys, ExportReport};
pub use verify::{verify_key_files, KeyFileCheck, KeyFileStatus};
