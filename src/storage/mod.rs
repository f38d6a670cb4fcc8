//! Storage layer for guardian-keys
//!
//! File helpers shared by the public package export and the encrypted key
//! export.

pub mod file_io;

pub use file_io::{read_json_required, restrict_to_owner, write_json_atomic, write_secret_file};
