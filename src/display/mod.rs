//! Display formatting for terminal output

pub mod keys;

pub use keys::format_key_checks;
