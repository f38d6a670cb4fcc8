//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the setup pipeline.

pub mod keys;
pub mod setup;

pub use keys::{handle_key_command, KeyCommands};
pub use setup::{handle_setup_command, SetupArgs};
