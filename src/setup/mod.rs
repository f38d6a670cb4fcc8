//! Election setup
//!
//! Runs the key ceremony, builds the election and exports its outputs:
//! public artifacts in the clear, guardian private keys encrypted.

pub mod pipeline;
pub mod steps;

pub use pipeline::{PipelineStage, SetupOutcome, SetupPipeline};
