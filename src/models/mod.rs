//! Core data models for guardian-keys
//!
//! Guardian identifiers and records, plus the values passed between the
//! stages of the election setup.

pub mod election;
pub mod guardian;
pub mod ids;

pub use election::{BuildResult, CeremonyResult, ElectionContext, SetupInputs};
pub use guardian::{ElectionKeyPair, GuardianPrivateRecord, GuardianRecord};
pub use ids::GuardianId;
