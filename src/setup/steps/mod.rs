//! Setup pipeline steps
//!
//! The external collaborators the pipeline drives, each behind a trait, with
//! the file-backed implementations the CLI uses.

pub mod builder;
pub mod ceremony;
pub mod output;

pub use builder::{ContextBuilder, ElectionBuilder};
pub use ceremony::{CeremonyFile, KeyCeremony};
pub use output::{JsonPackageExporter, PublicArtifactExporter, PublicExport};
