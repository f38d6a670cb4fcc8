//! Setup CLI command
//!
//! Runs the election setup pipeline from command-line inputs.

use std::path::PathBuf;

use clap::Args;

use crate::config::{EncryptionKey, KeyExport, OutputPlan};
use crate::crypto::EnvelopeCipher;
use crate::error::{GuardianError, GuardianResult};
use crate::models::SetupInputs;
use crate::setup::steps::{CeremonyFile, ContextBuilder, JsonPackageExporter};
use crate::setup::{SetupOutcome, SetupPipeline};
use crate::storage::read_json_required;

/// Arguments for `setup`
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Number of guardians taking part in the key ceremony
    #[arg(long)]
    pub guardian_count: u32,

    /// Minimum number of guardians needed to decrypt the tally
    #[arg(long)]
    pub quorum: u32,

    /// Election manifest (JSON)
    #[arg(long)]
    pub manifest: PathBuf,

    /// Key ceremony result (JSON) holding the joint key and guardian records
    #[arg(long)]
    pub ceremony: PathBuf,

    /// Optional verification URL for the election
    #[arg(long)]
    pub url: Option<String>,

    /// Directory for the public election package. Existing files are overwritten.
    #[arg(long)]
    pub package_dir: PathBuf,

    /// Directory for encrypted guardian private keys. Keep it protected.
    /// Existing files are overwritten. Omit to skip private key export.
    #[arg(long)]
    pub keys_dir: Option<PathBuf>,
}

/// Handle the setup command
///
/// The key is only resolved when private keys are exported.
pub fn handle_setup_command(
    args: SetupArgs,
    resolve_key: impl FnOnce() -> GuardianResult<EncryptionKey>,
) -> GuardianResult<SetupOutcome> {
    let manifest: serde_json::Value = read_json_required(&args.manifest).map_err(|e| {
        GuardianError::Configuration(format!(
            "Could not load manifest {}: {}",
            args.manifest.display(),
            e
        ))
    })?;
    let inputs = SetupInputs::new(args.guardian_count, args.quorum, manifest, args.url)?;
    let plan = OutputPlan::new(args.package_dir, KeyExport::from_option(args.keys_dir));

    let mut pipeline =
        SetupPipeline::new(CeremonyFile::new(args.ceremony), ContextBuilder, JsonPackageExporter);
    if plan.keys().dir().is_some() {
        pipeline = pipeline.with_cipher(EnvelopeCipher::new(&resolve_key()?));
    }

    let outcome = pipeline.run(&inputs, &plan).map_err(|e| {
        if matches!(e, GuardianError::Export { .. }) {
            eprintln!(
                "WARNING: the election package in {} is incomplete. \
                 Re-run the whole setup before publishing it.",
                plan.package_dir().display()
            );
        }
        e
    })?;
    print_outcome(&outcome);
    Ok(outcome)
}

fn print_outcome(outcome: &SetupOutcome) {
    println!("Election package: {}", outcome.public.package_dir.display());

    match &outcome.private {
        Some(report) => {
            println!("Guardian private keys (ENCRYPTED): {}", report.output_dir.display());
            println!();
            println!("WARNING: {}", report.advisory());
        }
        None => {
            println!("Guardian private keys were not exported.");
        }
    }
}
