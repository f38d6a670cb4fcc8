use anyhow::Result;
use clap::{Parser, Subcommand};

use guardian_keys::cli::{handle_key_command, handle_setup_command, KeyCommands, SetupArgs};
use guardian_keys::config::EncryptionKey;
use guardian_keys::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "guardian-keys",
    version,
    about = "Election setup with encrypted guardian private keys",
    long_about = "Runs the election setup from a key ceremony result: writes the public \
                  election package and exports each guardian's private record encrypted \
                  with AES-256-GCM under the key in GUARDIAN_KEY_ENCRYPTION_KEY."
)]
struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the election package and export encrypted guardian keys
    Setup(SetupArgs),

    /// Key management commands
    #[command(subcommand)]
    Keys(KeyCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Setup(args) => {
            handle_setup_command(args, EncryptionKey::from_env)?;
        }
        Commands::Keys(cmd) => {
            handle_key_command(cmd, EncryptionKey::from_env)?;
        }
    }

    Ok(())
}
