//! Logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr, keeping stdout for
//! user-facing output. Filtering follows `RUST_LOG`, falling back to the
//! given default level.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
