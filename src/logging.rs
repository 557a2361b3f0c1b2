//! Log output of the command line tools.
//!
//! Data goes to stdout, so log records are written to stderr. `RUST_LOG`
//! overrides the default level.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Default filter: `warn`, or `info` when `verbose` is set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "casetools=info" } else { "warn" }
}

/// Installs the global subscriber.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}
