//! Logging setup.
//!
//! Log lines go to stderr as `HH:MM:SS LEVEL message`. The level comes from
//! the CLI (`-v`, `-vv`, `-q`) unless `RUBIG_LOG` holds an `EnvFilter`
//! directive, which takes precedence.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Environment variable that overrides the CLI log level.
pub const LOG_ENV: &str = "RUBIG_LOG";

/// Maps the CLI verbosity flags to a default filter directive.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Installs the global subscriber. Call once, from `main`.
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%H:%M:%S".to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialise logging: {}", err))
}
