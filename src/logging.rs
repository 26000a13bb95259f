//! Diagnostics go to stderr so they never interleave with rendered output.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RSVP_LOG";

/// Install the global subscriber. `RSVP_LOG` takes the usual filter syntax
/// (`debug`, `rsvp_core=trace`, ...); `--verbose` bumps the default.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
