//! logging
//!
//! Diagnostic logging setup for the binary.
//!
//! The filter comes from `SLIDEWAY_LOG` (same syntax as `RUST_LOG`) when set,
//! otherwise from the CLI verbosity. Logs go to stderr so they never mix with
//! command output.

use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SLIDEWAY_LOG";

/// Default filter directive for a verbosity.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "slideway=error",
        Verbosity::Normal => "slideway=warn",
        Verbosity::Debug => "slideway=debug",
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
