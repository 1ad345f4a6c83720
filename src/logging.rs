//! Diagnostic logging for the binary. The library only emits events.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding an `EnvFilter` directive, e.g. `asset_guard=debug`.
pub const LOG_ENV_VAR: &str = "ASSET_GUARD_LOG";

/// Level implied by the command line when `ASSET_GUARD_LOG` is unset.
#[must_use]
pub const fn level_for_flags(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Build the filter: the environment wins over the flags.
#[must_use]
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for_flags(verbose, quiet)))
}

/// Install a stderr subscriber. A second call is a no-op.
pub fn init_logging(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_filter(build_filter(verbose, quiet)),
        )
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
