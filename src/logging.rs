//! Tracing subscriber setup for the `lms` binary
//!
//! Library code only emits `tracing` events; the binary decides where they go.
//! Events are written to stderr so they never mix with listings on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `--verbose` is given and `RUST_LOG` is unset
pub const VERBOSE_FILTER: &str = "lms_cli=debug,info";

/// Build the filter: `RUST_LOG` wins, then verbosity, then the configured default
pub fn build_filter(verbose: bool, default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new(default_filter)
        }
    })
}

/// Install the global subscriber
pub fn init_logger(verbose: bool, default_filter: &str) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
