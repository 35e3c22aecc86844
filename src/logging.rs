//! Logging configuration for cmdparser applications.
//!
//! The library only emits `tracing` events. Binaries install a subscriber
//! that writes to stderr, keeping stdout free for usage and preferences
//! output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes logging to stderr.
///
/// Honors `RUST_LOG`. Does nothing if a global subscriber is already set.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
