//! Subscriber setup for the `shelf` binary.
//!
//! Logs go to stderr so plan output on stdout stays machine-readable. The
//! filter comes from `SHELF_LOG` (same syntax as `RUST_LOG`), defaulting to
//! `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHELF_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `SHELF_LOG`, falling back to `warn` when the
/// variable is unset or unparsable.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_ok() {
        tracing::debug!(target: "shelf.cli", json, "logging initialised");
    }
}
