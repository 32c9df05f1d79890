//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Build the filter: RUST_LOG wins, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize tracing, writing to stderr so stdout stays clean for reports.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept and a `debug!` event records the skipped init.
pub fn init_logging(default_directive: &str) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }

    installed
}
