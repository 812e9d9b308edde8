/// Diagnostic logging to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Stdout carries the progress lines and the table, so logs never go there.
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_FILTER: &str = "warn";

/// Install the global `tracing` subscriber. Call once, at startup.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
