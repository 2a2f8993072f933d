//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber honouring `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a fmt subscriber with an explicit filter directive, e.g. `"quay_ui=trace"`.
pub fn init_with_filter(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}
