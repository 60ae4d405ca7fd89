//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the `RUST_LOG` env filter.
///
/// Default: warn for dependencies, info for this crate. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,genques=info")),
        )
        .try_init();
}
