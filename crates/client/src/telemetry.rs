//! Tracing/logging initialization for host applications.

use tracing_subscriber::EnvFilter;

/// Default directives: info globally, debug for the layers that log the
/// credential lifecycle (hydrate, login, forced logout, fault hooks).
const DEFAULT_DIRECTIVES: &str = "info,centralstore_session=debug,centralstore_client=debug";

/// Initialize tracing/logging for the process.
///
/// `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`]. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // JSON logs with targets, so the per-crate directives stay auditable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .try_init();
}
