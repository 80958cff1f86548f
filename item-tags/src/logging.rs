//! Logging setup
//!
//! The crate itself only emits through the `log` facade. Hosts that have no
//! subscriber of their own can call [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` wins over `default_directive` when set.
///
/// Fails instead of panicking if a global subscriber is already installed.
pub fn init_logging(default_directive: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| format!("Invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Failed to init logging: {}", e))
}
