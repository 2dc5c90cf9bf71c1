//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; applications and examples call
//! [`init_tracing`] once to print them.

use adtkit_domain::{AdtError, LoggingConfig, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber, plain or JSON.
///
/// `RUST_LOG` wins over `config.filter` when set.
///
/// # Errors
/// Returns `AdtError::Config` for an invalid filter directive or when a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| AdtError::Config(format!("Invalid log filter '{}': {e}", config.filter)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_target(true).flatten_event(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| AdtError::Config(format!("Tracing already initialized: {e}")))?;
    tracing::debug!(filter = %config.filter, json = config.json, "Logging initialized");
    Ok(())
}

/// Initialize logging for tests (with simpler output).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}
