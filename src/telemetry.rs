//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; whoever embeds the engine
//! decides whether to install this subscriber or their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Returns an error
/// instead of panicking when a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}
