//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FLOWGUARD` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a valid config.
//!
//! # Example
//!
//! ```no_run
//! use flowguard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Delivery timeout: {:?}", config.notifier.delivery_timeout());
//! ```

mod engine;
mod error;
mod notifier;
mod telemetry;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use notifier::{NotifierConfig, MAX_DELIVERY_TIMEOUT_MS};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Session creation and compliance repair behaviour
    #[serde(default)]
    pub engine: EngineConfig,

    /// Subscriber channel sizing and delivery timeout
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Log filter and output format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FLOWGUARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FLOWGUARD__NOTIFIER__DELIVERY_TIMEOUT_MS=500` -> `notifier.delivery_timeout_ms = 500`
    /// - `FLOWGUARD__ENGINE__AUTO_WIRE_REPAIRS=false` -> `engine.auto_wire_repairs = false`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FLOWGUARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.notifier.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
