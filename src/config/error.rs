//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Notifier channel capacity must be greater than zero")]
    InvalidChannelCapacity,

    #[error("Delivery timeout must be between 1 and {max} ms, got {got}")]
    InvalidDeliveryTimeout { got: u64, max: u64 },

    #[error("Seed excerpt length must be greater than zero")]
    InvalidExcerptLength,

    #[error("Default workflow title cannot be empty")]
    EmptyDefaultTitle,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
