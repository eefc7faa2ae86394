//! Notification fan-out configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the per-subscriber delivery timeout
pub const MAX_DELIVERY_TIMEOUT_MS: u64 = 10_000;

/// Subscriber channel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Buffered notifications per subscriber
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// How long a publish waits on a full subscriber channel before dropping it
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_ms: u64,
}

impl NotifierConfig {
    /// Get delivery timeout as Duration
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    /// Validate notifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        if self.delivery_timeout_ms == 0 || self.delivery_timeout_ms > MAX_DELIVERY_TIMEOUT_MS {
            return Err(ValidationError::InvalidDeliveryTimeout {
                got: self.delivery_timeout_ms,
                max: MAX_DELIVERY_TIMEOUT_MS,
            });
        }
        Ok(())
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            delivery_timeout_ms: default_delivery_timeout(),
        }
    }
}

fn default_channel_capacity() -> usize {
    64
}

fn default_delivery_timeout() -> u64 {
    250
}
