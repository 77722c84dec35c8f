//! Polling configuration

use crate::MonitorError;
use std::time::Duration;

/// Default number of status checks
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait between checks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// How many times to poll, and how long to wait in between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Maximum number of status queries (at least 1)
    pub max_attempts: u32,
    /// Wait between two consecutive queries
    pub interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl MonitorConfig {
    /// Create a configuration
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Create a configuration with the interval given in whole seconds
    pub fn with_interval_secs(max_attempts: u32, interval_secs: u64) -> Self {
        Self::new(max_attempts, Duration::from_secs(interval_secs))
    }

    /// Check the configuration before polling
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.max_attempts == 0 {
            return Err(MonitorError::invalid_input(
                "max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Longest time a poll can spend waiting, excluding query latency
    pub fn max_wait(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }
}
