//! Retry logic.
//!
//! # Responsibilities
//! - Bound the number of attempts per request
//! - Supply the pause between consecutive attempts
//!
//! # Design Decisions
//! - Fixed delay, no backoff or jitter
//! - Every failure class is retried the same way (transport, 4xx, 5xx)
//! - No pause after the final attempt; the caller gives up immediately

use std::time::Duration;

use crate::config::RetryConfig;

/// Fixed-count, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Same delay, different attempt budget.
    pub fn with_attempts(self, max_attempts: u32) -> Self {
        Self { max_attempts, ..self }
    }

    /// Pause to take after the given 1-based attempt failed, or `None`
    /// when no attempt follows.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt < self.max_attempts {
            Some(self.delay)
        } else {
            None
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}
