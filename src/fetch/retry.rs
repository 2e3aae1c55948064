//! Retry/backoff policy for transient fetch failures

use crate::config::RetryConfig;
use std::time::Duration;

/// Explicit retry policy, built from configuration and injected into the
/// fetcher rather than living in process-wide state.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per URL, including the first one
    pub max_attempts: u32,

    /// Backoff factor in seconds
    pub backoff_factor: f64,

    /// Status codes that are worth retrying
    pub retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_factor: config.backoff_factor,
            retry_statuses: config.retry_statuses.clone(),
        }
    }

    /// Whether this status code counts as a transient failure
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Whether another attempt remains after `attempt` (1-based) failed
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the retry following failed attempt `attempt` (1-based):
    /// factor * 2^(attempt - 1) seconds
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let secs = self.backoff_factor * f64::powi(2.0, exponent as i32);
        Duration::from_secs_f64(secs.max(0.0))
    }
}
