//! Retry policy resolution
//!
//! A [`RetryPolicy`] is the `(max_attempts, wait_interval)` pair governing
//! one checker invocation. It is resolved once per invocation from a
//! [`Config`] and is immutable for that invocation's lifetime.
//!
//! Semantics:
//! - Each field falls back to its default independently: a task may
//!   override `retry_counter` and still inherit the default wait, or the
//!   reverse.
//! - Resolution never fails. An unknown task identifier is the normal,
//!   expected case and yields the full defaults.

use crate::config::Config;
use std::time::Duration;

/// Default attempt budget when a task has no `retry_counter` override.
pub const DEFAULT_RETRY_COUNTER: u32 = 60;

/// Default wait between attempts when a task has no
/// `retry_wait_in_seconds` override.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(60);

/// The retry budget and inter-attempt wait for one checker invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub wait_interval: Duration,
}

impl RetryPolicy {
    /// Resolve the policy for a task, field by field.
    pub fn resolve(config: &Config, task: &str) -> Self {
        let overrides = config.task(task);
        let max_attempts =
            overrides.and_then(|t| t.retry_counter).unwrap_or(DEFAULT_RETRY_COUNTER);
        let wait_interval = overrides
            .and_then(|t| t.retry_wait_in_seconds)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_WAIT);
        Self { max_attempts, wait_interval }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_RETRY_COUNTER, wait_interval: DEFAULT_RETRY_WAIT }
    }
}
