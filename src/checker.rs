//! The checker facade.
//!
//! A [`Checker`] bundles the configuration and the delay implementation
//! every checker invocation needs. Each invocation resolves its own
//! [`RetryPolicy`] fresh and holds no state beyond its attempt counter,
//! so one `Checker` can serve any number of concurrent invocations.

use crate::config::Config;
use crate::delay::{Delay, TokioDelay};
use crate::policy::RetryPolicy;
use crate::poller::Poller;
use std::sync::Arc;

/// Entry point for the convergence checkers.
///
/// Construct once with the process-wide [`Config`]; the individual
/// checkers live in their own impl blocks (`health`, `alarm`,
/// `provision`).
#[derive(Debug, Clone)]
pub struct Checker {
    config: Config,
    delay: Arc<dyn Delay>,
}

impl Checker {
    /// A checker that waits on the tokio timer between attempts.
    pub fn new(config: Config) -> Self {
        Self { config, delay: Arc::new(TokioDelay) }
    }

    /// Replace the delay implementation, typically with
    /// [`NoopDelay`](crate::NoopDelay) or
    /// [`RecordingDelay`](crate::RecordingDelay) in tests.
    pub fn with_delay<D: Delay + 'static>(mut self, delay: D) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// The policy a given task resolves to under this checker's config.
    pub fn policy(&self, task: &str) -> RetryPolicy {
        RetryPolicy::resolve(&self.config, task)
    }

    pub(crate) fn poller<'a>(&'a self, task: &'a str) -> Poller<'a> {
        Poller::new(self.policy(task), self.delay.as_ref(), task)
    }
}
