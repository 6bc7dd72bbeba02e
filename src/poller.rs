//! The bounded retry loop shared by every checker
//!
//! Semantics:
//! - `max_attempts` counts total attempts; the attempt closure is invoked
//!   once per attempt with a 1-based attempt number.
//! - `Converged` and `Fatal` return immediately with no further wait.
//! - `Pending` waits `wait_interval` once and continues, including after
//!   the final attempt; the wait is part of the slow exhaustion path.
//! - Exhausting the budget returns `false`; the loop never panics and
//!   never raises.
//!
//! Invariants:
//! - Attempts never exceed `max_attempts`.
//! - The loop is memoryless across attempts: nothing observed at attempt
//!   N influences attempt N+1 beyond the counter itself.
//!
//! Example
//! ```rust
//! use converge::{NoopDelay, Poller, RetryPolicy, Verdict};
//! use std::time::Duration;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let policy = RetryPolicy { max_attempts: 3, wait_interval: Duration::from_secs(1) };
//! let converged = Poller::new(policy, &NoopDelay, "demo")
//!     .run(|attempt| async move {
//!         if attempt == 2 { Verdict::Converged } else { Verdict::Pending }
//!     })
//!     .await;
//! assert!(converged);
//! # });
//! ```

use crate::delay::Delay;
use crate::policy::RetryPolicy;
use std::future::Future;
use tracing::debug;

/// Per-attempt classification of an observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The expected terminal state was reached.
    Converged,
    /// A state that can never self-resolve by waiting was observed.
    Fatal,
    /// Not informative yet; wait and poll again.
    Pending,
}

/// Drives one checker invocation: a bounded attempt loop over a
/// [`Verdict`]-returning closure, waiting between attempts through the
/// injected [`Delay`].
#[derive(Debug)]
pub struct Poller<'a> {
    policy: RetryPolicy,
    delay: &'a dyn Delay,
    name: &'a str,
}

impl<'a> Poller<'a> {
    pub fn new(policy: RetryPolicy, delay: &'a dyn Delay, name: &'a str) -> Self {
        Self { policy, delay, name }
    }

    /// Run the attempt loop to a boolean verdict.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> bool
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Verdict>,
    {
        for n in 1..=self.policy.max_attempts {
            match attempt(n).await {
                Verdict::Converged => return true,
                Verdict::Fatal => return false,
                Verdict::Pending => {
                    debug!(
                        poll = self.name,
                        attempt = n,
                        max_attempts = self.policy.max_attempts,
                        "still pending"
                    );
                    self.delay.wait(self.policy.wait_interval).await;
                }
            }
        }
        debug!(poll = self.name, attempts = self.policy.max_attempts, "retry budget exhausted");
        false
    }
}
