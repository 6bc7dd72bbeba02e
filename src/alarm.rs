//! Monitoring-alarm convergence checkers.
//!
//! The single-read checker classifies one alarm per attempt: `OK`
//! converges, `ALARM` is fatal, anything else (including an empty
//! response) is pending. The convergence wrapper re-runs the single-read
//! checker under its own budget; it cannot tell a fired alarm from an
//! exhausted inner budget (both come back `false`), so it retries either
//! way, restarting the inner attempt budget from scratch each time.

use crate::checker::Checker;
use crate::client::AlarmClient;
use crate::poller::Verdict;
use crate::state::AlarmState;
use tracing::{debug, warn};

impl Checker {
    /// Poll the named alarm until it reads `OK`, a fired alarm fails it,
    /// or the budget runs out. The retry policy is resolved under the
    /// alarm name.
    pub async fn alarm_state_ok<C>(&self, alarm_name: &str, client: &C) -> bool
    where
        C: AlarmClient + ?Sized,
    {
        self.poller(alarm_name)
            .run(|_| async move {
                let records = client.get_alarm(alarm_name).await;
                let Some(record) = records.first() else {
                    debug!(alarm = alarm_name, "no alarm data returned");
                    return Verdict::Pending;
                };
                match record.state {
                    AlarmState::Ok => Verdict::Converged,
                    AlarmState::Alarm => {
                        warn!(alarm = alarm_name, "alarm has fired");
                        Verdict::Fatal
                    }
                    // Transitional states are tolerated and polled again.
                    AlarmState::InsufficientData => Verdict::Pending,
                }
            })
            .await
    }

    /// Keep re-running [`alarm_state_ok`](Checker::alarm_state_ok) until
    /// it converges or this wrapper's own budget runs out.
    ///
    /// An inner `false` may mean a fired alarm or an exhausted inner
    /// budget; the two are indistinguishable here and both are retried
    /// with a fresh inner budget.
    pub async fn wait_until_alarm_ok<C>(&self, alarm_name: &str, client: &C) -> bool
    where
        C: AlarmClient + ?Sized,
    {
        self.poller(alarm_name)
            .run(|_| async move {
                if self.alarm_state_ok(alarm_name, client).await {
                    Verdict::Converged
                } else {
                    Verdict::Pending
                }
            })
            .await
    }
}
