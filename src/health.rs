//! Health convergence checkers.
//!
//! Four checkers over the [`HealthClient`] capability set. The two
//! load-balancer checkers fail fast when the very first read reports
//! [`HealthState::Misconfigured`], since a misconfiguration cannot
//! self-resolve by waiting. That read happens once, before the loop;
//! later attempts treat any non-ready state as pending.

use crate::checker::Checker;
use crate::client::HealthClient;
use crate::poller::Verdict;
use crate::state::HealthState;
use tracing::warn;

impl Checker {
    /// Wait until the instances behind a load balancer report ready.
    pub async fn elb_instances_healthy<C>(&self, task: &str, client: &C) -> bool
    where
        C: HealthClient + ?Sized,
    {
        if client.health_state().await == HealthState::Misconfigured {
            warn!(task, "load balancer misconfigured; failing without retrying");
            return false;
        }
        self.poller(task)
            .run(|_| async move {
                match client.health_state().await {
                    HealthState::Ready => Verdict::Converged,
                    HealthState::Misconfigured | HealthState::NotReady => Verdict::Pending,
                }
            })
            .await
    }

    /// Wait until the load balancer itself reports ready.
    pub async fn elb_healthy<C>(&self, task: &str, client: &C) -> bool
    where
        C: HealthClient + ?Sized,
    {
        if client.health_state_elb().await == HealthState::Misconfigured {
            warn!(task, "load balancer misconfigured; failing without retrying");
            return false;
        }
        self.poller(task)
            .run(|_| async move {
                match client.health_state_elb().await {
                    HealthState::Ready => Verdict::Converged,
                    HealthState::Misconfigured | HealthState::NotReady => Verdict::Pending,
                }
            })
            .await
    }

    /// Wait until the instance set reports healthy. Any non-healthy read
    /// is treated as not-yet-ready.
    pub async fn instances_healthy<C>(&self, task: &str, client: &C) -> bool
    where
        C: HealthClient + ?Sized,
    {
        self.poller(task)
            .run(|_| async move {
                if client.healthy().await {
                    Verdict::Converged
                } else {
                    Verdict::Pending
                }
            })
            .await
    }

    /// Wait until the autoscaling group reports healthy.
    pub async fn asg_healthy<C>(&self, task: &str, client: &C) -> bool
    where
        C: HealthClient + ?Sized,
    {
        self.poller(task)
            .run(|_| async move {
                if client.healthy_asg().await {
                    Verdict::Converged
                } else {
                    Verdict::Pending
                }
            })
            .await
    }
}
