//! Polls a simulated autoscaling group until its fleet finishes
//! provisioning, logging each attempt.
//!
//! Run with: `cargo run --example wait_for_stack`

use async_trait::async_trait;
use converge::{Checker, Config, FleetTagClient, HealthClient, HealthState, Tag, TaskPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fleet where the second instance needs a few polls to finish.
#[derive(Debug, Default)]
struct SimulatedFleet {
    polls: AtomicUsize,
}

#[async_trait]
impl FleetTagClient for SimulatedFleet {
    async fn get_tags(&self) -> Vec<Vec<Tag>> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        let second = if poll < 3 { "Running" } else { "Success" };
        vec![
            vec![Tag::new("ComponentInitStatus", "Success")],
            vec![Tag::new("ComponentInitStatus", second)],
        ]
    }
}

#[async_trait]
impl HealthClient for SimulatedFleet {
    async fn health_state(&self) -> HealthState {
        HealthState::Ready
    }

    async fn health_state_elb(&self) -> HealthState {
        HealthState::Ready
    }

    async fn healthy(&self) -> bool {
        true
    }

    async fn healthy_asg(&self) -> bool {
        self.polls.load(Ordering::SeqCst) >= 3
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let config = Config::default().with_task(
        "fleet_provisioned",
        TaskPolicy { retry_counter: Some(10), retry_wait_in_seconds: Some(1) },
    );
    let checker = Checker::new(config);

    let converged = checker
        .components_provisioned("fleet_provisioned", &SimulatedFleet::default(), false)
        .await;

    println!("fleet converged: {converged}");
}
