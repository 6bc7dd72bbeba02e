//! Capability traits for the cloud collaborators checkers poll.
//!
//! Concrete clients (and how they authenticate or talk to the network)
//! live in the validation harness, not here. All methods are infallible
//! by contract: a collaborator that hits transient trouble reports an
//! empty collection or a not-ready state, which lands in the retry path
//! rather than in an error channel.

use crate::state::{AlarmRecord, HealthState, Tag};
use async_trait::async_trait;

/// Health of load balancers, instances, and autoscaling groups.
#[async_trait]
pub trait HealthClient: Send + Sync {
    /// Aggregate health of the instances behind a load balancer.
    async fn health_state(&self) -> HealthState;

    /// Health of the load balancer itself.
    async fn health_state_elb(&self) -> HealthState;

    /// Whether the instance set is healthy.
    async fn healthy(&self) -> bool;

    /// Whether the autoscaling group is healthy.
    async fn healthy_asg(&self) -> bool;
}

/// Monitoring-alarm lookups.
#[async_trait]
pub trait AlarmClient: Send + Sync {
    /// Current metric-alarm records for the named alarm. Empty means no
    /// alarm data was returned for this attempt.
    async fn get_alarm(&self, name: &str) -> Vec<AlarmRecord>;
}

/// Tag lookups for a single instance.
#[async_trait]
pub trait TagClient: Send + Sync {
    async fn get_tags(&self) -> Vec<Tag>;
}

/// Tag lookups across a fleet: one tag set per instance that responded.
#[async_trait]
pub trait FleetTagClient: Send + Sync {
    async fn get_tags(&self) -> Vec<Vec<Tag>>;
}
