//! Provisioning-status convergence checkers.
//!
//! Provisioning progress is reported through the `ComponentInitStatus`
//! instance tag. The single-instance checker classifies that tag's value;
//! the fleet checker aggregates it across every instance that responded
//! and additionally requires the autoscaling group to read healthy in the
//! same attempt. A `Failed` value is fatal unless the caller opted to
//! tolerate failed instances.

use crate::checker::Checker;
use crate::client::{FleetTagClient, HealthClient, TagClient};
use crate::poller::Verdict;
use crate::state::{ProvisionStatus, INIT_STATUS_TAG};
use tracing::{debug, warn};

impl Checker {
    /// Wait until one instance's provisioning status tag reads `Success`.
    pub async fn component_provisioned<C>(&self, task: &str, client: &C) -> bool
    where
        C: TagClient + ?Sized,
    {
        self.poller(task)
            .run(|_| async move {
                let tags = client.get_tags().await;
                if tags.is_empty() {
                    debug!(task, "no tags returned yet");
                    return Verdict::Pending;
                }

                // Last ComponentInitStatus match wins, in the collection's
                // own order.
                let mut status = None;
                for tag in &tags {
                    if tag.key == INIT_STATUS_TAG {
                        status = Some(tag.value.as_str());
                    }
                }

                match status.and_then(ProvisionStatus::parse) {
                    Some(ProvisionStatus::Failed) => {
                        warn!(task, "provisioning failed");
                        Verdict::Fatal
                    }
                    Some(ProvisionStatus::Success) => Verdict::Converged,
                    // Still running, no status tag yet, or a value outside
                    // the known set: poll again.
                    Some(ProvisionStatus::Running) | None => Verdict::Pending,
                }
            })
            .await
    }

    /// Wait until every responding instance reports `Success` and the
    /// autoscaling group reads healthy in the same attempt.
    ///
    /// With `skip_failed_state` a `Failed` instance no longer fails the
    /// fleet fast; the checker keeps polling until the success condition
    /// is met or the budget runs out.
    pub async fn components_provisioned<C>(
        &self,
        task: &str,
        client: &C,
        skip_failed_state: bool,
    ) -> bool
    where
        C: FleetTagClient + HealthClient + ?Sized,
    {
        self.poller(task)
            .run(|_| async move {
                let fleet = client.get_tags().await;
                if fleet.is_empty() {
                    debug!(task, "no instances reported tags yet");
                    return Verdict::Pending;
                }
                let instances = fleet.len();

                let statuses: Vec<ProvisionStatus> = fleet
                    .iter()
                    .flatten()
                    .filter(|tag| tag.key == INIT_STATUS_TAG)
                    .filter_map(|tag| ProvisionStatus::parse(&tag.value))
                    .collect();

                if !skip_failed_state && statuses.contains(&ProvisionStatus::Failed) {
                    warn!(task, "provisioning failed on at least one instance");
                    return Verdict::Fatal;
                }

                let succeeded =
                    statuses.iter().filter(|s| **s == ProvisionStatus::Success).count();
                if succeeded == instances && client.healthy_asg().await {
                    Verdict::Converged
                } else {
                    Verdict::Pending
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::Checker;
    use crate::client::{FleetTagClient, HealthClient, TagClient};
    use crate::config::{Config, TaskPolicy};
    use crate::delay::RecordingDelay;
    use crate::state::{HealthState, Tag, INIT_STATUS_TAG};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn status(value: &str) -> Tag {
        Tag::new(INIT_STATUS_TAG, value)
    }

    #[derive(Debug, Default)]
    struct ScriptedTags {
        responses: Mutex<VecDeque<Vec<Tag>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTags {
        fn with(responses: Vec<Vec<Tag>>) -> Self {
            Self { responses: Mutex::new(responses.into()), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TagClient for ScriptedTags {
        async fn get_tags(&self) -> Vec<Tag> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().unwrap().pop_front().unwrap_or_default()
        }
    }

    /// Fleet collaborator: scripted per-instance tag sets plus a scripted
    /// autoscaling-group health flag.
    #[derive(Debug, Default)]
    struct ScriptedFleet {
        responses: Mutex<VecDeque<Vec<Vec<Tag>>>>,
        asg: Mutex<VecDeque<bool>>,
        asg_calls: AtomicUsize,
    }

    impl ScriptedFleet {
        fn with(responses: Vec<Vec<Vec<Tag>>>, asg: Vec<bool>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                asg: Mutex::new(asg.into()),
                asg_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FleetTagClient for ScriptedFleet {
        async fn get_tags(&self) -> Vec<Vec<Tag>> {
            self.responses.lock().unwrap().pop_front().unwrap_or_default()
        }
    }

    #[async_trait]
    impl HealthClient for ScriptedFleet {
        async fn health_state(&self) -> HealthState {
            HealthState::NotReady
        }

        async fn health_state_elb(&self) -> HealthState {
            HealthState::NotReady
        }

        async fn healthy(&self) -> bool {
            false
        }

        async fn healthy_asg(&self) -> bool {
            self.asg_calls.fetch_add(1, Ordering::SeqCst);
            self.asg.lock().unwrap().pop_front().unwrap_or(false)
        }
    }

    fn checker_for(task: &str, attempts: u32) -> (Checker, RecordingDelay) {
        let delay = RecordingDelay::new();
        let config = Config::default().with_task(
            task,
            TaskPolicy { retry_counter: Some(attempts), retry_wait_in_seconds: Some(1) },
        );
        (Checker::new(config).with_delay(delay.clone()), delay)
    }

    #[tokio::test]
    async fn running_then_success_converges() {
        let (checker, delay) = checker_for("prov", 5);
        let client = ScriptedTags::with(vec![
            vec![status("Running")],
            vec![status("Running")],
            vec![status("Success")],
        ]);

        assert!(checker.component_provisioned("prov", &client).await);
        assert_eq!(client.calls(), 3);
        assert_eq!(delay.count(), 2);
    }

    #[tokio::test]
    async fn failed_tag_fails_fast() {
        let (checker, delay) = checker_for("prov", 5);
        let client = ScriptedTags::with(vec![vec![status("Failed")]]);

        assert!(!checker.component_provisioned("prov", &client).await);
        assert_eq!(client.calls(), 1);
        assert_eq!(delay.count(), 0);
    }

    #[tokio::test]
    async fn empty_tag_reads_consume_budget() {
        let (checker, delay) = checker_for("prov", 3);
        let client = ScriptedTags::with(vec![]);

        assert!(!checker.component_provisioned("prov", &client).await);
        assert_eq!(client.calls(), 3);
        assert_eq!(delay.count(), 3);
    }

    #[tokio::test]
    async fn duplicate_status_tags_last_match_wins() {
        let (checker, _delay) = checker_for("prov", 2);
        let client = ScriptedTags::with(vec![vec![status("Running"), status("Success")]]);
        assert!(checker.component_provisioned("prov", &client).await);

        let client = ScriptedTags::with(vec![vec![status("Success"), status("Failed")]]);
        assert!(!checker.component_provisioned("prov", &client).await);
    }

    #[tokio::test]
    async fn unrecognized_value_and_missing_tag_are_pending() {
        let (checker, delay) = checker_for("prov", 4);
        let client = ScriptedTags::with(vec![
            vec![status("Rebooting")],
            vec![Tag::new("Name", "bastion")],
            vec![status("Success")],
        ]);

        assert!(checker.component_provisioned("prov", &client).await);
        assert_eq!(delay.count(), 2);
    }

    #[tokio::test]
    async fn fleet_converges_once_every_instance_succeeds_and_asg_is_healthy() {
        let (checker, delay) = checker_for("fleet", 5);
        let client = ScriptedFleet::with(
            vec![
                vec![vec![status("Success")], vec![status("Running")]],
                vec![vec![status("Success")], vec![status("Success")]],
            ],
            vec![true],
        );

        assert!(checker.components_provisioned("fleet", &client, false).await);
        // The group health read only happens once all instances succeed.
        assert_eq!(client.asg_calls.load(Ordering::SeqCst), 1);
        assert_eq!(delay.count(), 1);
    }

    #[tokio::test]
    async fn fleet_success_is_not_enough_without_asg_health() {
        let (checker, delay) = checker_for("fleet", 3);
        let all_success = vec![vec![status("Success")], vec![status("Success")]];
        let client = ScriptedFleet::with(
            vec![all_success.clone(), all_success.clone(), all_success],
            vec![],
        );

        assert!(!checker.components_provisioned("fleet", &client, false).await);
        assert_eq!(client.asg_calls.load(Ordering::SeqCst), 3);
        assert_eq!(delay.count(), 3);
    }

    #[tokio::test]
    async fn one_failed_instance_fails_the_fleet_fast() {
        let (checker, delay) = checker_for("fleet", 5);
        let client = ScriptedFleet::with(
            vec![vec![vec![status("Success")], vec![status("Failed")]]],
            vec![true],
        );

        assert!(!checker.components_provisioned("fleet", &client, false).await);
        assert_eq!(delay.count(), 0);
    }

    #[tokio::test]
    async fn skip_failed_state_keeps_polling_past_failed_instances() {
        let (checker, delay) = checker_for("fleet", 3);
        let with_failure = vec![vec![status("Success")], vec![status("Failed")]];
        let client = ScriptedFleet::with(
            vec![with_failure.clone(), with_failure.clone(), with_failure],
            vec![true, true, true],
        );

        assert!(!checker.components_provisioned("fleet", &client, true).await);
        assert_eq!(delay.count(), 3);
    }

    #[tokio::test]
    async fn skip_failed_state_still_converges_on_recovery() {
        let (checker, _delay) = checker_for("fleet", 4);
        let client = ScriptedFleet::with(
            vec![
                vec![vec![status("Failed")], vec![status("Running")]],
                vec![vec![status("Success")], vec![status("Success")]],
            ],
            vec![true],
        );

        assert!(checker.components_provisioned("fleet", &client, true).await);
    }

    #[tokio::test]
    async fn empty_fleet_reads_consume_budget() {
        let (checker, delay) = checker_for("fleet", 2);
        let client = ScriptedFleet::default();

        assert!(!checker.components_provisioned("fleet", &client, false).await);
        assert_eq!(delay.count(), 2);
    }

    #[tokio::test]
    async fn instance_without_status_tag_blocks_convergence() {
        // Both instances responded, but only one carries the status tag;
        // the success count can never match the instance count.
        let (checker, _delay) = checker_for("fleet", 2);
        let client = ScriptedFleet::with(
            vec![vec![vec![status("Success")], vec![Tag::new("Name", "web-1")]]],
            vec![true],
        );

        assert!(!checker.components_provisioned("fleet", &client, false).await);
    }
}
