#![forbid(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # Converge
//!
//! Convergence polling for cloud-managed resources during infrastructure
//! validation: load balancers, autoscaling groups, monitoring alarms, and
//! fleets of provisioned instances.
//!
//! Each checker is a bounded retry loop that queries a collaborator client,
//! classifies the observed state, and either returns a verdict or waits and
//! polls again. Retry budgets are resolved per task from a [`Config`], with
//! fixed defaults when no override exists.
//!
//! ## Features
//!
//! - **Per-task retry policies** resolved from explicit configuration
//!   (no ambient lookup), with per-field defaults
//! - **Seven convergence checkers** over health, alarm, and provisioning
//!   state, each with its own success/fail/retry decision table
//! - **Fast-fail on fatal states** (misconfiguration, fired alarms, failed
//!   provisioning) distinct from slow failure on budget exhaustion
//! - **Injectable delays** so tests run full retry budgets without
//!   wall-clock waiting
//!
//! ## Quick Start
//!
//! ```rust
//! use converge::{AlarmClient, AlarmRecord, AlarmState, Checker, Config, NoopDelay};
//!
//! struct Monitoring;
//!
//! #[async_trait::async_trait]
//! impl AlarmClient for Monitoring {
//!     async fn get_alarm(&self, name: &str) -> Vec<AlarmRecord> {
//!         vec![AlarmRecord::new(name, AlarmState::Ok)]
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = Checker::new(Config::default()).with_delay(NoopDelay);
//!     assert!(checker.alarm_state_ok("cpu-credit-balance", &Monitoring).await);
//! }
//! ```

pub mod checker;
pub mod client;
pub mod config;
pub mod delay;
pub mod policy;
pub mod poller;
pub mod state;

mod alarm;
mod health;
mod provision;

// Re-exports
pub use checker::Checker;
pub use client::{AlarmClient, FleetTagClient, HealthClient, TagClient};
pub use config::{Config, ConfigError, TaskPolicy};
pub use delay::{Delay, NoopDelay, RecordingDelay, TokioDelay};
pub use policy::{RetryPolicy, DEFAULT_RETRY_COUNTER, DEFAULT_RETRY_WAIT};
pub use poller::{Poller, Verdict};
pub use state::{AlarmRecord, AlarmState, HealthState, ProvisionStatus, Tag, INIT_STATUS_TAG};
