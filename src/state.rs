//! State families reported by the collaborator clients.
//!
//! Each family is a closed enum so an unhandled state is a compile error
//! rather than a silent fall-through. Checkers still keep an explicit
//! retry arm for states that are transitional rather than terminal.

use std::fmt;

/// Health as reported by load-balancer and instance collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// The resource is serving and all registered targets are in service.
    Ready,
    /// The resource can never become ready without operator intervention.
    Misconfigured,
    /// Not (yet) ready; waiting may resolve this.
    NotReady,
}

/// State of a single monitoring alarm record.
///
/// Only `Ok` and `Alarm` are terminal; everything else is tolerated and
/// polled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Ok,
    Alarm,
    InsufficientData,
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmState::Ok => write!(f, "OK"),
            AlarmState::Alarm => write!(f, "ALARM"),
            AlarmState::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// One metric-alarm record returned by the monitoring collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub name: String,
    pub state: AlarmState,
}

impl AlarmRecord {
    pub fn new(name: impl Into<String>, state: AlarmState) -> Self {
        Self { name: name.into(), state }
    }
}

/// The instance tag key whose value carries provisioning status.
pub const INIT_STATUS_TAG: &str = "ComponentInitStatus";

/// A key/value tag attached to an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Provisioning status carried by the [`INIT_STATUS_TAG`] tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    Running,
    Success,
    Failed,
}

impl ProvisionStatus {
    /// Parse a tag value. Returns `None` for any value outside the known
    /// set; callers treat that as "not yet informative" and poll again.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Running" => Some(Self::Running),
            "Success" => Some(Self::Success),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
