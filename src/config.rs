//! Explicit configuration for retry policy resolution.
//!
//! A [`Config`] is constructed once at process start (from YAML or
//! programmatically) and passed into checkers by the caller; nothing in
//! this crate reads files or environment variables on its own. The YAML
//! shape keys task identifiers at the document root:
//!
//! ```yaml
//! elb_health_check:
//!   retry_counter: 10
//!   retry_wait_in_seconds: 5
//! ```
//!
//! Sections that are not task overrides (cloud credentials, stack
//! identifiers) deserialize to empty overrides and are ignored by the
//! resolver.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Per-task retry overrides keyed by task identifier.
///
/// Task identifiers are opaque: they are not validated against a known
/// set, and looking up an absent task is the normal case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    tasks: HashMap<String, TaskPolicy>,
}

/// Retry overrides for one task. Both fields are independently optional;
/// an unset field falls back to its default at resolution time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPolicy {
    pub retry_counter: Option<u32>,
    pub retry_wait_in_seconds: Option<u64>,
}

/// Errors raised while loading configuration. Checker verdicts never use
/// this channel; it exists only on the config-loading edge.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl Config {
    /// Parse configuration from a YAML document. An empty document means
    /// no overrides.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Overrides for a task, if any were configured.
    pub fn task(&self, id: &str) -> Option<&TaskPolicy> {
        self.tasks.get(id)
    }

    /// Add or replace the overrides for a task.
    pub fn with_task(mut self, id: impl Into<String>, policy: TaskPolicy) -> Self {
        self.tasks.insert(id.into(), policy);
        self
    }
}
