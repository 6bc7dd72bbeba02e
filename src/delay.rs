//! Abstraction for waiting between poll attempts
//!
//! Enables running full retry budgets in tests without real time delays

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Abstraction for waiting between poll attempts
pub trait Delay: Send + Sync + std::fmt::Debug {
    fn wait(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Production delay backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn wait(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Test delay that returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelay;

impl Delay for NoopDelay {
    fn wait(&self, _duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async {})
    }
}

/// Test delay that records every requested wait without sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All waits requested so far, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    /// Number of waits requested so far.
    pub fn count(&self) -> usize {
        self.waits.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.waits.lock().unwrap().clear();
    }
}

impl Delay for RecordingDelay {
    fn wait(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        self.waits.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}
