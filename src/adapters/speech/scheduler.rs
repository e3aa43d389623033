//! Implements Scheduler with tokio timers.

use crate::ports::{DeferredTask, Scheduler};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Spawns one task per deferred callback; the task sleeps, then runs it.
/// Callbacks are never cancelled.
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler bound to the runtime of the calling task.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, task: DeferredTask) {
        debug!(delay_ms = delay.as_millis() as u64, "follow-up scheduled");
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
