//! Single-timer debounce.
//!
//! Scheduling a task cancels whatever timer is still pending, so only the
//! last task of a burst runs, once the settle delay has passed without a new
//! schedule. A task that has already started is never interrupted.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Settle delay for criteria changes in milliseconds
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the settle delay, replacing any pending task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach the task so a later schedule only ever aborts the timer
            tokio::spawn(task);
        });

        if let Some(previous) = self.pending.lock().replace(timer) {
            previous.abort();
        }
    }

    /// Cancel the pending timer. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(timer) if !timer.is_finished() => {
                timer.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SETTLE_DELAY_MS))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.get_mut().take() {
            timer.abort();
        }
    }
}
