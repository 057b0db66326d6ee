//! One-second tick source.
//!
//! A [`TickHandle`] is the only thing that can deliver ticks to a session.
//! Dropping it stops the interval task and discards any tick that was
//! already queued, so a released handle can never reach a stale session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::trace;

/// Something that can start a periodic tick.
pub trait TickSource {
    fn start_ticking(&self, period: Duration) -> TickHandle;
}

/// Owned, cancellable periodic tick.
#[derive(Debug)]
pub struct TickHandle {
    rx: mpsc::Receiver<()>,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Spawn an interval task on the current tokio runtime.
    ///
    /// The first tick fires one `period` after the call. Missed ticks are
    /// delivered in a burst so the count matches elapsed time. A zero
    /// period is raised to one millisecond.
    pub fn spawn(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        trace!(period_ms = period.as_millis() as u64, "tick task spawned");
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Wrap an externally driven channel. Each `()` sent is one tick.
    pub fn from_receiver(rx: mpsc::Receiver<()>) -> Self {
        Self { rx, task: None }
    }

    /// Wait for the next tick. `None` once the sender side is gone.
    pub async fn next(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Stop ticking. Same as dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.rx.close();
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("tick task aborted");
        }
    }
}

/// [`TickSource`] backed by `tokio::time::interval`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

impl TickSource for TokioTicker {
    fn start_ticking(&self, period: Duration) -> TickHandle {
        TickHandle::spawn(period)
    }
}
