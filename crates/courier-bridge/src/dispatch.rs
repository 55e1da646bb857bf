//! Scheduling deliveries onto the host's delivery context.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A unit of delivery work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedules delivery work on some execution context.
pub trait Dispatcher: Send + Sync {
    /// Schedule `task`. Must not block.
    fn post(&self, task: Task);
}

/// Runs every task immediately on the calling context.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn post(&self, task: Task) {
        task();
    }
}

/// Queue of tasks to run on the host's main context.
///
/// Create it with [`MainLoop::channel`], hand the [`MainLoopDispatcher`] to
/// listeners, and drive the loop from the main context with
/// [`run`](Self::run) or [`run_pending`](Self::run_pending).
pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<Task>,
}

impl MainLoop {
    /// Create a loop and the dispatcher that feeds it.
    #[must_use]
    pub fn channel() -> (Self, MainLoopDispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, MainLoopDispatcher { tx })
    }

    /// Run tasks as they arrive until every dispatcher is dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
        debug!("Main loop closed");
    }

    /// Run every task queued so far without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0_usize;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran = ran.saturating_add(1);
        }
        if ran > 0 {
            trace!(ran, "Drained main loop");
        }
        ran
    }
}

impl fmt::Debug for MainLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoop").finish_non_exhaustive()
    }
}

/// Posts tasks onto a [`MainLoop`].
#[derive(Clone)]
pub struct MainLoopDispatcher {
    tx: mpsc::UnboundedSender<Task>,
}

impl Dispatcher for MainLoopDispatcher {
    fn post(&self, task: Task) {
        if self.tx.send(task).is_err() {
            debug!("Main loop gone, dropping delivery");
        }
    }
}

impl fmt::Debug for MainLoopDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoopDispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
