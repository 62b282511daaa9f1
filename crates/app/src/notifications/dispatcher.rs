//! Best-effort dispatch of non-critical work.

use std::{error::Error as StdError, future::Future};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Runs side effects that must never fail the caller.
///
/// A dispatched task runs on the Tokio runtime independently of the request that started it.
/// Its error is logged and then discarded; nothing is retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestEffort;

impl BestEffort {
    /// Spawn `future` under the name `task`.
    ///
    /// The returned handle may be dropped, which detaches the task.
    pub fn spawn<F, E>(task: &'static str, future: F) -> Dispatched
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: StdError + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            match future.await {
                Ok(()) => {
                    debug!(task, "side effect completed");

                    true
                }
                Err(error) => {
                    warn!(task, error = %error, "side effect failed");

                    false
                }
            }
        });

        Dispatched { task, handle }
    }
}

/// Handle to a task started by [`BestEffort::spawn`].
#[derive(Debug)]
pub struct Dispatched {
    task: &'static str,
    handle: JoinHandle<bool>,
}

impl Dispatched {
    /// Name the task was spawned under.
    pub fn task(&self) -> &'static str {
        self.task
    }

    /// Wait for the task to finish and report whether it succeeded.
    ///
    /// A task that panicked or was cancelled counts as failed.
    pub async fn settled(self) -> bool {
        match self.handle.await {
            Ok(succeeded) => succeeded,
            Err(error) => {
                warn!(task = self.task, error = %error, "side effect aborted");

                false
            }
        }
    }
}
