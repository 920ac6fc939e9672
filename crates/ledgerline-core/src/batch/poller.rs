//! Batch status poller
//!
//! Re-checks a batch on a fixed interval with a bounded attempt budget.
//! The poller is an explicit task with a cancellation token rather than a
//! bare timer, so a host that goes away mid-poll cancels it instead of
//! leaking it. One collaborator failure stops the loop; there is no retry.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{BatchStatus, BatchStatusSource};
use crate::store::StoreError;

/// Poller timing and budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between status checks
    pub interval_secs: u64,
    /// Attempts before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        // 20 x 15s: give the backend up to five minutes
        PollConfig {
            interval_secs: 15,
            max_attempts: 20,
        }
    }
}

impl PollConfig {
    /// The check interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// How a poll ended
#[derive(Debug)]
pub enum PollOutcome {
    /// The batch reported success
    Completed(BatchStatus),
    /// The attempt budget ran out
    TimedOut,
    /// The handle was cancelled
    Cancelled,
    /// The status collaborator failed; the loop stopped on first error
    Failed(StoreError),
}

/// Handle to a running poll task
#[derive(Debug)]
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Ask the poll task to stop
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the poll to finish and return its outcome
    pub async fn join(self) -> PollOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(_) => PollOutcome::Cancelled,
        }
    }
}

/// Spawn a poll task watching one batch
///
/// `on_progress` is invoked once per unfinished attempt with the attempt
/// number and the budget.
pub fn spawn<S, F>(
    source: S,
    batch_id: impl Into<String>,
    config: PollConfig,
    on_progress: F,
) -> PollHandle
where
    S: BatchStatusSource + Send + Sync + 'static,
    F: FnMut(u32, u32) + Send + 'static,
{
    let token = CancellationToken::new();
    let task = tokio::spawn(run(
        source,
        batch_id.into(),
        config,
        token.clone(),
        on_progress,
    ));
    PollHandle { token, task }
}

async fn run<S, F>(
    source: S,
    batch_id: String,
    config: PollConfig,
    token: CancellationToken,
    mut on_progress: F,
) -> PollOutcome
where
    S: BatchStatusSource,
    F: FnMut(u32, u32),
{
    let mut attempts = 0u32;

    loop {
        tokio::select! {
            _ = token.cancelled() => return PollOutcome::Cancelled,
            _ = tokio::time::sleep(config.interval()) => {}
        }

        attempts += 1;
        match source.batch_status(&batch_id).await {
            Ok(status) if status.is_completed() => {
                tracing::debug!(%batch_id, attempts, "batch completed");
                return PollOutcome::Completed(status);
            }
            Ok(_) => {
                on_progress(attempts, config.max_attempts);
                if attempts >= config.max_attempts {
                    tracing::warn!(%batch_id, attempts, "batch poll timed out");
                    return PollOutcome::TimedOut;
                }
            }
            Err(error) => {
                tracing::warn!(%batch_id, %error, "batch poll failed");
                return PollOutcome::Failed(error);
            }
        }
    }
}
