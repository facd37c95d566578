//! Draining the controller's outbox into a store.
//!
//! Writes run one after another in outbox order. Each one fails or succeeds
//! on its own; a failed write never stops the ones behind it. The
//! [`Persister`] holds only `Arc`s, so a clone can flush on another task
//! while the controller keeps handling gestures.

mod policy;

pub use policy::{FailedWrite, RetryWithBackoff, SwallowFailures, WriteFailurePolicy};

use crate::board::{FlushReport, PendingWrite, WriteOutcome};
use crate::store::{BoardStore, StoreResult};
use crate::types::Task;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct Persister<S> {
    store: Arc<S>,
    policy: Arc<dyn WriteFailurePolicy>,
}

impl<S> Clone for Persister<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl<S: BoardStore> Persister<S> {
    /// Persister that logs and drops failed writes.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, Arc::new(SwallowFailures))
    }

    pub fn with_policy(store: Arc<S>, policy: Arc<dyn WriteFailurePolicy>) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn policy(&self) -> &Arc<dyn WriteFailurePolicy> {
        &self.policy
    }

    /// Send `writes` to the store in order.
    pub async fn flush(&self, writes: Vec<PendingWrite>) -> FlushReport {
        if writes.is_empty() {
            return FlushReport::default();
        }
        self.run(writes.into_iter().map(|w| (w, 0)).collect()).await
    }

    /// Re-send writes whose backoff has elapsed by `now`.
    pub async fn retry_due(&self, now: Instant) -> FlushReport {
        let due = self.policy.due(now);
        if due.is_empty() {
            return FlushReport::default();
        }
        info!(count = due.len(), "Retrying failed writes");
        self.run(due).await
    }

    /// Sleep until the earliest scheduled retry, then run everything due.
    /// `None` when nothing is scheduled.
    pub async fn next_retry(&self) -> Option<FlushReport> {
        let at = self.policy.next_due()?;
        tokio::time::sleep_until(at.into()).await;
        Some(self.retry_due(Instant::now()).await)
    }

    async fn run(&self, batch: Vec<(PendingWrite, u32)>) -> FlushReport {
        let mut outcomes = Vec::with_capacity(batch.len());
        for (write, failed_before) in batch {
            let outcome = match self.apply(&write).await {
                Ok(created) => {
                    debug!(write = %write.describe(), "Write applied");
                    self.policy.on_success(&write);
                    match (created, write) {
                        (Some(task), PendingWrite::CreateTask { local_id, .. }) => {
                            WriteOutcome::Created { local_id, task }
                        }
                        (_, write) => WriteOutcome::Applied(write),
                    }
                }
                Err(error) => {
                    let failed = FailedWrite {
                        write,
                        error,
                        attempt: failed_before + 1,
                    };
                    let retry_scheduled = self.policy.on_failure(&failed, Instant::now());
                    WriteOutcome::Failed {
                        write: failed.write,
                        error: failed.error,
                        attempt: failed.attempt,
                        retry_scheduled,
                    }
                }
            };
            outcomes.push(outcome);
        }
        FlushReport { outcomes }
    }

    /// Issue one write. Creates return the stored record.
    async fn apply(&self, write: &PendingWrite) -> StoreResult<Option<Task>> {
        match write {
            PendingWrite::CreateTask { draft, .. } => {
                self.store.create_task(draft.clone()).await.map(Some)
            }
            PendingWrite::UpdateTaskPosition { id, patch } => self
                .store
                .update_task_position(id, patch.clone())
                .await
                .map(|_| None),
            PendingWrite::UpdateTask { id, patch } => {
                self.store.update_task(id, patch.clone()).await.map(|_| None)
            }
            PendingWrite::DeleteTask { id } => self.store.delete_task(id).await.map(|_| None),
            PendingWrite::UpdateProjectPosition {
                id,
                position_x,
                position_y,
            } => self
                .store
                .update_project_position(id, *position_x, *position_y)
                .await
                .map(|_| None),
        }
    }
}
