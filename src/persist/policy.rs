//! What happens to a write the store rejected.

use crate::board::PendingWrite;
use crate::store::StoreError;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A write that just failed.
#[derive(Clone, Debug, PartialEq)]
pub struct FailedWrite {
    pub write: PendingWrite,
    pub error: StoreError,
    /// Failed tries so far, including this one
    pub attempt: u32,
}

/// Pluggable handling of failed writes.
///
/// The local board state is never rolled back by a policy; it only decides
/// whether the store gets asked again.
pub trait WriteFailurePolicy: Send + Sync {
    /// Returns true if the write was queued for another try.
    fn on_failure(&self, failed: &FailedWrite, now: Instant) -> bool;

    /// Called after a write went through.
    fn on_success(&self, _write: &PendingWrite) {}

    /// Writes whose next try is due, with their failed-try count.
    fn due(&self, _now: Instant) -> Vec<(PendingWrite, u32)> {
        Vec::new()
    }

    /// Writes waiting for a retry
    fn pending(&self) -> usize {
        0
    }

    /// Earliest scheduled retry, if any
    fn next_due(&self) -> Option<Instant> {
        None
    }
}

/// Log and forget. Local state stays the visible truth.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwallowFailures;

impl WriteFailurePolicy for SwallowFailures {
    fn on_failure(&self, failed: &FailedWrite, _now: Instant) -> bool {
        warn!(
            write = %failed.write.describe(),
            error = %failed.error,
            "Write failed, keeping local state"
        );
        false
    }
}

#[derive(Clone, Debug)]
struct Scheduled {
    write: PendingWrite,
    attempt: u32,
    at: Instant,
}

/// Retry transient failures with exponential backoff.
///
/// The n-th failure waits `base * 2^(n-1)`, capped at `max_delay`. After
/// `max_attempts` failures the write is dropped. Auth, not-found and
/// validation failures are never retried since another try cannot succeed.
#[derive(Debug)]
pub struct RetryWithBackoff {
    base: Duration,
    max_delay: Duration,
    max_attempts: u32,
    queue: Mutex<Vec<Scheduled>>,
}

impl RetryWithBackoff {
    pub fn new(base: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base,
            max_delay,
            max_attempts,
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Wait before the next try after `attempt` failures
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max_delay)
    }
}

/// Position writes carry absolute values, so a newer one for the same
/// target replaces an older queued one. A delete replaces anything.
fn supersedes(newer: &PendingWrite, older: &PendingWrite) -> bool {
    matches!(
        (newer, older),
        (PendingWrite::UpdateTaskPosition { .. }, PendingWrite::UpdateTaskPosition { .. })
            | (
                PendingWrite::UpdateProjectPosition { .. },
                PendingWrite::UpdateProjectPosition { .. }
            )
            | (PendingWrite::DeleteTask { .. }, _)
    ) && newer.target_id() == older.target_id()
}

/// Drop or trim queued writes that `newer` makes stale.
///
/// Text patches are partial: a newer patch clears only the fields it sets
/// from an older queued one, and the older one goes once nothing is left.
fn absorb(queue: &mut Vec<Scheduled>, newer: &PendingWrite) {
    queue.retain_mut(|s| {
        if supersedes(newer, &s.write) {
            return false;
        }
        match (newer, &mut s.write) {
            (
                PendingWrite::UpdateTask { id, patch: fresh },
                PendingWrite::UpdateTask { id: old_id, patch },
            ) if *id == *old_id => {
                patch.clear_fields_set_in(fresh);
                !patch.is_empty()
            }
            _ => true,
        }
    });
}

impl WriteFailurePolicy for RetryWithBackoff {
    fn on_failure(&self, failed: &FailedWrite, now: Instant) -> bool {
        let describe = failed.write.describe();
        if !failed.error.is_transient() {
            warn!(write = %describe, error = %failed.error, "Write rejected, not retrying");
            return false;
        }
        if failed.attempt >= self.max_attempts {
            warn!(write = %describe, attempts = failed.attempt, "Giving up on write");
            return false;
        }

        let delay = self.delay_for(failed.attempt);
        let mut queue = self.queue.lock();
        absorb(&mut queue, &failed.write);
        queue.push(Scheduled {
            write: failed.write.clone(),
            attempt: failed.attempt,
            at: now + delay,
        });
        debug!(
            write = %describe,
            attempt = failed.attempt,
            delay_ms = delay.as_millis() as u64,
            "Write scheduled for retry"
        );
        true
    }

    fn on_success(&self, write: &PendingWrite) {
        absorb(&mut self.queue.lock(), write);
    }

    fn due(&self, now: Instant) -> Vec<(PendingWrite, u32)> {
        let mut queue = self.queue.lock();
        let (ready, waiting): (Vec<Scheduled>, Vec<Scheduled>) =
            std::mem::take(&mut *queue).into_iter().partition(|s| s.at <= now);
        *queue = waiting;
        ready.into_iter().map(|s| (s.write, s.attempt)).collect()
    }

    fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    fn next_due(&self) -> Option<Instant> {
        self.queue.lock().iter().map(|s| s.at).min()
    }
}
