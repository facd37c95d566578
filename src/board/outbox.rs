//! Writes produced by optimistic mutations, and what became of them.
//!
//! The controller applies every change to its own state first and then
//! queues the matching store call here. A persister drains the queue
//! whenever it likes; the controller never waits on it.

use crate::store::StoreError;
use crate::types::{ProjectId, Task, TaskDraft, TaskId, TaskPatch, TaskPositionPatch};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PendingWrite {
    CreateTask {
        local_id: TaskId,
        draft: TaskDraft,
    },
    UpdateTaskPosition {
        id: TaskId,
        patch: TaskPositionPatch,
    },
    UpdateTask {
        id: TaskId,
        patch: TaskPatch,
    },
    DeleteTask {
        id: TaskId,
    },
    UpdateProjectPosition {
        id: ProjectId,
        position_x: f32,
        position_y: f32,
    },
}

impl PendingWrite {
    pub fn op(&self) -> &'static str {
        match self {
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTaskPosition { .. } => "update_task_position",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::UpdateProjectPosition { .. } => "update_project_position",
        }
    }

    /// Task or project the write is about
    pub fn target_id(&self) -> &str {
        match self {
            Self::CreateTask { local_id, .. } => local_id,
            Self::UpdateTaskPosition { id, .. }
            | Self::UpdateTask { id, .. }
            | Self::DeleteTask { id }
            | Self::UpdateProjectPosition { id, .. } => id,
        }
    }

    /// Short human-readable form for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateTask { draft, .. } => format!("create_task in {}", draft.project_id),
            Self::UpdateTaskPosition { id, patch } => format!(
                "update_task_position {} ({}, {}) z={}",
                id, patch.position_x, patch.position_y, patch.z_index
            ),
            Self::UpdateProjectPosition {
                id,
                position_x,
                position_y,
            } => format!("update_project_position {} ({}, {})", id, position_x, position_y),
            other => format!("{} {}", other.op(), other.target_id()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WriteOutcome {
    Applied(PendingWrite),
    /// A create went through; `task` is the stored record with its real id
    Created { local_id: TaskId, task: Task },
    Failed {
        write: PendingWrite,
        error: StoreError,
        /// Failed tries so far, including this one
        attempt: u32,
        /// Whether the failure policy queued it for another try
        retry_scheduled: bool,
    },
}

impl WriteOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of one flush, in the order the writes were issued.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlushReport {
    pub outcomes: Vec<WriteOutcome>,
}

impl FlushReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.outcomes.iter().any(WriteOutcome::is_failure)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PendingWrite, &StoreError)> {
        self.outcomes.iter().filter_map(|o| match o {
            WriteOutcome::Failed { write, error, .. } => Some((write, error)),
            _ => None,
        })
    }

    /// `(local id, stored id)` for every successful create
    pub fn created_ids(&self) -> Vec<(TaskId, TaskId)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                WriteOutcome::Created { local_id, task } => Some((local_id.clone(), task.id.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn merge(&mut self, other: FlushReport) {
        self.outcomes.extend(other.outcomes);
    }
}
