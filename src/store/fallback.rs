//! Read degradation to the demo dataset.

use super::{demo, BoardStore, StoreResult};
use crate::types::{
    Project, ProjectDraft, ProjectPatch, Task, TaskDraft, TaskPatch, TaskPositionPatch, Team,
    TeamDraft, TeamPatch,
};
use async_trait::async_trait;
use tracing::warn;

/// Wraps a store so that reads failing with a transient error return the
/// built-in demo data instead. Writes pass through unchanged.
pub struct FallbackStore<S> {
    inner: S,
}

impl<S: BoardStore> FallbackStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

fn degrade<T>(result: StoreResult<T>, what: &str, demo: impl FnOnce() -> T) -> StoreResult<T> {
    match result {
        Err(e) if e.is_transient() => {
            warn!(%e, "Reading {} failed, serving demo data", what);
            Ok(demo())
        }
        other => other,
    }
}

#[async_trait]
impl<S: BoardStore> BoardStore for FallbackStore<S> {
    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        degrade(self.inner.list_teams().await, "teams", demo::teams)
    }

    async fn create_team(&self, draft: TeamDraft) -> StoreResult<Team> {
        self.inner.create_team(draft).await
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> StoreResult<Team> {
        self.inner.update_team(id, patch).await
    }

    async fn delete_team(&self, id: &str) -> StoreResult<()> {
        self.inner.delete_team(id).await
    }

    async fn list_projects(&self, team_id: Option<&str>) -> StoreResult<Vec<Project>> {
        degrade(self.inner.list_projects(team_id).await, "projects", || {
            demo::projects(team_id)
        })
    }

    async fn create_project(&self, draft: ProjectDraft) -> StoreResult<Project> {
        self.inner.create_project(draft).await
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        self.inner.update_project(id, patch).await
    }

    async fn update_project_position(&self, id: &str, x: f32, y: f32) -> StoreResult<()> {
        self.inner.update_project_position(id, x, y).await
    }

    async fn delete_project(&self, id: &str) -> StoreResult<()> {
        self.inner.delete_project(id).await
    }

    async fn list_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        degrade(self.inner.list_tasks(project_id).await, "tasks", || {
            demo::tasks(project_id)
        })
    }

    async fn create_task(&self, draft: TaskDraft) -> StoreResult<Task> {
        self.inner.create_task(draft).await
    }

    async fn update_task_position(&self, id: &str, patch: TaskPositionPatch) -> StoreResult<()> {
        self.inner.update_task_position(id, patch).await
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        self.inner.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &str) -> StoreResult<()> {
        self.inner.delete_task(id).await
    }
}
