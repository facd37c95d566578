//! Persistence boundary.
//!
//! The board engine only ever talks to a [`BoardStore`]. Any backend that
//! can list, create, update and delete teams, projects and tasks fits.
//! Real implementation in this crate: [`InMemoryStore`]. Read degradation
//! for offline or demo use: [`FallbackStore`].

pub mod demo;
mod error;
mod fallback;
mod memory;

pub use error::{StoreError, StoreResult};
pub use fallback::FallbackStore;
pub use memory::InMemoryStore;

use crate::types::{
    Project, ProjectDraft, ProjectPatch, Task, TaskDraft, TaskPatch, TaskPositionPatch, Team,
    TeamDraft, TeamPatch,
};
use async_trait::async_trait;
use std::sync::Arc;

/// CRUD over teams, projects and tasks.
///
/// Every write requires a signed-in principal and fails with
/// [`StoreError::AuthRequired`] otherwise.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn list_teams(&self) -> StoreResult<Vec<Team>>;
    async fn create_team(&self, draft: TeamDraft) -> StoreResult<Team>;
    async fn update_team(&self, id: &str, patch: TeamPatch) -> StoreResult<Team>;
    async fn delete_team(&self, id: &str) -> StoreResult<()>;

    /// All projects, or those of one team. `team_id` must be a UUID.
    async fn list_projects(&self, team_id: Option<&str>) -> StoreResult<Vec<Project>>;
    async fn create_project(&self, draft: ProjectDraft) -> StoreResult<Project>;
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project>;
    async fn update_project_position(&self, id: &str, x: f32, y: f32) -> StoreResult<()>;
    async fn delete_project(&self, id: &str) -> StoreResult<()>;

    async fn list_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>>;
    /// Stores the draft and returns it with an assigned id and timestamps.
    async fn create_task(&self, draft: TaskDraft) -> StoreResult<Task>;
    async fn update_task_position(&self, id: &str, patch: TaskPositionPatch) -> StoreResult<()>;
    async fn update_task(&self, id: &str, patch: TaskPatch) -> StoreResult<Task>;
    async fn delete_task(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S: BoardStore + ?Sized> BoardStore for Arc<S> {
    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        (**self).list_teams().await
    }

    async fn create_team(&self, draft: TeamDraft) -> StoreResult<Team> {
        (**self).create_team(draft).await
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> StoreResult<Team> {
        (**self).update_team(id, patch).await
    }

    async fn delete_team(&self, id: &str) -> StoreResult<()> {
        (**self).delete_team(id).await
    }

    async fn list_projects(&self, team_id: Option<&str>) -> StoreResult<Vec<Project>> {
        (**self).list_projects(team_id).await
    }

    async fn create_project(&self, draft: ProjectDraft) -> StoreResult<Project> {
        (**self).create_project(draft).await
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        (**self).update_project(id, patch).await
    }

    async fn update_project_position(&self, id: &str, x: f32, y: f32) -> StoreResult<()> {
        (**self).update_project_position(id, x, y).await
    }

    async fn delete_project(&self, id: &str) -> StoreResult<()> {
        (**self).delete_project(id).await
    }

    async fn list_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        (**self).list_tasks(project_id).await
    }

    async fn create_task(&self, draft: TaskDraft) -> StoreResult<Task> {
        (**self).create_task(draft).await
    }

    async fn update_task_position(&self, id: &str, patch: TaskPositionPatch) -> StoreResult<()> {
        (**self).update_task_position(id, patch).await
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        (**self).update_task(id, patch).await
    }

    async fn delete_task(&self, id: &str) -> StoreResult<()> {
        (**self).delete_task(id).await
    }
}
