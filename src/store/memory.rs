//! In-process store.
//!
//! Behaves like the hosted backend the board was built against: writes need
//! a signed-in principal, ids are UUIDs, timestamps are unix seconds, team
//! filters must be UUIDs, and deletes cascade. Faults can be injected to
//! exercise failure handling.

use super::{BoardStore, StoreError, StoreResult};
use crate::constants::DEFAULT_PROJECT_COLOR;
use crate::types::{
    Project, ProjectDraft, ProjectPatch, Task, TaskDraft, TaskId, TaskPatch, TaskPositionPatch,
    Team, TeamDraft, TeamPatch,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    principal: Option<String>,
    teams: Vec<Team>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    /// Failures returned by the next calls, in order
    queued_faults: VecDeque<StoreError>,
    /// Writes targeting these tasks keep failing
    task_faults: HashMap<TaskId, StoreError>,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with records, e.g. fixtures or an imported board.
    pub fn with_data(teams: Vec<Team>, projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                teams,
                projects,
                tasks,
                ..Default::default()
            }),
        }
    }

    pub fn sign_in(&self, principal: impl Into<String>) {
        self.inner.lock().principal = Some(principal.into());
    }

    pub fn sign_out(&self) {
        self.inner.lock().principal = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.lock().principal.is_some()
    }

    /// Make the next call fail with `error`. Queued faults fire in order.
    pub fn fail_next(&self, error: StoreError) {
        self.inner.lock().queued_faults.push_back(error);
    }

    /// Make every write to task `id` fail with `error` until cleared.
    pub fn fail_task(&self, id: impl Into<TaskId>, error: StoreError) {
        self.inner.lock().task_faults.insert(id.into(), error);
    }

    pub fn clear_faults(&self) {
        let mut inner = self.inner.lock();
        inner.queued_faults.clear();
        inner.task_faults.clear();
    }

    /// Every call made so far, e.g. `"delete_task t1"`
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().calls.clone()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.inner.lock().teams.clone()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.inner.lock().projects.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.inner.lock().tasks.iter().find(|t| t.id == id).cloned()
    }
}

impl Inner {
    /// Log the call and pop a queued fault, if any.
    fn enter(&mut self, call: String) -> StoreResult<()> {
        self.calls.push(call);
        match self.queued_faults.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn ensure_auth(&self) -> StoreResult<()> {
        if self.principal.is_none() {
            return Err(StoreError::AuthRequired);
        }
        Ok(())
    }

    fn task_fault(&self, id: &str) -> StoreResult<()> {
        match self.task_faults.get(id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn write(&mut self, call: String) -> StoreResult<()> {
        self.enter(call)?;
        self.ensure_auth()
    }

    fn task_write(&mut self, call: String, id: &str) -> StoreResult<()> {
        self.write(call)?;
        self.task_fault(id)
    }

    fn task_mut(&mut self, id: &str) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("task {id}")))
    }

    fn project_mut(&mut self, id: &str) -> StoreResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("project {id}")))
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn validate_uuid(kind: &str, id: &str) -> StoreResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::Validation(format!("{kind} id is not a UUID: {id}")))
}

#[async_trait]
impl BoardStore for InMemoryStore {
    async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        let mut inner = self.inner.lock();
        inner.enter("list_teams".into())?;
        Ok(inner.teams.clone())
    }

    async fn create_team(&self, draft: TeamDraft) -> StoreResult<Team> {
        let mut inner = self.inner.lock();
        inner.write(format!("create_team {}", draft.name))?;
        let ts = now();
        let team = Team {
            id: new_id(),
            name: draft.name,
            description: draft.description,
            created_at: Some(ts),
            updated_at: Some(ts),
        };
        inner.teams.push(team.clone());
        Ok(team)
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> StoreResult<Team> {
        let mut inner = self.inner.lock();
        inner.write(format!("update_team {id}"))?;
        let team = inner
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("team {id}")))?;
        patch.apply_to(team);
        team.updated_at = Some(now());
        Ok(team.clone())
    }

    async fn delete_team(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.write(format!("delete_team {id}"))?;
        inner.teams.retain(|t| t.id != id);
        let doomed: Vec<String> = inner
            .projects
            .iter()
            .filter(|p| p.team_id.as_deref() == Some(id))
            .map(|p| p.id.clone())
            .collect();
        inner.projects.retain(|p| !doomed.contains(&p.id));
        inner.tasks.retain(|t| !doomed.contains(&t.project_id));
        Ok(())
    }

    async fn list_projects(&self, team_id: Option<&str>) -> StoreResult<Vec<Project>> {
        let mut inner = self.inner.lock();
        inner.enter(format!("list_projects {}", team_id.unwrap_or("*")))?;
        let Some(team_id) = team_id else {
            return Ok(inner.projects.clone());
        };
        validate_uuid("team", team_id)?;
        Ok(inner
            .projects
            .iter()
            .filter(|p| p.team_id.as_deref() == Some(team_id))
            .cloned()
            .collect())
    }

    async fn create_project(&self, draft: ProjectDraft) -> StoreResult<Project> {
        let mut inner = self.inner.lock();
        inner.write(format!("create_project {}", draft.name))?;
        let ts = now();
        let project = Project {
            id: new_id(),
            team_id: Some(draft.team_id),
            name: draft.name,
            description: draft.description,
            color: Some(draft.color.unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string())),
            position_x: Some(draft.position_x.unwrap_or(0.0)),
            position_y: Some(draft.position_y.unwrap_or(0.0)),
            created_at: Some(ts),
            updated_at: Some(ts),
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        let mut inner = self.inner.lock();
        inner.write(format!("update_project {id}"))?;
        let project = inner.project_mut(id)?;
        patch.apply_to(project);
        project.updated_at = Some(now());
        Ok(project.clone())
    }

    async fn update_project_position(&self, id: &str, x: f32, y: f32) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.write(format!("update_project_position {id}"))?;
        let project = inner.project_mut(id)?;
        project.position_x = Some(x);
        project.position_y = Some(y);
        project.updated_at = Some(now());
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.write(format!("delete_project {id}"))?;
        inner.projects.retain(|p| p.id != id);
        inner.tasks.retain(|t| t.project_id != id);
        Ok(())
    }

    async fn list_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        let mut inner = self.inner.lock();
        inner.enter(format!("list_tasks {project_id}"))?;
        Ok(inner
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, draft: TaskDraft) -> StoreResult<Task> {
        let mut inner = self.inner.lock();
        inner.write(format!("create_task {}", draft.project_id))?;
        if !inner.projects.iter().any(|p| p.id == draft.project_id) {
            return Err(StoreError::NotFound(format!("project {}", draft.project_id)));
        }
        let ts = now();
        let mut task = Task::from_draft(new_id(), draft);
        task.created_at = Some(ts);
        task.updated_at = Some(ts);
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task_position(&self, id: &str, patch: TaskPositionPatch) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.task_write(format!("update_task_position {id}"), id)?;
        let task = inner.task_mut(id)?;
        task.position_x = patch.position_x;
        task.position_y = patch.position_y;
        task.z_index = Some(patch.z_index);
        if let Some(width) = patch.width {
            task.width = Some(width);
        }
        if let Some(height) = patch.height {
            task.height = Some(height);
        }
        task.updated_at = Some(now());
        Ok(())
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        let mut inner = self.inner.lock();
        inner.task_write(format!("update_task {id}"), id)?;
        let task = inner.task_mut(id)?;
        patch.apply_to(task);
        task.updated_at = Some(now());
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.task_write(format!("delete_task {id}"), id)?;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(StoreError::NotFound(format!("task {id}")));
        }
        Ok(())
    }
}
