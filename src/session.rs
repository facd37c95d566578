//! A controller and a persister wired together.
//!
//! Hosts that want gestures to overlap with in-flight writes keep the two
//! apart: drain the outbox, flush on a clone of the persister, and reconcile
//! when the report arrives. Everyone else can use [`BoardSession`], which
//! flushes right after each event.

use crate::board::{BoardController, BoardEvent, FlushReport};
use crate::persist::Persister;
use crate::settings::BoardSettings;
use crate::store::{BoardStore, StoreResult};
use crate::teams::{TeamCard, layout_team_cards};
use crate::types::{Project, ProjectDraft, ProjectPatch, Task, Team, TeamDraft, TeamPatch};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct BoardSession<S> {
    controller: BoardController,
    persister: Persister<S>,
}

impl<S: BoardStore> BoardSession<S> {
    /// Session using the failure policy the settings describe.
    pub fn new(store: Arc<S>, settings: BoardSettings) -> Self {
        let persister = Persister::with_policy(store, settings.failure_policy());
        Self::with_parts(BoardController::new(settings), persister)
    }

    pub fn with_parts(controller: BoardController, persister: Persister<S>) -> Self {
        Self {
            controller,
            persister,
        }
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut BoardController {
        &mut self.controller
    }

    pub fn persister(&self) -> &Persister<S> {
        &self.persister
    }

    pub fn store(&self) -> &Arc<S> {
        self.persister.store()
    }

    /// Fetch the projects of `team_id` (or all) and their notes, then load
    /// them into the controller.
    ///
    /// Not-found and validation errors read as empty lists; anything else
    /// is returned and the board is left as it was.
    pub async fn load(&mut self, team_id: Option<&str>) -> StoreResult<()> {
        let store = self.persister.store();
        let projects = or_empty(store.list_projects(team_id).await)?;

        let mut tasks: HashMap<String, Vec<Task>> = HashMap::with_capacity(projects.len());
        for project in &projects {
            let list = or_empty(store.list_tasks(&project.id).await)?;
            tasks.insert(project.id.clone(), list);
        }

        info!(team_id = team_id.unwrap_or("*"), projects = projects.len(), "Loading board");
        self.controller.load(projects, tasks);
        Ok(())
    }

    /// Apply one event and persist whatever it queued.
    pub async fn dispatch(&mut self, event: BoardEvent) -> FlushReport {
        self.controller.handle(event);
        self.flush().await
    }

    /// Persist queued writes and reconcile the outcome.
    pub async fn flush(&mut self) -> FlushReport {
        let writes = self.controller.take_outbox();
        let report = self.persister.flush(writes).await;
        self.controller.reconcile(&report);
        report
    }

    /// Re-send writes whose backoff elapsed, then reconcile.
    pub async fn retry_due(&mut self, now: Instant) -> FlushReport {
        let report = self.persister.retry_due(now).await;
        self.settle(report).await
    }

    /// Wait for the next scheduled retry and reconcile its outcome. `None`
    /// when no retry is pending.
    pub async fn next_retry(&mut self) -> Option<FlushReport> {
        let report = self.persister.next_retry().await?;
        Some(self.settle(report).await)
    }

    async fn settle(&mut self, mut report: FlushReport) -> FlushReport {
        self.controller.reconcile(&report);
        // Reconciling a late create can queue follow-up writes
        if !self.controller.pending_writes().is_empty() {
            report.merge(self.flush().await);
        }
        report
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Store a project and place it on the board. Errors are returned for
    /// the caller to surface.
    pub async fn create_project(&mut self, draft: ProjectDraft) -> StoreResult<Project> {
        let project = self.store().create_project(draft).await?;
        self.controller.insert_project(project.clone());
        Ok(project)
    }

    pub async fn update_project(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        let project = self.store().update_project(id, patch).await?;
        self.controller.replace_project(project.clone());
        Ok(project)
    }

    pub async fn delete_project(&mut self, id: &str) -> StoreResult<()> {
        self.store().delete_project(id).await?;
        self.controller.remove_project(id);
        Ok(())
    }

    // ========================================================================
    // Teams
    // ========================================================================

    pub async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        self.store().list_teams().await
    }

    /// Team overview cards, each with that team's projects.
    ///
    /// A team whose projects read as empty (not found, bad id) still gets
    /// its card. Other read errors are returned.
    pub async fn team_overview(&self) -> StoreResult<Vec<TeamCard>> {
        let store = self.store();
        let teams = or_empty(store.list_teams().await)?;
        let mut projects = HashMap::with_capacity(teams.len());
        for team in &teams {
            let list = or_empty(store.list_projects(Some(&team.id)).await)?;
            projects.insert(team.id.clone(), list);
        }
        info!(teams = teams.len(), "Team overview loaded");
        Ok(layout_team_cards(&teams, &projects))
    }

    pub async fn create_team(&self, draft: TeamDraft) -> StoreResult<Team> {
        self.store().create_team(draft).await
    }

    pub async fn update_team(&self, id: &str, patch: TeamPatch) -> StoreResult<Team> {
        self.store().update_team(id, patch).await
    }

    pub async fn delete_team(&self, id: &str) -> StoreResult<()> {
        self.store().delete_team(id).await
    }
}

fn or_empty<T>(result: StoreResult<Vec<T>>) -> StoreResult<Vec<T>> {
    match result {
        Err(e) if e.is_empty_result() => {
            warn!(%e, "Read yielded nothing");
            Ok(Vec::new())
        }
        other => other,
    }
}
