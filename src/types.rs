//! Core records for the board: teams, projects and tasks (notes).
//!
//! These are plain data consumed and mutated by the board engine. Field names
//! match the persisted column names, so they serialize as-is.

use crate::constants::{
    DEFAULT_NOTE_COLOR, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_TITLE, DEFAULT_NOTE_WIDTH,
    DEFAULT_PROJECT_COLOR, LOCAL_ID_PREFIX,
};
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

pub type TeamId = String;
pub type ProjectId = String;
pub type TaskId = String;

/// Root of the ownership hierarchy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<u64>,
}

/// A project container, anchored on the shared board space at its origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub team_id: Option<TeamId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position_x: Option<f32>,
    #[serde(default)]
    pub position_y: Option<f32>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<u64>,
}

impl Project {
    /// Canvas origin of the container. Missing coordinates count as zero.
    pub fn origin(&self) -> Point {
        Point::new(self.position_x.unwrap_or(0.0), self.position_y.unwrap_or(0.0))
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_PROJECT_COLOR)
    }
}

/// A sticky note. Its position is relative to the owning project's origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub position_x: f32,
    pub position_y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub z_index: Option<i64>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<u64>,
}

impl Task {
    /// Position relative to the project origin
    pub fn position(&self) -> Point {
        Point::new(self.position_x, self.position_y)
    }

    /// Size with the 200x150 default applied
    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_NOTE_WIDTH),
            self.height.unwrap_or(DEFAULT_NOTE_HEIGHT),
        )
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_NOTE_COLOR)
    }

    pub fn z(&self) -> i64 {
        self.z_index.unwrap_or(0)
    }

    /// True for optimistic records the store has not assigned an id to yet
    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }

    /// Record for `draft` stored under `id`, timestamps unset
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            title: draft.title,
            content: draft.content,
            position_x: draft.position_x,
            position_y: draft.position_y,
            width: draft.width,
            height: draft.height,
            color: draft.color,
            z_index: draft.z_index,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Fresh id for a note that has not been persisted yet
pub fn local_task_id() -> TaskId {
    format!("{}{}", LOCAL_ID_PREFIX, uuid::Uuid::new_v4())
}

// ============================================================================
// Drafts
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position_x: Option<f32>,
    #[serde(default)]
    pub position_y: Option<f32>,
}

impl ProjectDraft {
    pub fn new(team_id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            name: name.into(),
            description: None,
            color: None,
            position_x: None,
            position_y: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position_x = Some(x);
        self.position_y = Some(y);
        self
    }
}

/// A task without id and timestamps; the store assigns those.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub position_x: f32,
    pub position_y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub z_index: Option<i64>,
}

impl TaskDraft {
    /// A default-styled note at `position`, relative to its project's origin
    pub fn note(project_id: impl Into<ProjectId>, position: Point) -> Self {
        Self {
            project_id: project_id.into(),
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: Some(String::new()),
            position_x: position.x,
            position_y: position.y,
            width: Some(DEFAULT_NOTE_WIDTH),
            height: Some(DEFAULT_NOTE_HEIGHT),
            color: Some(DEFAULT_NOTE_COLOR.to_string()),
            z_index: None,
        }
    }
}

// ============================================================================
// Patches
// ============================================================================

/// Geometry written back when a drag is committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskPositionPatch {
    pub position_x: f32,
    pub position_y: f32,
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Direct edit of a note's text and color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.color.is_none()
    }

    /// Forget every field `newer` also sets.
    pub fn clear_fields_set_in(&mut self, newer: &TaskPatch) {
        if newer.title.is_some() {
            self.title = None;
        }
        if newer.content.is_some() {
            self.content = None;
        }
        if newer.color.is_some() {
            self.color = None;
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(content) = &self.content {
            task.content = Some(content.clone());
        }
        if let Some(color) = &self.color {
            task.color = Some(color.clone());
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f32>,
}

impl ProjectPatch {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(team_id) = &self.team_id {
            project.team_id = Some(team_id.clone());
        }
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = Some(description.clone());
        }
        if let Some(color) = &self.color {
            project.color = Some(color.clone());
        }
        if let Some(x) = self.position_x {
            project.position_x = Some(x);
        }
        if let Some(y) = self.position_y {
            project.position_y = Some(y);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TeamPatch {
    pub fn apply_to(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(description) = &self.description {
            team.description = Some(description.clone());
        }
    }
}
