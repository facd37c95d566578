//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder for controllers (and matching stores) with projects and notes
//! - Pointer helpers like `at()`, `shift_at()`, `drag()` and `marquee()`
//! - Common fixtures and assertion helpers

#![allow(dead_code)]

use teamboard::board::{BoardController, PendingWrite};
use teamboard::geometry::{Point, Rect, Size};
use teamboard::input::{Modifiers, PointerButton, PointerEvent};
use teamboard::settings::BoardSettings;
use teamboard::store::InMemoryStore;
use teamboard::types::{Project, Task, TaskDraft, Team};
use std::collections::HashMap;

/// A valid team id for filtered store reads
pub const TEAM_ID: &str = "5f8d0d55-2b1c-4a5e-9f57-6d1f0c3a9b21";

/// Another team, for checking filters
pub const OTHER_TEAM_ID: &str = "0b6e3c6a-8f3e-4d0e-a7a4-2f4a54b1c9d0";

// ============================================================================
// TestBoardBuilder - Builder pattern for creating test boards
// ============================================================================

/// Builder for controllers preloaded with projects and notes.
///
/// # Example
/// ```ignore
/// let board = TestBoardBuilder::new()
///     .with_project("a", (100.0, 100.0))
///     .with_note("t1", "a", (0.0, 0.0))
///     .with_bounds(40.0, 60.0, 1200.0, 800.0)
///     .build();
/// ```
pub struct TestBoardBuilder {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    bounds: Rect,
    settings: BoardSettings,
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoardBuilder {
    /// Empty board whose canvas sits at the window origin.
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            tasks: Vec::new(),
            bounds: Rect::from_xywh(0.0, 0.0, 1600.0, 1200.0),
            settings: BoardSettings::default(),
        }
    }

    /// Add a project of `TEAM_ID` with its origin at `origin`.
    pub fn with_project(mut self, id: &str, origin: (f32, f32)) -> Self {
        self.projects.push(project(id, origin.0, origin.1));
        self
    }

    /// Add a default-sized note at `pos`, relative to its project.
    pub fn with_note(mut self, id: &str, project_id: &str, pos: (f32, f32)) -> Self {
        self.tasks.push(note(id, project_id, pos.0, pos.1));
        self
    }

    pub fn with_sized_note(
        mut self,
        id: &str,
        project_id: &str,
        pos: (f32, f32),
        size: (f32, f32),
    ) -> Self {
        let mut task = note(id, project_id, pos.0, pos.1);
        task.width = Some(size.0);
        task.height = Some(size.1);
        self.tasks.push(task);
        self
    }

    pub fn with_note_z(mut self, id: &str, project_id: &str, pos: (f32, f32), z: i64) -> Self {
        let mut task = note(id, project_id, pos.0, pos.1);
        task.z_index = Some(z);
        self.tasks.push(task);
        self
    }

    /// Place the canvas inside the window.
    pub fn with_bounds(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounds = Rect::from_xywh(x, y, width, height);
        self
    }

    pub fn with_settings(mut self, settings: BoardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the controller with everything loaded.
    pub fn build(self) -> BoardController {
        let mut controller = BoardController::new(self.settings);
        controller.set_bounds(self.bounds);

        let mut tasks: HashMap<String, Vec<Task>> = HashMap::new();
        for task in self.tasks {
            tasks.entry(task.project_id.clone()).or_default().push(task);
        }
        controller.load(self.projects, tasks);
        controller
    }

    /// A signed-in store holding the same records, plus the team.
    pub fn build_store(self) -> InMemoryStore {
        let store = InMemoryStore::with_data(vec![team(TEAM_ID, "Core")], self.projects, self.tasks);
        store.sign_in("tester");
        store
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn team(id: &str, name: &str) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn project(id: &str, x: f32, y: f32) -> Project {
    Project {
        id: id.to_string(),
        team_id: Some(TEAM_ID.to_string()),
        name: format!("Project {id}"),
        description: None,
        color: None,
        position_x: Some(x),
        position_y: Some(y),
        created_at: None,
        updated_at: None,
    }
}

pub fn note(id: &str, project_id: &str, x: f32, y: f32) -> Task {
    let mut task = Task::from_draft(id.to_string(), TaskDraft::note(project_id, Point::new(x, y)));
    task.title = format!("Note {id}");
    task
}

// ============================================================================
// Pointer helpers
// ============================================================================

/// Plain primary-button event at client `(x, y)`.
pub fn at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(x, y)
}

pub fn shift_at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(x, y).with_modifiers(Modifiers::shift())
}

pub fn ctrl_at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(x, y).with_modifiers(Modifiers::ctrl())
}

pub fn alt_at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(x, y).with_modifiers(Modifiers::alt())
}

pub fn middle_at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::new(x, y).with_button(PointerButton::Middle)
}

/// Press at `from`, move through `path`, release at the last point.
pub fn drag_path(board: &mut BoardController, from: (f32, f32), path: &[(f32, f32)]) {
    board.pointer_down(&at(from.0, from.1));
    for &(x, y) in path {
        board.pointer_move(&at(x, y));
    }
    let end = path.last().copied().unwrap_or(from);
    board.pointer_up(&at(end.0, end.1));
}

/// Press, one move, release.
pub fn drag(board: &mut BoardController, from: (f32, f32), to: (f32, f32)) {
    drag_path(board, from, &[to]);
}

/// Shift-drag a marquee from `from` to `to` and release.
pub fn marquee(board: &mut BoardController, from: (f32, f32), to: (f32, f32)) {
    board.pointer_down(&shift_at(from.0, from.1));
    board.pointer_move(&shift_at(to.0, to.1));
    board.pointer_up(&shift_at(to.0, to.1));
}

/// Middle-button drag from `from` to `to`.
pub fn pan(board: &mut BoardController, from: (f32, f32), to: (f32, f32)) {
    board.pointer_down(&middle_at(from.0, from.1));
    board.pointer_move(&middle_at(to.0, to.1));
    board.pointer_up(&middle_at(to.0, to.1));
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Relative position of a note.
pub fn position_of(board: &BoardController, id: &str) -> Point {
    board
        .task(id)
        .map(Task::position)
        .unwrap_or_else(|| panic!("note {id} not on board"))
}

pub fn z_of(board: &BoardController, id: &str) -> i64 {
    board
        .task(id)
        .map(Task::z)
        .unwrap_or_else(|| panic!("note {id} not on board"))
}

pub fn selected(board: &BoardController) -> Vec<String> {
    let mut ids = board.selection().ids().to_vec();
    ids.sort();
    ids
}

/// One line per queued write, ids of local notes masked.
pub fn outbox_summary(writes: &[PendingWrite]) -> Vec<String> {
    writes
        .iter()
        .map(|w| match w {
            PendingWrite::CreateTask { draft, .. } => format!(
                "create_task in {} at ({}, {}) z={:?}",
                draft.project_id, draft.position_x, draft.position_y, draft.z_index
            ),
            other => other.describe(),
        })
        .collect()
}

pub fn default_note_size() -> Size {
    Size::new(200.0, 150.0)
}
