//! Board controller: turns pointer events into pan, marquee, group drag and
//! note creation, and records the resulting store writes.
//!
//! The controller is synchronous. Each handler mutates local state right
//! away and pushes the matching [`PendingWrite`] onto the outbox, so a
//! gesture never waits on the network. Whoever owns the controller drains
//! the outbox with [`BoardController::take_outbox`], persists it, and feeds
//! the [`FlushReport`] back through [`BoardController::reconcile`].

use super::creation::{note_draft, target_project};
use super::model::BoardModel;
use super::outbox::{FlushReport, PendingWrite, WriteOutcome};
use super::selection::Selection;
use super::zorder::ZCounter;
use crate::canvas::{CanvasEvent, CanvasSurface, GridLines};
use crate::geometry::{Point, Rect};
use crate::input::{GestureKind, InteractionState, NoCapture, PointerCapture, PointerEvent};
use crate::note::{ClickFilter, NoteGesture, NoteIntent, NoteView};
use crate::settings::BoardSettings;
use crate::types::{
    local_task_id, Project, ProjectId, Task, TaskId, TaskPatch, TaskPositionPatch,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

/// Input the controller understands, for hosts that route events through
/// one entry point.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerLeave,
    Click(PointerEvent),
    DoubleClick(PointerEvent),
    DeleteSelected,
    EditTask { id: TaskId, patch: TaskPatch },
    CancelEdit,
    MoveProject { id: ProjectId, delta: Point },
    Resize(Rect),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DoubleClickOutcome {
    /// Landed on a note, which is now being edited
    Editing(TaskId),
    /// Landed on empty canvas and spawned a note
    Created(TaskId),
    /// Empty canvas, but there is no project to put a note in
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub color: String,
    /// Container footprint inside the canvas bounds, pan applied
    pub rect: Rect,
}

/// A full frame's worth of drawing data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardView {
    pub projects: Vec<ProjectView>,
    /// Back to front
    pub notes: Vec<NoteView>,
    pub marquee: Option<Rect>,
    pub pan_offset: Point,
    pub grid: GridLines,
}

pub struct BoardController {
    model: BoardModel,
    canvas: CanvasSurface,
    selection: Selection,
    state: InteractionState,
    z: ZCounter,
    clicks: ClickFilter,
    capture: Box<dyn PointerCapture + Send>,
    settings: BoardSettings,
    editing: Option<TaskId>,
    outbox: Vec<PendingWrite>,
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new(BoardSettings::default())
    }
}

impl BoardController {
    pub fn new(settings: BoardSettings) -> Self {
        Self {
            model: BoardModel::new(),
            canvas: CanvasSurface::default().with_grid_size(settings.grid_size),
            selection: Selection::new(),
            state: InteractionState::Idle,
            z: ZCounter::default(),
            clicks: ClickFilter::default(),
            capture: Box::new(NoCapture::default()),
            settings,
            editing: None,
            outbox: Vec::new(),
        }
    }

    /// Use the host's pointer-capture implementation for note drags.
    pub fn with_capture(mut self, capture: Box<dyn PointerCapture + Send>) -> Self {
        self.capture = capture;
        self
    }

    /// Replace the board contents. Clears selection and any active gesture,
    /// and seeds the z counter from the loaded notes. Queued writes survive.
    pub fn load(&mut self, projects: Vec<Project>, tasks: HashMap<ProjectId, Vec<Task>>) {
        self.cancel_gesture();
        self.model.load(projects, tasks);
        self.selection.clear();
        self.clicks.disarm();
        self.editing = None;
        self.z = ZCounter::seeded_from(self.model.iter_tasks().map(|(_, t)| t));
        info!(
            projects = self.model.projects().len(),
            tasks = self.model.task_count(),
            z = self.z.current(),
            "Board loaded"
        );
    }

    /// Replace settings. Takes effect from the next gesture.
    pub fn set_settings(&mut self, settings: BoardSettings) {
        self.canvas = self.canvas.clone().with_grid_size(settings.grid_size);
        self.settings = settings;
    }

    pub fn handle(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::PointerDown(e) => self.pointer_down(&e),
            BoardEvent::PointerMove(e) => self.pointer_move(&e),
            BoardEvent::PointerUp(e) => self.pointer_up(&e),
            BoardEvent::PointerLeave => self.pointer_leave(),
            BoardEvent::Click(e) => self.click(&e),
            BoardEvent::DoubleClick(e) => {
                self.double_click(&e);
            }
            BoardEvent::DeleteSelected => {
                self.delete_selected();
            }
            BoardEvent::EditTask { id, patch } => self.edit_task(&id, patch),
            BoardEvent::CancelEdit => self.cancel_edit(),
            BoardEvent::MoveProject { id, delta } => self.move_project(&id, delta),
            BoardEvent::Resize(bounds) => self.set_bounds(bounds),
        }
    }

    // ========================================================================
    // Pointer gestures
    // ========================================================================

    /// Pick the gesture from button, modifiers and what is under the pointer.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if !self.state.is_idle() {
            debug!("Pointer down during an active gesture, ignored");
            return;
        }

        let local = self.canvas.pointer_to_local(event.client);
        let hit = self.model.topmost_at(local);

        match event.gesture_kind(hit.is_some()) {
            GestureKind::Pan => {
                debug!(x = event.client.x, y = event.client.y, "Pan started");
                self.state.start_pan(event.client);
            }
            GestureKind::Marquee => {
                debug!(x = local.x, y = local.y, "Marquee started");
                self.state.start_marquee(local);
            }
            GestureKind::ItemDrag => {
                let Some(primary) = hit else { return };
                let Some(gesture) = NoteGesture::begin(
                    primary.clone(),
                    event,
                    self.settings.drag_threshold,
                    self.capture.as_mut(),
                ) else {
                    return;
                };
                let moving = self.moving_set(&primary);
                debug!(task_id = %primary, count = moving.len(), "Drag started");
                self.clicks.disarm();
                self.state = InteractionState::ItemDrag {
                    primary,
                    moving,
                    gesture,
                };
            }
            GestureKind::None => {}
        }
    }

    /// The whole selection if it contains `primary`, else just `primary`.
    fn moving_set(&self, primary: &TaskId) -> Vec<TaskId> {
        if !self.selection.contains(primary) {
            return vec![primary.clone()];
        }
        self.model
            .iter_tasks()
            .filter(|(_, t)| self.selection.contains(&t.id))
            .map(|(_, t)| t.id.clone())
            .collect()
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        crate::profile_scope!("pointer_move");

        match &mut self.state {
            InteractionState::ItemDrag {
                moving, gesture, ..
            } => {
                if let Some(NoteIntent::DragDelta { dx, dy, .. }) = gesture.pointer_move(event) {
                    trace!(dx, dy, count = moving.len(), "Drag delta");
                    self.model.translate_tasks(moving, Point::new(dx, dy));
                }
            }
            InteractionState::MarqueeSelect { current, .. } => {
                *current = self.canvas.pointer_to_local(event.client);
            }
            InteractionState::Pan { last_client } => {
                let delta = event.client - *last_client;
                *last_client = event.client;
                self.canvas.pan_by(delta);
                trace!(dx = delta.x, dy = delta.y, "Pan");
            }
            InteractionState::Idle => {}
        }
    }

    /// End the active gesture. A drag always commits, even with no movement.
    /// Releases of other pointers leave a drag running.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        if matches!(
            &self.state,
            InteractionState::ItemDrag { gesture, .. } if gesture.pointer_id() != event.pointer_id
        ) {
            trace!(pointer_id = ?event.pointer_id, "Ignoring release of another pointer");
            return;
        }
        match self.state.take() {
            InteractionState::ItemDrag {
                primary,
                moving,
                gesture,
            } => {
                if let NoteIntent::DragEnd { dragged: true, .. } =
                    gesture.finish(self.capture.as_mut())
                {
                    self.clicks.arm(primary);
                }
                self.commit_drag(moving);
            }
            InteractionState::MarqueeSelect { start, .. } => {
                let end = self.canvas.pointer_to_local(event.client);
                self.finish_marquee(Rect::from_corners(start, end));
            }
            InteractionState::Pan { .. } => {
                debug!(x = self.canvas.pan_offset().x, y = self.canvas.pan_offset().y, "Pan ended");
            }
            InteractionState::Idle => {}
        }
    }

    /// Leaving the canvas ends marquee and pan. A captured drag keeps going.
    pub fn pointer_leave(&mut self) {
        match self.state.take() {
            InteractionState::MarqueeSelect { start, current } => {
                self.finish_marquee(Rect::from_corners(start, current));
            }
            InteractionState::Pan { .. } => debug!("Pan ended by pointer leave"),
            drag @ InteractionState::ItemDrag { .. } => self.state = drag,
            InteractionState::Idle => {}
        }
    }

    fn commit_drag(&mut self, moving: Vec<TaskId>) {
        let z = self.z.bump();
        for id in &moving {
            let Some(task) = self.model.task_mut(id) else {
                continue;
            };
            task.z_index = Some(z);
            self.outbox.push(PendingWrite::UpdateTaskPosition {
                id: id.clone(),
                patch: TaskPositionPatch {
                    position_x: task.position_x,
                    position_y: task.position_y,
                    z_index: z,
                    width: None,
                    height: None,
                },
            });
        }
        self.model.reindex_tasks(&moving);
        info!(count = moving.len(), z, "Drag committed");
    }

    fn finish_marquee(&mut self, rect: Rect) {
        crate::profile_scope!("marquee_resolve");
        let hits = self.model.query_rect(&rect);
        debug!(count = hits.len(), "Marquee resolved");
        self.selection.replace(hits);
    }

    /// Drop whatever gesture is active without committing it.
    fn cancel_gesture(&mut self) {
        if let InteractionState::ItemDrag { gesture, .. } = self.state.take() {
            gesture.finish(self.capture.as_mut());
        }
    }

    // ========================================================================
    // Clicks
    // ========================================================================

    /// Click on a note: plain selects only it, shift/ctrl/cmd toggles it.
    /// The click that trails a real drag is swallowed.
    pub fn click(&mut self, event: &PointerEvent) {
        if event.modifiers.alt {
            return;
        }
        let local = self.canvas.pointer_to_local(event.client);
        let Some(id) = self.model.topmost_at(local) else {
            return;
        };
        let Some(NoteIntent::Click { id, modifiers }) = self.clicks.filter(id, event.modifiers)
        else {
            trace!("Click after drag suppressed");
            return;
        };
        if modifiers.toggles_selection() {
            self.selection.toggle(id);
        } else {
            self.selection.select_only(id);
        }
    }

    /// On a note, start editing it; on empty canvas, spawn a note.
    pub fn double_click(&mut self, event: &PointerEvent) -> DoubleClickOutcome {
        let local = self.canvas.pointer_to_local(event.client);
        if let Some(id) = self.model.topmost_at(local) {
            self.begin_edit(&id);
            return DoubleClickOutcome::Editing(id);
        }
        let CanvasEvent::DoubleCreate(point) = self.canvas.double_click(event);
        match self.create_note_at(point) {
            Some(id) => DoubleClickOutcome::Created(id),
            None => DoubleClickOutcome::Ignored,
        }
    }

    /// Insert a note at local `point` in the project under it (or the first
    /// project) and queue its creation.
    pub fn create_note_at(&mut self, point: Point) -> Option<TaskId> {
        let Some(project) =
            target_project(self.model.projects(), point, self.settings.project_footprint)
        else {
            debug!(x = point.x, y = point.y, "No project to create a note in");
            return None;
        };

        let mut draft = note_draft(project, point, &self.settings.note);
        draft.z_index = Some(self.z.bump());

        let id = local_task_id();
        let task = Task::from_draft(id.clone(), draft.clone());
        if !self.model.insert_task(task) {
            return None;
        }
        info!(task_id = %id, project_id = %draft.project_id, "Note created");
        self.outbox.push(PendingWrite::CreateTask {
            local_id: id.clone(),
            draft,
        });
        Some(id)
    }

    // ========================================================================
    // Editing and deletion
    // ========================================================================

    /// Remove every selected note locally and queue one delete per note.
    ///
    /// Not transactional: each delete succeeds or fails on its own, and the
    /// local removal stands either way.
    pub fn delete_selected(&mut self) -> Vec<TaskId> {
        let ids = self.selection.take();
        if ids.is_empty() {
            return ids;
        }
        if let Some(dragged) = self.state.dragged_item_id()
            && ids.contains(dragged)
        {
            self.cancel_gesture();
        }
        let mut removed = self.model.remove_tasks(&ids);
        removed.sort_by_key(|t| ids.iter().position(|id| *id == t.id));
        if self.editing.as_ref().is_some_and(|e| ids.contains(e)) {
            self.editing = None;
        }
        for task in removed {
            if task.is_local() {
                // Never stored: drop its queued writes. A create already in
                // flight is deleted when it lands.
                self.outbox.retain(|w| w.target_id() != task.id);
                continue;
            }
            self.outbox.push(PendingWrite::DeleteTask { id: task.id });
        }
        info!(count = ids.len(), "Selection deleted");
        ids
    }

    pub fn begin_edit(&mut self, id: &str) -> bool {
        if !self.model.contains_task(id) {
            return false;
        }
        debug!(task_id = %id, "Editing note");
        self.editing = Some(id.to_string());
        true
    }

    /// Apply a title/content/color edit and end editing of that note.
    pub fn edit_task(&mut self, id: &str, patch: TaskPatch) {
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        if patch.is_empty() {
            return;
        }
        let Some(task) = self.model.task_mut(id) else {
            warn!(task_id = %id, "Edit for unknown note");
            return;
        };
        patch.apply_to(task);
        self.outbox.push(PendingWrite::UpdateTask {
            id: id.to_string(),
            patch,
        });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Drag a project container. Its notes follow since they are relative.
    pub fn move_project(&mut self, id: &str, delta: Point) {
        let Some(origin) = self.model.move_project(id, delta) else {
            return;
        };
        self.outbox.push(PendingWrite::UpdateProjectPosition {
            id: id.to_string(),
            position_x: origin.x,
            position_y: origin.y,
        });
    }

    /// Add a project that was created through the store.
    pub fn insert_project(&mut self, project: Project) {
        self.model.insert_project(project);
    }

    /// Mirror a stored project update (rename, recolor, move).
    pub fn replace_project(&mut self, project: Project) {
        let ids: Vec<TaskId> = self.model.tasks_of(&project.id).iter().map(|t| t.id.clone()).collect();
        if let Some(slot) = self.model.project_mut(&project.id) {
            *slot = project;
        }
        self.model.reindex_tasks(&ids);
    }

    /// Forget a deleted project and its notes.
    pub fn remove_project(&mut self, id: &str) {
        let removed = self.model.remove_project(id);
        for task_id in &removed {
            self.selection.remove(task_id);
        }
        if self.editing.as_ref().is_some_and(|e| removed.contains(e)) {
            self.editing = None;
        }
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.canvas.set_bounds(bounds);
    }

    pub fn pan_offset(&self) -> Point {
        self.canvas.pan_offset()
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn take_outbox(&mut self) -> Vec<PendingWrite> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_writes(&self) -> &[PendingWrite] {
        &self.outbox
    }

    /// Fold store results back into local state.
    ///
    /// - A stored create takes over the local note's slot and selection
    ///   membership. Local edits made while the create was in flight win and
    ///   are re-queued against the stored id.
    /// - A create rejected for missing auth removes the optimistic note.
    /// - Every other failure leaves local state as the visible truth.
    pub fn reconcile(&mut self, report: &FlushReport) {
        for outcome in &report.outcomes {
            match outcome {
                WriteOutcome::Created { local_id, task } => self.adopt_created(local_id, task),
                WriteOutcome::Failed {
                    write: PendingWrite::CreateTask { local_id, .. },
                    error,
                    ..
                } if error.is_auth() => {
                    warn!(task_id = %local_id, "Create rejected, removing local note");
                    self.forget_task(local_id);
                }
                WriteOutcome::Failed { write, error, .. } => {
                    debug!(write = %write.describe(), %error, "Write failed, keeping local state");
                }
                WriteOutcome::Applied(_) => {}
            }
        }
    }

    fn adopt_created(&mut self, local_id: &str, stored: &Task) {
        let Some(local) = self.model.task(local_id).cloned() else {
            // Deleted before the create landed
            debug!(task_id = %stored.id, "Created note no longer on board, deleting");
            self.outbox.push(PendingWrite::DeleteTask {
                id: stored.id.clone(),
            });
            return;
        };

        let mut adopted = local.clone();
        adopted.id = stored.id.clone();
        adopted.created_at = stored.created_at;
        adopted.updated_at = stored.updated_at;

        if local.position() != stored.position() || local.z_index != stored.z_index {
            self.outbox.push(PendingWrite::UpdateTaskPosition {
                id: stored.id.clone(),
                patch: TaskPositionPatch {
                    position_x: local.position_x,
                    position_y: local.position_y,
                    z_index: local.z(),
                    width: None,
                    height: None,
                },
            });
        }
        let text = TaskPatch {
            title: (local.title != stored.title).then(|| local.title.clone()),
            content: (local.content != stored.content)
                .then(|| local.content.clone().unwrap_or_default()),
            color: (local.color != stored.color)
                .then(|| local.color_or_default().to_string()),
        };
        if !text.is_empty() {
            self.outbox.push(PendingWrite::UpdateTask {
                id: stored.id.clone(),
                patch: text,
            });
        }

        self.model.replace_task(local_id, adopted);
        self.selection.rename(local_id, &stored.id);
        if self.editing.as_deref() == Some(local_id) {
            self.editing = Some(stored.id.clone());
        }
        // Writes queued against the local id would miss the stored record
        for write in &mut self.outbox {
            retarget(write, local_id, &stored.id);
        }
        if let InteractionState::ItemDrag { primary, moving, .. } = &mut self.state {
            if primary == local_id {
                *primary = stored.id.clone();
            }
            for id in moving.iter_mut().filter(|id| *id == local_id) {
                *id = stored.id.clone();
            }
        }
        debug!(local_id = %local_id, task_id = %stored.id, "Local note adopted stored id");
    }

    fn forget_task(&mut self, id: &str) {
        self.model.remove_tasks(&[id.to_string()]);
        self.selection.remove(id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        self.outbox.retain(|w| w.target_id() != id);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn model(&self) -> &BoardModel {
        &self.model
    }

    pub fn projects(&self) -> &[Project] {
        self.model.projects()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.model.task(id)
    }

    /// Project origin plus task position, pan not applied
    pub fn absolute_rect(&self, id: &str) -> Option<Rect> {
        self.model.absolute_rect(id)
    }

    pub fn z_counter(&self) -> ZCounter {
        self.z
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Everything a renderer needs for one frame. Notes are ordered back to
    /// front: by z, then by board order.
    pub fn render(&self) -> BoardView {
        let footprint = self.settings.project_footprint;
        let projects = self
            .model
            .projects()
            .iter()
            .map(|p| ProjectView {
                id: p.id.clone(),
                name: p.name.clone(),
                color: p.color_or_default().to_string(),
                rect: self.canvas.rect_to_screen(Rect::new(p.origin(), footprint)),
            })
            .collect();

        let mut notes: Vec<(usize, NoteView)> = self
            .model
            .iter_tasks()
            .enumerate()
            .map(|(order, (project, task))| {
                let rect = Rect::new(project.origin() + task.position(), task.size());
                let view = NoteView {
                    id: task.id.clone(),
                    project_id: project.id.clone(),
                    rect: self.canvas.rect_to_screen(rect),
                    color: task.color_or_default().to_string(),
                    title: task.title.clone(),
                    content: task.content.clone().unwrap_or_default(),
                    selected: self.selection.contains(&task.id),
                    z_index: task.z(),
                };
                (order, view)
            })
            .collect();
        notes.sort_by_key(|(order, view)| (view.z_index, *order));

        BoardView {
            projects,
            notes: notes.into_iter().map(|(_, view)| view).collect(),
            marquee: self
                .state
                .marquee_rect()
                .map(|rect| self.canvas.rect_to_screen(rect)),
            pan_offset: self.canvas.pan_offset(),
            grid: self.canvas.grid_lines(),
        }
    }
}

fn retarget(write: &mut PendingWrite, from: &str, to: &str) {
    match write {
        PendingWrite::UpdateTaskPosition { id, .. }
        | PendingWrite::UpdateTask { id, .. }
        | PendingWrite::DeleteTask { id }
            if id == from =>
        {
            *id = to.to_string();
        }
        _ => {}
    }
}
