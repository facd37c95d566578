//! Note widget behavior: turning a pointer sequence on one note into drag
//! deltas, and telling drags apart from clicks.
//!
//! Deltas are incremental: each move reports the distance from the previous
//! sample, never from the gesture start, so the controller can apply them
//! directly to every moving note.

use crate::geometry::{Point, Rect};
use crate::input::{GestureKind, Modifiers, PointerCapture, PointerEvent, PointerId};
use crate::types::{ProjectId, TaskId};
use serde::Serialize;

/// What a note reports upward to the board controller.
#[derive(Clone, Debug, PartialEq)]
pub enum NoteIntent {
    DragDelta { id: TaskId, dx: f32, dy: f32 },
    DragEnd { id: TaskId, dragged: bool },
    Click { id: TaskId, modifiers: Modifiers },
    DoubleClick { id: TaskId },
}

/// Pointer tracking for a drag that started on a note.
#[derive(Clone, Debug)]
pub struct NoteGesture {
    task_id: TaskId,
    pointer_id: PointerId,
    start: Point,
    last: Point,
    travel: f32,
    threshold: f32,
}

impl NoteGesture {
    /// Start tracking if `event` is a plain primary press.
    ///
    /// Shift, alt and the middle button are reserved for marquee and pan, so
    /// those presses return `None` and the pointer is not captured.
    pub fn begin(
        task_id: TaskId,
        event: &PointerEvent,
        threshold: f32,
        capture: &mut dyn PointerCapture,
    ) -> Option<Self> {
        if event.gesture_kind(true) != GestureKind::ItemDrag {
            return None;
        }
        capture.begin_capture(event.pointer_id);
        Some(Self {
            task_id,
            pointer_id: event.pointer_id,
            start: event.client,
            last: event.client,
            travel: 0.0,
            threshold,
        })
    }

    /// Delta since the previous sample. Moves of other pointers and zero
    /// moves yield nothing.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Option<NoteIntent> {
        if event.pointer_id != self.pointer_id {
            return None;
        }
        let delta = event.client - self.last;
        self.last = event.client;
        if delta == Point::ZERO {
            return None;
        }
        self.travel += delta.manhattan();
        Some(NoteIntent::DragDelta {
            id: self.task_id.clone(),
            dx: delta.x,
            dy: delta.y,
        })
    }

    /// End the gesture and release the pointer.
    pub fn finish(self, capture: &mut dyn PointerCapture) -> NoteIntent {
        capture.end_capture(self.pointer_id);
        let dragged = self.has_dragged();
        NoteIntent::DragEnd {
            id: self.task_id,
            dragged,
        }
    }

    /// True once cumulative travel exceeds the click threshold
    pub fn has_dragged(&self) -> bool {
        self.travel > self.threshold
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Net movement since the gesture started
    pub fn offset(&self) -> Point {
        self.last - self.start
    }
}

/// Swallows the click that browsers and most toolkits emit after a drag.
#[derive(Debug, Default)]
pub struct ClickFilter {
    suppressed: Option<TaskId>,
}

impl ClickFilter {
    pub fn arm(&mut self, id: TaskId) {
        self.suppressed = Some(id);
    }

    pub fn disarm(&mut self) {
        self.suppressed = None;
    }

    /// The click intent to act on, or `None` if it trails a drag of `id`.
    pub fn filter(&mut self, id: TaskId, modifiers: Modifiers) -> Option<NoteIntent> {
        if self.suppressed.take().is_some_and(|s| s == id) {
            return None;
        }
        Some(NoteIntent::Click { id, modifiers })
    }
}

/// Everything a renderer needs to draw one note.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoteView {
    pub id: TaskId,
    pub project_id: ProjectId,
    /// Position inside the canvas bounds, pan applied
    pub rect: Rect,
    pub color: String,
    pub title: String,
    pub content: String,
    pub selected: bool,
    pub z_index: i64,
}
