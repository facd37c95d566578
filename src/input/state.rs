//! Interaction state machine - one explicit mode instead of scattered flags.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> ItemDrag        (primary down on a note, no shift/alt)
//! Idle -> MarqueeSelect   (shift + primary down on empty canvas)
//! Idle -> Pan             (middle down, or alt + primary down)
//!
//! ItemDrag -> Idle        (pointer up - commits positions)
//! MarqueeSelect -> Idle   (pointer up or leave - replaces selection)
//! Pan -> Idle             (pointer up or leave)
//! ```

use crate::geometry::{Point, Rect};
use crate::note::NoteGesture;
use crate::types::TaskId;

#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,

    /// Dragging one note, or the whole selection it belongs to
    ItemDrag {
        /// Note under the pointer at pointer-down
        primary: TaskId,
        /// Every note moved by this gesture, in board order
        moving: Vec<TaskId>,
        /// Pointer tracking for the primary note
        gesture: NoteGesture,
    },

    /// Rubber-band selection, both corners in local coordinates
    MarqueeSelect { start: Point, current: Point },

    /// Viewport translation
    Pan {
        /// Last client position for delta calculation
        last_client: Point,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_item_drag(&self) -> bool {
        matches!(self, Self::ItemDrag { .. })
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelect { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Pan { .. })
    }

    /// Note under the pointer for an item drag
    pub fn dragged_item_id(&self) -> Option<&TaskId> {
        match self {
            Self::ItemDrag { primary, .. } => Some(primary),
            _ => None,
        }
    }

    /// Notes moved by the active drag
    pub fn moving_ids(&self) -> &[TaskId] {
        match self {
            Self::ItemDrag { moving, .. } => moving,
            _ => &[],
        }
    }

    /// Normalized marquee box, if selecting
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelect { start, current } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }

    pub fn start_marquee(&mut self, start: Point) {
        *self = Self::MarqueeSelect {
            start,
            current: start,
        };
    }

    pub fn set_marquee_current(&mut self, current: Point) {
        if let Self::MarqueeSelect { current: c, .. } = self {
            *c = current;
        }
    }

    pub fn start_pan(&mut self, client: Point) {
        *self = Self::Pan {
            last_client: client,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Hand back the previous state, leaving `Idle` behind
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
