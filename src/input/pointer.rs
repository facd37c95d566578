//! Platform-neutral pointer events.

use crate::geometry::Point;

pub type PointerId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self { shift: true, ..Self::NONE }
    }

    pub fn alt() -> Self {
        Self { alt: true, ..Self::NONE }
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::NONE }
    }

    pub fn meta() -> Self {
        Self { meta: true, ..Self::NONE }
    }

    /// Shift, ctrl or cmd: click toggles selection membership
    pub fn toggles_selection(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// A pointer sample in client (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub client: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pointer_id: 1,
            client: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Which gesture a pointer-down starts, given whether it landed on a note.
    pub fn gesture_kind(&self, on_note: bool) -> GestureKind {
        let primary = self.button == PointerButton::Primary;
        if self.button == PointerButton::Middle || (primary && self.modifiers.alt) {
            GestureKind::Pan
        } else if !primary {
            GestureKind::None
        } else if on_note {
            if self.modifiers.shift {
                GestureKind::None
            } else {
                GestureKind::ItemDrag
            }
        } else if self.modifiers.shift {
            GestureKind::Marquee
        } else {
            GestureKind::None
        }
    }
}

/// Gesture selected at pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    None,
    ItemDrag,
    Marquee,
    Pan,
}
