//! Pointer input primitives for the board.
//!
//! ## Architecture
//!
//! The board uses an explicit state machine (`InteractionState`) to track the
//! current gesture. The mode is decided once, at pointer-down, from the button
//! and modifier keys; later events only feed the active mode.
//!
//! ## Modules
//!
//! - `pointer` - Platform-neutral pointer events, buttons and modifiers
//! - `capture` - Pointer-capture capability used by note drags
//! - `coords` - Client / local / screen coordinate conversion
//! - `state` - Interaction state machine enum and helpers

pub mod capture;
pub mod coords;
mod pointer;
mod state;

pub use capture::{NoCapture, PointerCapture};
pub use pointer::{GestureKind, Modifiers, PointerButton, PointerEvent, PointerId};
pub use state::InteractionState;
