//! The board engine.
//!
//! ## Modules
//!
//! - `model` - Cached projects and notes with absolute-position composition
//! - `selection` - Ephemeral selection set
//! - `zorder` - Stacking counter bumped once per commit
//! - `creation` - Target-project hit test for double-click creation
//! - `outbox` - Writes queued by optimistic mutations and their outcomes
//! - `controller` - Gesture dispatch and the public board API

pub mod controller;
pub mod creation;
pub mod model;
pub mod outbox;
pub mod selection;
pub mod zorder;

pub use controller::{BoardController, BoardEvent, BoardView, DoubleClickOutcome, ProjectView};
pub use model::BoardModel;
pub use outbox::{FlushReport, PendingWrite, WriteOutcome};
pub use selection::Selection;
pub use zorder::ZCounter;
