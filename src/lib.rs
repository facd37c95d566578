//! Teamboard: the interaction engine behind a sticky-note team board.
//!
//! Projects sit on a shared, pannable canvas; notes sit inside projects at
//! positions relative to the project origin. The engine turns raw pointer
//! events into panning, marquee selection, group drags and note creation,
//! applies every change locally first, and queues the store writes that
//! make it durable.
//!
//! ## Modules
//!
//! - `canvas` - Pannable surface and client-to-board coordinate mapping
//! - `note` - Per-note drag tracking and click/drag disambiguation
//! - `board` - Controller, model, selection, z-order and the write outbox
//! - `store` - Async persistence boundary, in-memory store, demo fallback
//! - `persist` - Outbox flushing and pluggable failure policies
//! - `session` - Controller plus persister for simple hosts
//! - `teams` - Team overview card layout
//! - `settings` / `settings_watcher` - JSON settings with hot reload

pub mod board;
pub mod canvas;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod note;
pub mod perf;
pub mod persist;
pub mod session;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod store;
pub mod teams;
pub mod types;
