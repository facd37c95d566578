//! Board-wide constants.
//!
//! Centralizes magic numbers and defaults so the controller, the note widget
//! and the settings layer agree on them.

// ============================================================================
// Note Defaults
// ============================================================================

/// Default note width in canvas units
pub const DEFAULT_NOTE_WIDTH: f32 = 200.0;

/// Default note height in canvas units
pub const DEFAULT_NOTE_HEIGHT: f32 = 150.0;

/// Default note color (amber)
pub const DEFAULT_NOTE_COLOR: &str = "#fef3c7";

/// Title given to notes spawned by double-click
pub const DEFAULT_NOTE_TITLE: &str = "Note";

// ============================================================================
// Project Containers
// ============================================================================

/// Width of a project container on the board
pub const PROJECT_FOOTPRINT_WIDTH: f32 = 600.0;

/// Height of a project container on the board
pub const PROJECT_FOOTPRINT_HEIGHT: f32 = 400.0;

/// Accent color for projects created without one
pub const DEFAULT_PROJECT_COLOR: &str = "#6366f1";

// ============================================================================
// Interaction
// ============================================================================

/// Cumulative pointer travel (|dx| + |dy|) after which a gesture counts as a drag
pub const DRAG_THRESHOLD: f32 = 2.0;

/// Spacing of the background grid
pub const GRID_SIZE: f32 = 40.0;

/// Finest grid the surface will draw
pub const MIN_GRID_SIZE: f32 = 8.0;

/// Prefix for ids of notes that only exist locally
pub const LOCAL_ID_PREFIX: &str = "local-";

// ============================================================================
// Team Overview Layout
// ============================================================================

/// Team cards per row on the overview board
pub const TEAM_GRID_COLUMNS: usize = 3;

/// Top-left corner of the first team card
pub const TEAM_GRID_ORIGIN: (f32, f32) = (200.0, 200.0);

/// Horizontal distance between team cards
pub const TEAM_GRID_STRIDE_X: f32 = 520.0;

/// Vertical distance between team card rows
pub const TEAM_GRID_STRIDE_Y: f32 = 420.0;

/// Team card size
pub const TEAM_CARD_SIZE: (f32, f32) = (480.0, 320.0);

// ============================================================================
// Write Retries
// ============================================================================

/// First retry delay for a failed write
pub const RETRY_BASE_DELAY_MS: u64 = 250;

/// Upper bound for the retry delay
pub const RETRY_MAX_DELAY_MS: u64 = 30_000;

/// Attempts after which a failed write is dropped
pub const RETRY_MAX_ATTEMPTS: u32 = 5;
