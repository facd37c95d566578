//! Board settings persisted as JSON in the user's config directory.
//!
//! Every field has a default, so a partial or older file still loads. A
//! missing or unreadable file falls back to defaults rather than failing.

use crate::constants::{
    DEFAULT_NOTE_COLOR, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_TITLE, DEFAULT_NOTE_WIDTH,
    DRAG_THRESHOLD, GRID_SIZE, PROJECT_FOOTPRINT_HEIGHT, PROJECT_FOOTPRINT_WIDTH,
    RETRY_BASE_DELAY_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_MS,
};
use crate::geometry::Size;
use crate::persist::{RetryWithBackoff, SwallowFailures, WriteFailurePolicy};
use crate::settings_watcher::default_settings_path;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to replace settings file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Style applied to notes spawned by double-click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDefaults {
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub title: String,
}

impl Default for NoteDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_NOTE_WIDTH,
            height: DEFAULT_NOTE_HEIGHT,
            color: DEFAULT_NOTE_COLOR.to_string(),
            title: DEFAULT_NOTE_TITLE.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Off means failed writes are logged and dropped
    pub enabled: bool,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_attempts: u32,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: RETRY_MAX_DELAY_MS,
            max_attempts: RETRY_MAX_ATTEMPTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Pointer travel (|dx| + |dy|) after which a press becomes a drag
    pub drag_threshold: f32,
    pub project_footprint: Size,
    pub note: NoteDefaults,
    pub grid_size: f32,
    pub retry: RetrySettings,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            project_footprint: Size::new(PROJECT_FOOTPRINT_WIDTH, PROJECT_FOOTPRINT_HEIGHT),
            note: NoteDefaults::default(),
            grid_size: GRID_SIZE,
            retry: RetrySettings::default(),
        }
    }
}

impl BoardSettings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            tracing::info!("No config directory, using default settings");
            return Self::default();
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = default_settings_path().context("no config directory available")?;
        self.save_to(&path)
            .with_context(|| format!("saving settings to {}", path.display()))
    }

    /// Write atomically: the JSON goes to a temp file next to `path`, which
    /// then replaces the target.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path)?;

        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Failure policy described by the retry section.
    pub fn failure_policy(&self) -> Arc<dyn WriteFailurePolicy> {
        if self.retry.enabled {
            Arc::new(RetryWithBackoff::new(
                Duration::from_millis(self.retry.base_delay_ms),
                Duration::from_millis(self.retry.max_delay_ms),
                self.retry.max_attempts,
            ))
        } else {
            Arc::new(SwallowFailures)
        }
    }
}
