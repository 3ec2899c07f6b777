//! Notebook configuration.

use inkpad_core::storage::DEFAULT_STORAGE_KEY;
use kurbo::Size;
use std::path::PathBuf;
use thiserror::Error;

/// Default backing resolution of the drawing surface.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1200;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1600;
/// Default width of page-list thumbnails.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 220;

/// Largest surface edge accepted, in pixels.
const MAX_SURFACE_EDGE: u32 = 16_384;

const ENV_DATA_DIR: &str = "INKPAD_DATA_DIR";
const ENV_CANVAS_WIDTH: &str = "INKPAD_CANVAS_WIDTH";
const ENV_CANVAS_HEIGHT: &str = "INKPAD_CANVAS_HEIGHT";
const ENV_THUMBNAIL_WIDTH: &str = "INKPAD_THUMBNAIL_WIDTH";
const ENV_HISTORY_LIMIT: &str = "INKPAD_HISTORY_LIMIT";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("{name} must be between 1 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        max: u32,
    },
    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}

/// Settings for a notebook session.
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookConfig {
    /// Backing resolution of the drawing surface.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Width of page-list thumbnails; height follows the canvas aspect.
    pub thumbnail_width: u32,
    /// Storage slot holding the document.
    pub storage_key: String,
    /// Maximum undo depth per page. `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Directory for file storage. `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            history_limit: None,
            data_dir: None,
        }
    }
}

impl NotebookConfig {
    /// Defaults overridden by `INKPAD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(width) = parse_var(&lookup, ENV_CANVAS_WIDTH)? {
            self.canvas_width = width;
        }
        if let Some(height) = parse_var(&lookup, ENV_CANVAS_HEIGHT)? {
            self.canvas_height = height;
        }
        if let Some(width) = parse_var(&lookup, ENV_THUMBNAIL_WIDTH)? {
            self.thumbnail_width = width;
        }
        if let Some(limit) = parse_var(&lookup, ENV_HISTORY_LIMIT)? {
            self.history_limit = Some(limit);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Canvas size as floating-point geometry.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width as f64, self.canvas_height as f64)
    }

    /// Check that sizes are usable and the storage key is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_edge("canvas width", self.canvas_width)?;
        check_edge("canvas height", self.canvas_height)?;
        check_edge("thumbnail width", self.thumbnail_width)?;
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

fn check_edge(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_SURFACE_EDGE {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            max: MAX_SURFACE_EDGE,
        });
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
    }
}
