//! Viewer configuration
//!
//! Settings the viewer collaborator hands to the toolpath engine: ring
//! capacity, trim window, camera placement factor, reload polling, export
//! file names, and the default picking filter. Stored as JSON or TOML,
//! chosen by file extension.

use crate::constants;
use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Export table destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Full segment table
    pub stream_csv: PathBuf,
    /// Selected-only segment table
    pub selection_csv: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            stream_csv: PathBuf::from(constants::STREAM_CSV),
            selection_csv: PathBuf::from(constants::SELECTION_CSV),
        }
    }
}

/// Default filter flags for ray picking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickSettings {
    /// Ignore segments already in the selection
    pub skip_selected: bool,
    /// Only consider segments in the selection
    pub only_selected: bool,
    /// Ignore segments whose auxiliary channel increases
    pub skip_upward: bool,
    /// Ignore segments whose auxiliary channel decreases
    pub skip_downward: bool,
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Selection ring capacity
    pub selection_capacity: usize,
    /// Trimmed-mean sample window
    pub trim_window: usize,
    /// Camera eye offset as a fraction of the bounds extent
    pub camera_offset_factor: f32,
    /// Modification-time polling interval for the watched file
    pub reload_poll_interval_ms: u64,
    /// Export destinations
    pub export: ExportSettings,
    /// Picking defaults
    pub pick: PickSettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            selection_capacity: constants::SELECTION_CAPACITY,
            trim_window: constants::TRIM_WINDOW,
            camera_offset_factor: constants::CAMERA_OFFSET_FACTOR,
            reload_poll_interval_ms: constants::RELOAD_POLL_INTERVAL_MS,
            export: ExportSettings::default(),
            pick: PickSettings::default(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

impl ViewerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content).map_err(ConfigError::from)?,
            Format::Toml => toml::from_str(&content).map_err(ConfigError::from)?,
        };

        config.validate()?;
        tracing::debug!("Loaded viewer config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self).map_err(ConfigError::from)?,
            Format::Toml => toml::to_string_pretty(self).map_err(ConfigError::from)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.selection_capacity == 0 {
            return Err(invalid("selection_capacity", "must be > 0"));
        }
        if self.trim_window < constants::MIN_TRIM_WINDOW {
            return Err(invalid(
                "trim_window",
                &format!("must be >= {}", constants::MIN_TRIM_WINDOW),
            ));
        }
        if !self.camera_offset_factor.is_finite() {
            return Err(invalid("camera_offset_factor", "must be finite"));
        }
        if self.reload_poll_interval_ms == 0 {
            return Err(invalid("reload_poll_interval_ms", "must be > 0"));
        }
        if self.pick.skip_selected && self.pick.only_selected {
            return Err(invalid(
                "pick",
                "skip_selected and only_selected exclude every segment",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
