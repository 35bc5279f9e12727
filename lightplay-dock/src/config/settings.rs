//! Layout settings
//!
//! Tunables of the dock layout, stored as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dock::{
    DEFAULT_DIVIDER_THICKNESS, DEFAULT_EDGE_THRESHOLD, DEFAULT_SPLIT_RATIO, MIN_EXTENT_HORIZONTAL,
    MIN_EXTENT_VERTICAL, ResizeLimits,
};
use crate::persistence::LAYOUT_STORAGE_KEY;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for these settings.
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// The settings could not be encoded.
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// A value is outside its accepted range.
    #[error("Invalid value for {field}: {reason}")]
    Validation {
        /// Offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Dock layout tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Key the layout blob is stored under.
    pub storage_key: String,
    /// Fraction of a panel treated as an edge drop zone.
    pub edge_threshold: f64,
    /// Minimum child width of a horizontal split.
    pub min_extent_horizontal: f64,
    /// Minimum child height of a vertical split.
    pub min_extent_vertical: f64,
    /// Divider thickness in container units.
    pub divider_thickness: f64,
    /// Ratio of splits created by edge drops.
    pub default_ratio: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            storage_key: LAYOUT_STORAGE_KEY.to_string(),
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            min_extent_horizontal: MIN_EXTENT_HORIZONTAL,
            min_extent_vertical: MIN_EXTENT_VERTICAL,
            divider_thickness: DEFAULT_DIVIDER_THICKNESS,
            default_ratio: DEFAULT_SPLIT_RATIO,
        }
    }
}

impl LayoutSettings {
    /// Returns the divider limits described by these settings.
    #[must_use]
    pub const fn resize_limits(&self) -> ResizeLimits {
        ResizeLimits {
            min_horizontal: self.min_extent_horizontal,
            min_vertical: self.min_extent_vertical,
        }
    }

    /// Checks every value against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(invalid("storage_key", "must not be empty"));
        }
        if !(self.edge_threshold > 0.0 && self.edge_threshold < 0.5) {
            return Err(invalid("edge_threshold", "must be between 0 and 0.5"));
        }
        for (field, value) in [
            ("min_extent_horizontal", self.min_extent_horizontal),
            ("min_extent_vertical", self.min_extent_vertical),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
        }
        if !(self.divider_thickness.is_finite() && self.divider_thickness >= 0.0) {
            return Err(invalid("divider_thickness", "must not be negative"));
        }
        if !(self.default_ratio > 0.0 && self.default_ratio < 1.0) {
            return Err(invalid("default_ratio", "must be between 0 and 1"));
        }
        Ok(())
    }

    /// Parses settings from TOML and validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is invalid.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Encodes settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Loads and saves [`LayoutSettings`] from one TOML file.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    /// Creates a manager for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default settings file (`<config dir>/lightplay/layout.toml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lightplay").join("layout.toml"))
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(&self) -> Result<LayoutSettings, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(LayoutSettings::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        LayoutSettings::from_toml(&text)
    }

    /// Validates and saves settings, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or cannot be written.
    pub fn save(&self, settings: &LayoutSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        let text = settings.to_toml()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        tracing::info!(path = %self.path.display(), "Layout settings saved");
        Ok(())
    }
}
