//! Configuration management for the dock layout
//!
//! This module provides [`LayoutSettings`] and the [`SettingsManager`] that
//! loads and saves them in TOML format.

mod settings;

pub use settings::{ConfigError, LayoutSettings, SettingsManager};
