//! Configuration schema types
//!
//! This module defines the configuration structure for trackexport.

use crate::domain::request::TrackFailurePolicy;
use serde::{Deserialize, Serialize};

/// Main trackexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackexportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where the tracking data comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrackexportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Tracking data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON scene document holding clips, tracks and markers
    #[serde(default = "default_scene_file")]
    pub scene_file: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.scene_file.trim().is_empty() {
            return Err("source.scene_file cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            scene_file: default_scene_file(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving the CSV files (created if missing)
    #[serde(default = "default_export_path")]
    pub path: String,

    /// Export only the active clip and its selected tracks
    #[serde(default)]
    pub selected_only: bool,

    /// One subdirectory per clip, named after the clip
    #[serde(default)]
    pub subdirectories: bool,

    /// Write `log.txt` into the export directory
    #[serde(default)]
    pub write_log: bool,

    /// First exported frame (default: scene start frame)
    #[serde(default)]
    pub frame_start: Option<i64>,

    /// Last exported frame (default: scene end frame)
    #[serde(default)]
    pub frame_end: Option<i64>,

    /// Handling of tracks whose file cannot be written (abort or continue)
    #[serde(default)]
    pub on_track_failure: TrackFailurePolicy,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("export.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
            selected_only: false,
            subdirectories: false,
            write_log: false,
            frame_start: None,
            frame_end: None,
            on_track_failure: TrackFailurePolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_scene_file() -> String {
    "scene.json".to_string()
}

fn default_export_path() -> String {
    "export".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
