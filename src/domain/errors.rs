//! Domain error types
//!
//! This module defines the error hierarchy for trackexport.
//! All errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main trackexport error type
///
/// This is the primary error type used throughout the library.
/// Data gaps are never reported through it; they only show up in the run
/// log and in the per-track success flag.
#[derive(Debug, Error)]
pub enum TrackExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scene document errors (unreadable file, inconsistent data)
    #[error("Scene error: {0}")]
    Scene(String),

    /// Export of selected items requested while the source has no active clip
    #[error("No active clip: exporting selected tracks requires an active clip")]
    NoActiveClip,

    /// The export base directory cannot be created or used
    #[error("Export path unusable: {path}: {message}")]
    ExportPath { path: PathBuf, message: String },

    /// A per-track CSV file could not be created or written
    #[error("Failed to write track file {path}: {message}")]
    TrackFile { path: PathBuf, message: String },

    /// The run log could not be created or written
    #[error("Run log error: {0}")]
    RunLog(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TrackExportError {
    /// Whether this error is a precondition violation that aborted the run
    /// before any output was produced
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TrackExportError::NoActiveClip | TrackExportError::ExportPath { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TrackExportError {
    fn from(err: std::io::Error) -> Self {
        TrackExportError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for TrackExportError {
    fn from(err: csv::Error) -> Self {
        TrackExportError::Io(format!("CSV write failed: {err}"))
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TrackExportError {
    fn from(err: serde_json::Error) -> Self {
        TrackExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TrackExportError {
    fn from(err: toml::de::Error) -> Self {
        TrackExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
