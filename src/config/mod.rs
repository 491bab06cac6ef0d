//! Configuration management for trackexport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! trackexport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TRACKEXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trackexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("trackexport.toml")?;
//!
//! println!("Scene: {}", config.source.scene_file);
//! println!("Export path: {}", config.export.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`SourceConfig`] - Scene document location
//! - [`ExportConfig`] - Export path, selection, frame range, failure policy
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! scene_file = "${SHOT_DIR}/scene.json"
//!
//! [export]
//! path = "export"
//! subdirectories = true
//! write_log = true
//! on_track_failure = "abort"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, SourceConfig, TrackexportConfig};
