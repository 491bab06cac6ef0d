//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for trackexport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "trackexport.toml";

/// trackexport - motion-tracking trajectory exporter
#[derive(Parser, Debug)]
#[command(name = "trackexport")]
#[command(version, about, long_about = None)]
#[command(author = "Trackexport Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "TRACKEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRACKEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export tracking data of a scene to per-track CSV files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// List clips and tracks of a scene
    Inspect(commands::inspect::InspectArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
