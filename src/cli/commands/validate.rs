//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the trackexport configuration file.

use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Scene File: {}{}",
            config.source.scene_file,
            if Path::new(&config.source.scene_file).exists() {
                ""
            } else {
                " (not found)"
            }
        );
        println!("  Export Path: {}", config.export.path);
        println!("  Selected Only: {}", config.export.selected_only);
        println!("  Subdirectories: {}", config.export.subdirectories);
        println!("  Write Log: {}", config.export.write_log);
        println!(
            "  Frame Range: {} to {}",
            describe_frame(config.export.frame_start),
            describe_frame(config.export.frame_end)
        );
        println!("  On Track Failure: {}", config.export.on_track_failure);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}

fn describe_frame(frame: Option<i64>) -> String {
    frame.map_or_else(|| "scene default".to_string(), |f| f.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_describe_frame() {
        assert_eq!(describe_frame(Some(12)), "12");
        assert_eq!(describe_frame(None), "scene default");
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("does-not-exist-trackexport.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_invalid_rotation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlocal_rotation = \"weekly\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
