//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "trackexport.toml")]
    pub output: String,

    /// Include comments and a sample scene document
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

/// File name of the sample scene written by `--with-examples`
pub const SAMPLE_SCENE_FILE: &str = "scene.json";

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing trackexport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        if let Err(e) = fs::write(&self.output, config_content) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {}", e);
            return Ok(5); // Fatal error exit code
        }
        println!("✅ Configuration file created: {}", self.output);

        if self.with_examples {
            let scene_path = Path::new(&self.output)
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(SAMPLE_SCENE_FILE);

            if scene_path.exists() {
                println!("ℹ️  Keeping existing scene document: {}", scene_path.display());
            } else if let Err(e) = fs::write(&scene_path, Self::generate_sample_scene()) {
                println!("❌ Failed to write sample scene document");
                println!("   Error: {}", e);
                return Ok(5);
            } else {
                println!("✅ Sample scene document created: {}", scene_path.display());
            }
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Point [source] scene_file at the scene document to export");
        println!("  3. Validate configuration: trackexport validate-config");
        println!("  4. List clips and tracks: trackexport inspect");
        println!("  5. Run export: trackexport export");
        println!();
        Ok(0)
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# trackexport configuration

[application]
log_level = "info"

[source]
scene_file = "scene.json"

[export]
path = "export"
selected_only = false
subdirectories = false
write_log = false
on_track_failure = "abort"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# trackexport configuration
#
# Values may reference environment variables with ${VAR_NAME}. Every key can
# also be overridden with TRACKEXPORT_<SECTION>_<KEY>, for example
# TRACKEXPORT_EXPORT_PATH=/tmp/out.

[application]
# trace | debug | info | warn | error
log_level = "info"

[source]
# JSON scene document with clips, tracks and markers
scene_file = "scene.json"

[export]
# Directory receiving one CSV file per track (created if missing)
path = "export"

# Only the active clip and its selected tracks
selected_only = false

# One subdirectory per clip, named after the clip
subdirectories = false

# Write log.txt with a per-frame account of missing markers
write_log = true

# Frame range; both default to the scene frame range
# frame_start = 1
# frame_end = 250

# abort: stop at the first track file that cannot be written
# continue: report the failed track and carry on
on_track_failure = "abort"

[logging]
# JSON diagnostic logs, separate from log.txt
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate a small scene document to try the export with
    fn generate_sample_scene() -> String {
        r#"{
  "name": "Scene",
  "frame_start": 1,
  "frame_end": 3,
  "active_clip": "shot.mp4",
  "clips": [
    {
      "name": "shot.mp4",
      "width": 1000,
      "height": 500,
      "tracks": [
        {
          "name": "T1",
          "selected": true,
          "markers": [
            { "frame": 1, "x": 0.1, "y": 0.2 },
            { "frame": 3, "x": 0.5, "y": 0.5 }
          ]
        }
      ]
    }
  ]
}
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scene::parse_scene;
    use crate::config::parse_config;
    use tempfile::tempdir;

    #[test]
    fn test_generated_configs_are_valid() {
        let minimal = parse_config(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.export.path, "export");

        let annotated = parse_config(&InitArgs::generate_config_with_examples()).unwrap();
        assert!(annotated.export.write_log);
        assert_eq!(annotated.export.frame_start, None);
    }

    #[test]
    fn test_sample_scene_is_valid() {
        let scene = parse_scene(&InitArgs::generate_sample_scene()).unwrap();
        assert_eq!(scene.clips().len(), 1);
        assert!(scene.active().is_some());
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("trackexport.toml");
        fs::write(&output, "keep me").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_init_with_examples_writes_scene() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("trackexport.toml");

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: true,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(output.exists());
        assert!(dir.path().join(SAMPLE_SCENE_FILE).exists());
    }
}
