//! Export command implementation
//!
//! This module implements the `export` command, which writes the tracks of a
//! scene document to CSV files.

use crate::adapters::scene::load_scene;
use crate::adapters::source::TrackingSource;
use crate::config::{load_config_or_default, TrackexportConfig};
use crate::core::export::summary::{format_seconds, RunStatus, RunSummary};
use crate::core::export::ExportCoordinator;
use crate::domain::request::{ExportRequest, TrackFailurePolicy};
use crate::{log_error_with_context, log_export_complete};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the scene document to export from
    #[arg(long)]
    pub scene: Option<String>,

    /// Override the export directory
    #[arg(long)]
    pub path: Option<String>,

    /// Export only the active clip and its selected tracks
    #[arg(long)]
    pub selected_only: bool,

    /// Write each clip into its own subdirectory
    #[arg(long)]
    pub subdirs: bool,

    /// Write log.txt into the export directory
    #[arg(long)]
    pub write_log: bool,

    /// Override the first exported frame
    #[arg(long, allow_negative_numbers = true)]
    pub frame_start: Option<i64>,

    /// Override the last exported frame
    #[arg(long, allow_negative_numbers = true)]
    pub frame_end: Option<i64>,

    /// Keep going when a track file cannot be written
    #[arg(long)]
    pub continue_on_error: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let scene = match load_scene(&config.source.scene_file) {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load scene document");
                eprintln!("Failed to load scene: {e}");
                return Ok(3); // Precondition error exit code
            }
        };

        let request = ExportRequest::from_config(&config.export, scene.frame_range());

        println!("🚀 Exporting from scene {}", scene.name);
        println!("  Export path: {}", request.output_dir.display());
        println!(
            "  Frames: {} to {} ({} frame(s) per track)",
            request.frame_start,
            request.frame_end,
            request.frame_count()
        );
        println!();

        // The export core is synchronous; keep it off the async workers so
        // the signal handler stays responsive
        let outcome = tokio::task::spawn_blocking(move || {
            ExportCoordinator::new(request, shutdown_signal).execute_export(&scene)
        })
        .await?;

        let summary = match outcome {
            Ok(s) => s,
            Err(e) if e.is_precondition() => {
                log_error_with_context!(&e, "Export precondition not met");
                println!("❌ {e}");
                return Ok(3);
            }
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        log_export_complete!(summary.files_written(), summary.elapsed);
        print_summary(&summary);

        Ok(exit_code(&summary))
    }

    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut TrackexportConfig) {
        if let Some(scene) = &self.scene {
            tracing::info!(scene = %scene, "Overriding scene file from CLI");
            config.source.scene_file = scene.clone();
        }
        if let Some(path) = &self.path {
            tracing::info!(path = %path, "Overriding export path from CLI");
            config.export.path = path.clone();
        }
        if self.selected_only {
            config.export.selected_only = true;
        }
        if self.subdirs {
            config.export.subdirectories = true;
        }
        if self.write_log {
            config.export.write_log = true;
        }
        if self.frame_start.is_some() {
            config.export.frame_start = self.frame_start;
        }
        if self.frame_end.is_some() {
            config.export.frame_end = self.frame_end;
        }
        if self.continue_on_error {
            config.export.on_track_failure = TrackFailurePolicy::Continue;
        }
    }
}

fn print_summary(summary: &RunSummary) {
    if summary.status == RunStatus::NoClipOpened {
        println!("ℹ️  {}", summary.status_message());
        return;
    }

    println!("📊 Export Summary:");
    for clip in &summary.clip_results {
        println!(
            "  🎬 {}: {} track(s), {} row(s), {} missing frame(s) in {} s",
            clip.clip_name,
            clip.tracks_processed(),
            clip.rows_written(),
            clip.gaps_encountered(),
            format_seconds(clip.elapsed)
        );
        for track in &clip.track_results {
            if let Some(error) = &track.error {
                println!("     ❌ {}: {}", track.track_name, error);
            } else if !track.success {
                println!(
                    "     ⚠️  {}: {} missing frame(s)",
                    track.track_name, track.gaps_encountered
                );
            }
        }
    }
    println!("  Files written: {}", summary.files_written());
    if let Some(log_path) = &summary.log_path {
        println!("  Run log: {}", log_path.display());
    }
    println!();

    if summary.interrupted {
        println!("⚠️  {}", summary.status_message());
        println!("   Files of tracks that were not reached are missing.");
    } else if !summary.failed_tracks().is_empty() {
        println!("⚠️  {} with failed tracks", summary.status_message());
    } else {
        println!("✅ {}", summary.status_message());
    }
}

/// Process exit code for a finished run
///
/// Gaps in tracking data are reported but do not fail the run.
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.interrupted {
        130 // SIGINT exit code (standard Unix convention)
    } else if !summary.failed_tracks().is_empty() {
        1 // Partial success
    } else {
        0
    }
}
