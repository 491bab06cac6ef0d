//! Clip walker
//!
//! Picks the tracks of a clip that take part in the export, resolves where
//! their files go and runs the track exporter over each of them in order.

use crate::adapters::source::TrackingSource;
use crate::core::export::runlog::RunLog;
use crate::core::export::summary::{format_seconds, ClipResult, TrackResult};
use crate::core::export::track::export_track;
use crate::domain::request::{ExportRequest, TrackFailurePolicy};
use crate::domain::scene::{Clip, Track};
use crate::domain::{Result, TrackExportError};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::watch;

/// File name of a track's CSV file: `{clip base name}_{track name}.csv`
///
/// The clip base name is the clip name up to its first `.`, see
/// [`ClipName::base_name`](crate::domain::ids::ClipName::base_name).
pub fn track_file_name(clip: &Clip, track: &Track) -> String {
    format!("{}_{}.csv", clip.name.base_name(), track.name)
}

/// Directory receiving the files of `clip`
pub fn clip_output_dir(base_path: &Path, clip: &Clip, use_subdirectories: bool) -> PathBuf {
    if use_subdirectories {
        base_path.join(clip.name.as_str())
    } else {
        base_path.to_path_buf()
    }
}

/// Tracks of `clip` taking part in the export, in source order
pub fn participating_tracks<'a>(
    source: &'a dyn TrackingSource,
    clip: &'a Clip,
    selected_only: bool,
) -> Vec<&'a Track> {
    source
        .list_tracks(clip)
        .into_iter()
        .filter(|track| !selected_only || track.selected)
        .collect()
}

/// Exports every participating track of `clip`
///
/// The shutdown signal is checked before each track; a track that has been
/// started is always written to the end.
///
/// # Errors
///
/// Fails if the clip subdirectory cannot be created, if the run log cannot
/// be written, or if a track file fails under [`TrackFailurePolicy::Abort`].
pub fn export_clip(
    source: &dyn TrackingSource,
    clip: &Clip,
    request: &ExportRequest,
    base_path: &Path,
    run_log: &mut dyn RunLog,
    shutdown_signal: &watch::Receiver<bool>,
) -> Result<ClipResult> {
    let start_time = Instant::now();
    let (width, height) = source.dimensions(clip);

    tracing::info!(clip = %clip.name, width, height, "Processing clip");
    run_log.append(&format!(
        "Starting movieclip {} ({} x {} pixels)",
        clip.name, width, height
    ))?;

    let tracks = participating_tracks(source, clip, request.selected_only);
    let output_dir = clip_output_dir(base_path, clip, request.use_subdirectories);

    // Subdirectories are only created for clips that are actually exported
    if request.use_subdirectories {
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            TrackExportError::Io(format!(
                "Failed to create clip directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;
    }

    let mut result = ClipResult::new(clip.name.clone(), output_dir.clone());

    for track in tracks {
        if *shutdown_signal.borrow() {
            tracing::info!(clip = %clip.name, "Shutdown requested, skipping remaining tracks");
            result.interrupted = true;
            break;
        }

        let output_path = output_dir.join(track_file_name(clip, track));
        let track_result = match export_track(
            source,
            track,
            (width, height),
            request.frame_start..=request.frame_end,
            &output_path,
            run_log,
        ) {
            Ok(track_result) => track_result,
            Err(e @ TrackExportError::TrackFile { .. })
                if request.on_track_failure == TrackFailurePolicy::Continue =>
            {
                tracing::error!(
                    clip = %clip.name,
                    track = %track.name,
                    error = %e,
                    "Track export failed, continuing with next track"
                );
                run_log.append(&format!("  Track {} failed: {}", track.name, e))?;
                TrackResult::failed(track.name.clone(), output_path, e.to_string())
            }
            Err(e) => return Err(e),
        };

        result.track_results.push(track_result);
    }

    result.elapsed = start_time.elapsed();

    run_log.append(&format!(
        "Finished movieclip {} in {} s",
        clip.name,
        format_seconds(result.elapsed)
    ))?;
    run_log.append("")?;

    tracing::info!(
        clip = %clip.name,
        tracks = result.tracks_processed(),
        rows = result.rows_written(),
        gaps = result.gaps_encountered(),
        duration_ms = result.elapsed.as_millis() as u64,
        "Finished clip"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::runlog::{MemoryRunLog, NullRunLog};
    use crate::domain::ids::{ClipName, TrackName};
    use crate::domain::scene::Scene;
    use tempfile::tempdir;

    fn track(name: &str, selected: bool) -> Track {
        Track::new(TrackName::new(name).unwrap())
            .selected(selected)
            .with_marker(1, 0.5, 0.5)
    }

    fn scene() -> Scene {
        let clip = Clip::new(ClipName::new("shot.final.mp4").unwrap(), 200, 100)
            .with_track(track("A", false))
            .with_track(track("B", true))
            .with_track(track("C", true));
        Scene::builder("Scene").clip(clip).build().unwrap()
    }

    fn no_shutdown() -> watch::Receiver<bool> {
        let (_tx, rx) = watch::channel(false);
        rx
    }

    #[test]
    fn test_track_file_name_uses_first_dot() {
        let scene = scene();
        let clip = &scene.clips()[0];
        assert_eq!(track_file_name(clip, &clip.tracks()[0]), "shot_A.csv");
    }

    #[test]
    fn test_clip_output_dir() {
        let scene = scene();
        let clip = &scene.clips()[0];
        let base = Path::new("/export");

        assert_eq!(clip_output_dir(base, clip, false), PathBuf::from("/export"));
        assert_eq!(
            clip_output_dir(base, clip, true),
            PathBuf::from("/export/shot.final.mp4")
        );
    }

    #[test]
    fn test_participating_tracks_preserves_order() {
        let scene = scene();
        let clip = &scene.clips()[0];

        let all: Vec<&str> = participating_tracks(&scene, clip, false)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        let selected: Vec<&str> = participating_tracks(&scene, clip, true)
            .iter()
            .map(|t| t.name.as_str())
            .collect();

        assert_eq!(all, vec!["A", "B", "C"]);
        assert_eq!(selected, vec!["B", "C"]);
    }

    #[test]
    fn test_export_clip_all_tracks() {
        let dir = tempdir().unwrap();
        let scene = scene();
        let request = ExportRequest::new(dir.path(), 1, 1);
        let mut log = MemoryRunLog::new();

        let result = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut log,
            &no_shutdown(),
        )
        .unwrap();

        assert_eq!(result.tracks_processed(), 3);
        assert!(result.is_successful());
        assert!(dir.path().join("shot_A.csv").exists());
        assert!(dir.path().join("shot_C.csv").exists());
        assert_eq!(log.lines()[0], "Starting movieclip shot.final.mp4 (200 x 100 pixels)");
        assert!(log.lines()[log.lines().len() - 2].starts_with("Finished movieclip shot.final.mp4 in "));
        assert_eq!(log.lines().last().unwrap(), "");
    }

    #[test]
    fn test_export_clip_selected_into_subdirectory() {
        let dir = tempdir().unwrap();
        let scene = scene();
        let request = ExportRequest::new(dir.path(), 1, 1)
            .with_selected_only(true)
            .with_subdirectories(true);

        let result = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut NullRunLog,
            &no_shutdown(),
        )
        .unwrap();

        let subdir = dir.path().join("shot.final.mp4");
        assert_eq!(result.output_dir, subdir);
        assert_eq!(result.tracks_processed(), 2);
        assert!(!subdir.join("shot_A.csv").exists());
        assert!(subdir.join("shot_B.csv").exists());
        assert!(!dir.path().join("shot_B.csv").exists());
    }

    #[test]
    fn test_export_clip_no_selected_tracks() {
        let dir = tempdir().unwrap();
        let clip = Clip::new(ClipName::new("a.mov").unwrap(), 10, 10).with_track(track("A", false));
        let scene = Scene::builder("Scene").clip(clip).build().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 1).with_selected_only(true);

        let result = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut NullRunLog,
            &no_shutdown(),
        )
        .unwrap();

        assert_eq!(result.tracks_processed(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_clip_stops_on_shutdown() {
        let dir = tempdir().unwrap();
        let scene = scene();
        let request = ExportRequest::new(dir.path(), 1, 1);
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let result = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut NullRunLog,
            &rx,
        )
        .unwrap();

        assert!(result.interrupted);
        assert_eq!(result.tracks_processed(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_export_clip_continue_on_track_failure() {
        let dir = tempdir().unwrap();
        let scene = scene();
        // A directory squatting on the file name makes that one track unwritable
        std::fs::create_dir(dir.path().join("shot_B.csv")).unwrap();

        let request = ExportRequest::new(dir.path(), 1, 1)
            .with_failure_policy(TrackFailurePolicy::Continue);
        let mut log = MemoryRunLog::new();

        let result = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut log,
            &no_shutdown(),
        )
        .unwrap();

        assert_eq!(result.tracks_processed(), 3);
        assert!(result.track_results[1].is_failed());
        assert!(result.track_results[2].success);
        assert!(log.contents().contains("  Track B failed: "));
    }

    #[cfg(unix)]
    #[test]
    fn test_export_clip_abort_on_track_failure() {
        let dir = tempdir().unwrap();
        let scene = scene();
        std::fs::create_dir(dir.path().join("shot_B.csv")).unwrap();

        let request = ExportRequest::new(dir.path(), 1, 1);

        let err = export_clip(
            &scene,
            &scene.clips()[0],
            &request,
            dir.path(),
            &mut NullRunLog,
            &no_shutdown(),
        )
        .unwrap_err();

        assert!(matches!(err, TrackExportError::TrackFile { .. }));
        assert!(dir.path().join("shot_A.csv").exists());
        assert!(!dir.path().join("shot_C.csv").exists());
    }
}
