//! Integration tests for graceful shutdown functionality
//!
//! These tests verify that:
//! - Shutdown signals are properly handled
//! - A track that has been started is always written completely
//! - Remaining tracks and clips are skipped and the run log is closed

use std::fs;
use tempfile::tempdir;
use tokio::sync::watch;
use trackexport::adapters::source::TrackingSource;
use trackexport::cli::commands::export::exit_code;
use trackexport::core::export::runlog::RUN_LOG_FILE_NAME;
use trackexport::core::export::ExportCoordinator;
use trackexport::domain::{
    Clip, ClipName, ExportRequest, FrameNumber, Marker, Scene, Track, TrackName,
};

/// Source that raises the shutdown signal the first time a marker is read
struct InterruptingSource {
    scene: Scene,
    shutdown_tx: watch::Sender<bool>,
}

impl TrackingSource for InterruptingSource {
    fn scene_name(&self) -> &str {
        self.scene.scene_name()
    }

    fn frame_range(&self) -> (FrameNumber, FrameNumber) {
        self.scene.frame_range()
    }

    fn list_clips(&self) -> Vec<&Clip> {
        self.scene.list_clips()
    }

    fn active_clip(&self) -> Option<&Clip> {
        self.scene.active_clip()
    }

    fn marker_at(&self, track: &Track, frame: FrameNumber) -> Option<Marker> {
        let _ = self.shutdown_tx.send(true);
        track.marker_at(frame).copied()
    }
}

fn scene() -> Scene {
    let full = |name: &str| {
        (1..=5).fold(Track::new(TrackName::new(name).unwrap()), |t, f| {
            t.with_marker(f, 0.5, 0.5)
        })
    };

    Scene::builder("Scene")
        .frame_range(1, 5)
        .clip(
            Clip::new(ClipName::new("a.mp4").unwrap(), 100, 100)
                .with_track(full("first"))
                .with_track(full("second")),
        )
        .clip(Clip::new(ClipName::new("b.mp4").unwrap(), 100, 100).with_track(full("third")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_shutdown_signal_channel_creation() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    assert!(!*shutdown_rx.borrow());
    shutdown_tx.send(true).unwrap();
    assert!(*shutdown_rx.borrow());
}

#[tokio::test]
async fn test_shutdown_mid_clip_finishes_current_track() {
    let dir = tempdir().unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let source = InterruptingSource {
        scene: scene(),
        shutdown_tx,
    };
    let request = ExportRequest::new(dir.path(), 1, 5).with_log(true);

    let summary = tokio::task::spawn_blocking(move || {
        ExportCoordinator::new(request, shutdown_rx).execute_export(&source)
    })
    .await
    .unwrap()
    .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.clips_processed(), 1);
    assert_eq!(summary.tracks_processed(), 1);
    assert!(summary.clip_results[0].interrupted);
    assert_eq!(exit_code(&summary), 130);
    assert!(summary.status_message().starts_with("Export interrupted ("));

    let first = fs::read_to_string(dir.path().join("a_first.csv")).unwrap();
    assert_eq!(first.lines().count(), 6);
    assert!(!dir.path().join("a_second.csv").exists());
    assert!(!dir.path().join("b_third.csv").exists());

    let log = fs::read_to_string(dir.path().join(RUN_LOG_FILE_NAME)).unwrap();
    assert!(log.contains("Finished movieclip a.mp4 in "));
    assert!(log.contains("Export interrupted\n"));
    assert!(log.contains("Export finished ("));
    assert!(!log.contains("b.mp4"));
}

#[tokio::test]
async fn test_signal_after_run_has_no_effect() {
    let dir = tempdir().unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let request = ExportRequest::new(dir.path(), 1, 5);
    let scene = scene();

    let coordinator = ExportCoordinator::new(request, shutdown_rx);
    let summary = coordinator.execute_export(&scene).unwrap();
    shutdown_tx.send(true).unwrap();

    assert!(!summary.interrupted);
    assert_eq!(summary.tracks_processed(), 3);
    assert_eq!(exit_code(&summary), 0);
}
