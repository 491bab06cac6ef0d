//! Export coordinator - main orchestrator for an export run
//!
//! Resolves which clips take part, prepares the export directory and the run
//! log, then hands each clip to the clip walker.

use crate::adapters::source::TrackingSource;
use crate::core::export::clip::export_clip;
use crate::core::export::runlog::{FileRunLog, NullRunLog, RunLog, RUN_LOG_FILE_NAME, RUN_LOG_RULE};
use crate::core::export::summary::{format_seconds, RunStatus, RunSummary};
use crate::domain::request::ExportRequest;
use crate::domain::scene::Clip;
use crate::domain::{Result, TrackExportError};
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    request: ExportRequest,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator that stops at the next clip or track boundary
    /// once `shutdown_signal` turns `true`
    pub fn new(request: ExportRequest, shutdown_signal: watch::Receiver<bool>) -> Self {
        Self {
            request,
            shutdown_signal,
        }
    }

    /// Create a coordinator that always runs to completion
    pub fn without_shutdown(request: ExportRequest) -> Self {
        let (_tx, rx) = watch::channel(false);
        Self::new(request, rx)
    }

    /// Execute the export
    ///
    /// 1. Resolves the clip set (fails with [`TrackExportError::NoActiveClip`]
    ///    before touching the filesystem)
    /// 2. Ensures the export directory exists
    /// 3. Opens the run log, if requested, and writes its preamble
    /// 4. Exports every clip in order
    /// 5. Writes the trailer and closes the run log
    ///
    /// An empty clip set is not an error; the summary reports
    /// [`RunStatus::NoClipOpened`].
    pub fn execute_export(&self, source: &dyn TrackingSource) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();

        tracing::info!(
            path = %self.request.output_dir.display(),
            scene = source.scene_name(),
            frame_start = self.request.frame_start,
            frame_end = self.request.frame_end,
            selected_only = self.request.selected_only,
            "Starting export process"
        );

        let clips = self.resolve_clips(source)?;
        self.prepare_output_dir()?;

        if self.request.write_log {
            let mut run_log = FileRunLog::create(self.request.output_dir.join(RUN_LOG_FILE_NAME))?;
            summary.log_path = Some(run_log.path().to_path_buf());
            self.run(source, &clips, &mut run_log, &mut summary, start_time)?;
            run_log.finish()?;
        } else {
            self.run(source, &clips, &mut NullRunLog, &mut summary, start_time)?;
        }

        if clips.is_empty() {
            tracing::warn!("No clip to export");
            summary.status = RunStatus::NoClipOpened;
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    fn resolve_clips<'a>(&self, source: &'a dyn TrackingSource) -> Result<Vec<&'a Clip>> {
        if self.request.selected_only {
            source
                .active_clip()
                .map(|clip| vec![clip])
                .ok_or(TrackExportError::NoActiveClip)
        } else {
            Ok(source.list_clips())
        }
    }

    fn prepare_output_dir(&self) -> Result<()> {
        let path = &self.request.output_dir;
        if path.as_os_str().is_empty() {
            return Err(TrackExportError::ExportPath {
                path: path.clone(),
                message: "path is empty".to_string(),
            });
        }

        std::fs::create_dir_all(path).map_err(|e| TrackExportError::ExportPath {
            path: path.clone(),
            message: e.to_string(),
        })?;

        // An existing read-only directory passes create_dir_all
        tempfile::Builder::new()
            .prefix(".trackexport-")
            .tempfile_in(path)
            .and_then(|probe| probe.close())
            .map_err(|e| TrackExportError::ExportPath {
                path: path.clone(),
                message: format!("directory is not writable: {e}"),
            })
    }

    fn run(
        &self,
        source: &dyn TrackingSource,
        clips: &[&Clip],
        run_log: &mut dyn RunLog,
        summary: &mut RunSummary,
        start_time: Instant,
    ) -> Result<()> {
        run_log.append("Starting Export")?;
        run_log.append(&format!(
            "Export path: {}",
            self.request.output_dir.display()
        ))?;
        run_log.append(&format!("Exporting from scene {}", source.scene_name()))?;
        run_log.append(&format!(
            "Exporting from frame {} to {}",
            self.request.frame_start, self.request.frame_end
        ))?;
        run_log.append(RUN_LOG_RULE)?;
        run_log.append("")?;

        for clip in clips {
            if *self.shutdown_signal.borrow() {
                tracing::info!("Shutdown requested, skipping remaining clips");
                summary.interrupted = true;
                break;
            }

            let result = export_clip(
                source,
                clip,
                &self.request,
                &self.request.output_dir,
                run_log,
                &self.shutdown_signal,
            )?;

            let interrupted = result.interrupted;
            summary.add_clip_result(result);
            if interrupted {
                summary.interrupted = true;
                break;
            }
        }

        if summary.interrupted {
            run_log.append("Export interrupted")?;
        }

        run_log.append(RUN_LOG_RULE)?;
        run_log.append(&format!(
            "Export finished ({} s)",
            format_seconds(start_time.elapsed())
        ))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ClipName, TrackName};
    use crate::domain::request::TrackFailurePolicy;
    use crate::domain::scene::{Scene, Track};
    use tempfile::tempdir;
    use test_case::test_case;

    fn scene(active: Option<&str>) -> Scene {
        let shot = Clip::new(ClipName::new("shot.mp4").unwrap(), 1000, 500).with_track(
            Track::new(TrackName::new("T1").unwrap())
                .selected(true)
                .with_marker(1, 0.1, 0.2)
                .with_marker(3, 0.5, 0.5),
        );
        let other = Clip::new(ClipName::new("other.mov").unwrap(), 100, 100)
            .with_track(Track::new(TrackName::new("B").unwrap()).with_marker(1, 0.5, 0.5));

        let mut builder = Scene::builder("Scene").frame_range(1, 3).clip(shot).clip(other);
        if let Some(name) = active {
            builder = builder.active_clip(name);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_export_all_clips() {
        let dir = tempdir().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3);

        let summary = ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(None))
            .unwrap();

        assert_eq!(summary.status, RunStatus::Exported);
        assert_eq!(summary.clips_processed(), 2);
        assert_eq!(summary.files_written(), 2);
        assert!(summary.log_path.is_none());
        assert!(dir.path().join("shot_T1.csv").exists());
        assert!(dir.path().join("other_B.csv").exists());
        assert!(!dir.path().join(RUN_LOG_FILE_NAME).exists());
        assert!(summary.status_message().starts_with("Export done ("));
    }

    #[test]
    fn test_selected_only_uses_active_clip() {
        let dir = tempdir().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3).with_selected_only(true);

        let summary = ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(Some("shot.mp4")))
            .unwrap();

        assert_eq!(summary.clips_processed(), 1);
        assert!(dir.path().join("shot_T1.csv").exists());
        assert!(!dir.path().join("other_B.csv").exists());
    }

    #[test]
    fn test_selected_only_without_active_clip_touches_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("export");
        let request = ExportRequest::new(&out, 1, 3)
            .with_selected_only(true)
            .with_log(true);

        let err = ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(None))
            .unwrap_err();

        assert!(matches!(err, TrackExportError::NoActiveClip));
        assert!(err.is_precondition());
        assert!(!out.exists());
    }

    #[test]
    fn test_creates_missing_base_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("export");
        let request = ExportRequest::new(&out, 1, 3);

        ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(None))
            .unwrap();

        assert!(out.join("shot_T1.csv").exists());
    }

    #[test]
    fn test_unusable_export_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let request = ExportRequest::new(blocker.join("export"), 1, 3);

        let err = ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(None))
            .unwrap_err();

        assert!(matches!(err, TrackExportError::ExportPath { .. }));
    }

    #[cfg(unix)]
    #[test_case(true, TrackFailurePolicy::Abort ; "with run log")]
    #[test_case(false, TrackFailurePolicy::Abort ; "without run log")]
    #[test_case(false, TrackFailurePolicy::Continue ; "continuing past failed tracks")]
    fn test_read_only_export_path(write_log: bool, policy: TrackFailurePolicy) {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let out = dir.path().join("export");
        std::fs::create_dir(&out).unwrap();
        std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Permissions are not enforced for root
        if std::fs::write(out.join("probe"), "").is_ok() {
            std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let request = ExportRequest::new(&out, 1, 3)
            .with_log(write_log)
            .with_failure_policy(policy);

        let result = ExportCoordinator::without_shutdown(request).execute_export(&scene(None));
        std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, TrackExportError::ExportPath { .. }));
        assert!(err.is_precondition());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_writability_check_leaves_no_file() {
        let dir = tempdir().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3);

        ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(None))
            .unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["other_B.csv", "shot_T1.csv"]);
    }

    #[test]
    fn test_run_log_layout() {
        let dir = tempdir().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3)
            .with_selected_only(true)
            .with_log(true);

        let summary = ExportCoordinator::without_shutdown(request)
            .execute_export(&scene(Some("shot.mp4")))
            .unwrap();

        let log_path = dir.path().join(RUN_LOG_FILE_NAME);
        assert_eq!(summary.log_path.as_deref(), Some(log_path.as_path()));

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Starting Export");
        assert_eq!(lines[1], format!("Export path: {}", dir.path().display()));
        assert_eq!(lines[2], "Exporting from scene Scene");
        assert_eq!(lines[3], "Exporting from frame 1 to 3");
        assert_eq!(lines[4], RUN_LOG_RULE);
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Starting movieclip shot.mp4 (1000 x 500 pixels)");
        assert_eq!(lines[7], "  Track T1 started ...");
        assert_eq!(lines[8], "    Missing marker at frame 2.");
        assert_eq!(lines[9], "  Finished Track T1 with errors...");
        assert!(lines[10].starts_with("Finished movieclip shot.mp4 in "));
        assert_eq!(lines[11], "");
        assert_eq!(lines[12], RUN_LOG_RULE);
        assert!(lines[13].starts_with("Export finished ("));
        assert_eq!(lines.len(), 14);
        assert!(content.ends_with(" s)\n"));
    }

    #[test]
    fn test_empty_clip_set_reports_no_clip() {
        let dir = tempdir().unwrap();
        let empty = Scene::builder("Empty").build().unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3).with_log(true);

        let summary = ExportCoordinator::without_shutdown(request)
            .execute_export(&empty)
            .unwrap();

        assert_eq!(summary.status, RunStatus::NoClipOpened);
        assert_eq!(summary.status_message(), "No clip opened...");

        let content = std::fs::read_to_string(dir.path().join(RUN_LOG_FILE_NAME)).unwrap();
        assert!(content.starts_with("Starting Export\n"));
        assert!(content.contains("Export finished ("));
    }

    #[test]
    fn test_shutdown_before_first_clip() {
        let dir = tempdir().unwrap();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let request = ExportRequest::new(dir.path(), 1, 3).with_log(true);

        let summary = ExportCoordinator::new(request, rx)
            .execute_export(&scene(None))
            .unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.clips_processed(), 0);
        assert!(!summary.is_successful());

        let content = std::fs::read_to_string(dir.path().join(RUN_LOG_FILE_NAME)).unwrap();
        assert!(content.contains("Export interrupted\n"));
        assert!(content.contains("Export finished ("));
    }
}
