//! Export summary and reporting
//!
//! Result structures built up while a run walks clips and tracks, and the
//! final [`RunSummary`] handed back to the caller.

use crate::domain::ids::{ClipName, FrameNumber, TrackName};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of exporting a single track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackResult {
    /// Track name
    pub track_name: TrackName,

    /// CSV file the track was written to
    pub output_path: PathBuf,

    /// Number of data rows written (header excluded)
    pub rows_written: usize,

    /// Number of frames in range without a marker
    pub gaps_encountered: usize,

    /// The frames counted in `gaps_encountered`, ascending
    pub missing_frames: Vec<FrameNumber>,

    /// `true` when every frame in range had a marker and the file was written
    pub success: bool,

    /// Write failure, only set when failures are isolated per track
    pub error: Option<String>,
}

impl TrackResult {
    /// Result of a track whose file was written completely
    pub fn completed(
        track_name: TrackName,
        output_path: PathBuf,
        rows_written: usize,
        missing_frames: Vec<FrameNumber>,
    ) -> Self {
        Self {
            track_name,
            output_path,
            rows_written,
            gaps_encountered: missing_frames.len(),
            success: missing_frames.is_empty(),
            missing_frames,
            error: None,
        }
    }

    /// Result of a track whose file could not be written
    pub fn failed(track_name: TrackName, output_path: PathBuf, error: String) -> Self {
        Self {
            track_name,
            output_path,
            rows_written: 0,
            gaps_encountered: 0,
            missing_frames: Vec::new(),
            success: false,
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of exporting one clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipResult {
    /// Clip name
    pub clip_name: ClipName,

    /// Directory the clip's track files went to
    pub output_dir: PathBuf,

    /// One entry per exported track, in export order
    pub track_results: Vec<TrackResult>,

    /// Time spent on this clip
    pub elapsed: Duration,

    /// Tracks were skipped because a shutdown signal arrived
    pub interrupted: bool,
}

impl ClipResult {
    pub fn new(clip_name: ClipName, output_dir: PathBuf) -> Self {
        Self {
            clip_name,
            output_dir,
            track_results: Vec::new(),
            elapsed: Duration::ZERO,
            interrupted: false,
        }
    }

    pub fn tracks_processed(&self) -> usize {
        self.track_results.len()
    }

    pub fn rows_written(&self) -> usize {
        self.track_results.iter().map(|t| t.rows_written).sum()
    }

    pub fn gaps_encountered(&self) -> usize {
        self.track_results.iter().map(|t| t.gaps_encountered).sum()
    }

    /// Every exported track was complete
    pub fn is_successful(&self) -> bool {
        self.track_results.iter().all(|t| t.success)
    }
}

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one clip was processed
    Exported,
    /// There was no clip to export; informational, not an error
    NoClipOpened,
}

/// A track whose CSV file could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTrack {
    pub clip_name: ClipName,
    pub track_name: TrackName,
    pub message: String,
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// How the run ended
    pub status: RunStatus,

    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// Total duration of the run
    pub elapsed: Duration,

    /// Per-clip results in processing order
    pub clip_results: Vec<ClipResult>,

    /// The run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Location of the run log, if one was written
    pub log_path: Option<PathBuf>,
}

impl RunSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            status: RunStatus::Exported,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            clip_results: Vec::new(),
            interrupted: false,
            log_path: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn add_clip_result(&mut self, result: ClipResult) {
        self.clip_results.push(result);
    }

    pub fn clips_processed(&self) -> usize {
        self.clip_results.len()
    }

    pub fn tracks_processed(&self) -> usize {
        self.clip_results.iter().map(ClipResult::tracks_processed).sum()
    }

    /// Number of CSV files written completely
    pub fn files_written(&self) -> usize {
        self.clip_results
            .iter()
            .flat_map(|c| &c.track_results)
            .filter(|t| !t.is_failed())
            .count()
    }

    pub fn rows_written(&self) -> usize {
        self.clip_results.iter().map(ClipResult::rows_written).sum()
    }

    pub fn gaps_encountered(&self) -> usize {
        self.clip_results.iter().map(ClipResult::gaps_encountered).sum()
    }

    /// Tracks whose files could not be written
    pub fn failed_tracks(&self) -> Vec<FailedTrack> {
        self.clip_results
            .iter()
            .flat_map(|clip| {
                clip.track_results.iter().filter_map(move |track| {
                    track.error.as_ref().map(|message| FailedTrack {
                        clip_name: clip.clip_name.clone(),
                        track_name: track.track_name.clone(),
                        message: message.clone(),
                    })
                })
            })
            .collect()
    }

    /// Complete, uninterrupted run without gaps or failed tracks
    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.clip_results.iter().all(ClipResult::is_successful)
    }

    /// Short status line for the user
    pub fn status_message(&self) -> String {
        match self.status {
            RunStatus::NoClipOpened => "No clip opened...".to_string(),
            RunStatus::Exported if self.interrupted => {
                format!("Export interrupted ({} s)", format_seconds(self.elapsed))
            }
            RunStatus::Exported => format!("Export done ({} s)", format_seconds(self.elapsed)),
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            status = ?self.status,
            started_at = %self.started_at.to_rfc3339(),
            clips = self.clips_processed(),
            tracks = self.tracks_processed(),
            files = self.files_written(),
            rows = self.rows_written(),
            gaps = self.gaps_encountered(),
            interrupted = self.interrupted,
            duration_ms = self.elapsed.as_millis() as u64,
            "Export completed"
        );

        let failed = self.failed_tracks();
        if !failed.is_empty() {
            tracing::warn!(failed_count = failed.len(), "Export completed with failed tracks");
            for failure in &failed {
                tracing::warn!(
                    clip = %failure.clip_name,
                    track = %failure.track_name,
                    message = %failure.message,
                    "Track export failed"
                );
            }
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds with four decimals, as used in the run log and status line
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.4}", duration.as_secs_f64())
}
