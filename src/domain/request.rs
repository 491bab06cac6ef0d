//! Export request
//!
//! The parameter set of one export run. It is assembled by a front end (the
//! CLI, or a host integration) and is never modified while the run executes.

use super::ids::FrameNumber;
use crate::config::schema::ExportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when a track's CSV file cannot be created or written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackFailurePolicy {
    /// Abort the whole run on the first failing track
    #[default]
    Abort,
    /// Record the failure on the track result and carry on with the next track
    Continue,
}

impl std::fmt::Display for TrackFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackFailurePolicy::Abort => write!(f, "abort"),
            TrackFailurePolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Parameters of a single export run
///
/// `frame_start > frame_end` is accepted and produces header-only files.
///
/// # Examples
///
/// ```
/// use trackexport::domain::request::ExportRequest;
///
/// let request = ExportRequest::new("/tmp/export", 1, 250)
///     .with_subdirectories(true)
///     .with_log(true);
///
/// assert_eq!(request.frame_count(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Base directory receiving the CSV files and the run log
    pub output_dir: PathBuf,

    /// Export only the active clip and its selected tracks
    pub selected_only: bool,

    /// Put each clip's files into a subdirectory named after the clip
    pub use_subdirectories: bool,

    /// Write `log.txt` into the output directory
    pub write_log: bool,

    /// First exported frame
    pub frame_start: FrameNumber,

    /// Last exported frame (inclusive)
    pub frame_end: FrameNumber,

    /// Handling of per-track write failures
    pub on_track_failure: TrackFailurePolicy,
}

impl ExportRequest {
    /// Creates a request exporting every clip and track without a run log
    pub fn new(
        output_dir: impl Into<PathBuf>,
        frame_start: FrameNumber,
        frame_end: FrameNumber,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            selected_only: false,
            use_subdirectories: false,
            write_log: false,
            frame_start,
            frame_end,
            on_track_failure: TrackFailurePolicy::default(),
        }
    }

    /// Builds a request from the `[export]` configuration section
    ///
    /// Frame bounds missing from the configuration fall back to
    /// `default_range`, which is normally the scene's own frame range.
    pub fn from_config(config: &ExportConfig, default_range: (FrameNumber, FrameNumber)) -> Self {
        Self {
            output_dir: PathBuf::from(&config.path),
            selected_only: config.selected_only,
            use_subdirectories: config.subdirectories,
            write_log: config.write_log,
            frame_start: config.frame_start.unwrap_or(default_range.0),
            frame_end: config.frame_end.unwrap_or(default_range.1),
            on_track_failure: config.on_track_failure,
        }
    }

    pub fn with_selected_only(mut self, selected_only: bool) -> Self {
        self.selected_only = selected_only;
        self
    }

    pub fn with_subdirectories(mut self, use_subdirectories: bool) -> Self {
        self.use_subdirectories = use_subdirectories;
        self
    }

    pub fn with_log(mut self, write_log: bool) -> Self {
        self.write_log = write_log;
        self
    }

    pub fn with_failure_policy(mut self, policy: TrackFailurePolicy) -> Self {
        self.on_track_failure = policy;
        self
    }

    /// Number of frames in the range, zero for an inverted range
    pub fn frame_count(&self) -> u64 {
        if self.frame_start > self.frame_end {
            0
        } else {
            self.frame_end.abs_diff(self.frame_start).saturating_add(1)
        }
    }
}
