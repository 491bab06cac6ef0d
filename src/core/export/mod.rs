//! Export pipeline
//!
//! - [`coordinator`] - Run orchestration: clip selection, export directory and run log
//! - [`clip`] - Per-clip track selection and file naming
//! - [`track`] - CSV writing for a single track
//! - [`runlog`] - Run log sinks
//! - [`summary`] - Result and reporting types

pub mod clip;
pub mod coordinator;
pub mod runlog;
pub mod summary;
pub mod track;

pub use clip::{export_clip, track_file_name};
pub use coordinator::ExportCoordinator;
pub use runlog::{FileRunLog, MemoryRunLog, NullRunLog, RunLog};
pub use summary::{ClipResult, FailedTrack, RunStatus, RunSummary, TrackResult};
pub use track::export_track;
