//! Track exporter
//!
//! Writes one track over a frame range into a semicolon-delimited CSV file:
//!
//! ```text
//! frame;x;y
//! 1;100;100
//! 3;500;250
//! ```
//!
//! Frames without a marker produce no row. They are reported to the run log
//! and mark the track as exported "with errors".

use crate::adapters::source::TrackingSource;
use crate::core::export::runlog::RunLog;
use crate::core::export::summary::TrackResult;
use crate::core::transform::to_pixel;
use crate::domain::ids::FrameNumber;
use crate::domain::scene::Track;
use crate::domain::{Result, TrackExportError};
use serde::Serialize;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::Path;

/// Header row of every track file
pub const CSV_HEADER: [&str; 3] = ["frame", "x", "y"];

/// Field delimiter of track files
pub const CSV_DELIMITER: u8 = b';';

/// One data row of a track file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub frame: FrameNumber,
    pub x: i64,
    pub y: i64,
}

/// Exports `track` for every frame of `frames` into `output_path`
///
/// Any existing file at `output_path` is truncated. The file is closed before
/// this function returns, on success and on error alike.
///
/// # Errors
///
/// Returns [`TrackExportError::TrackFile`] if the file cannot be created or
/// written, and [`TrackExportError::RunLog`] if the run log rejects a line.
/// Missing markers are not errors.
pub fn export_track(
    source: &dyn TrackingSource,
    track: &Track,
    dimensions: (u32, u32),
    frames: RangeInclusive<FrameNumber>,
    output_path: &Path,
    run_log: &mut dyn RunLog,
) -> Result<TrackResult> {
    tracing::debug!(
        track = %track.name,
        path = %output_path.display(),
        frame_start = *frames.start(),
        frame_end = *frames.end(),
        "Exporting track"
    );

    run_log.append(&format!("  Track {} started ...", track.name))?;

    let (rows_written, missing_frames) =
        write_track_file(source, track, dimensions, frames, output_path, run_log)?;

    let result = TrackResult::completed(
        track.name.clone(),
        output_path.to_path_buf(),
        rows_written,
        missing_frames,
    );

    if result.gaps_encountered > 0 {
        tracing::warn!(
            track = %track.name,
            gaps = result.gaps_encountered,
            "Track has frames without markers"
        );
    }

    run_log.append(&format!(
        "  Finished Track {} {}...",
        track.name,
        if result.success {
            "successfully"
        } else {
            "with errors"
        }
    ))?;

    Ok(result)
}

fn write_track_file(
    source: &dyn TrackingSource,
    track: &Track,
    (width, height): (u32, u32),
    frames: RangeInclusive<FrameNumber>,
    output_path: &Path,
    run_log: &mut dyn RunLog,
) -> Result<(usize, Vec<FrameNumber>)> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_path(output_path)
        .map_err(|e| track_file_error(output_path, e))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| track_file_error(output_path, e))?;

    let mut rows_written = 0;
    let mut missing_frames = Vec::new();

    for frame in frames {
        match source.marker_at(track, frame) {
            Some(marker) => {
                let pixel = to_pixel(&marker, width, height);
                writer
                    .serialize(ExportRow {
                        frame,
                        x: pixel.x,
                        y: pixel.y,
                    })
                    .map_err(|e| track_file_error(output_path, e))?;
                rows_written += 1;
            }
            None => {
                tracing::debug!(track = %track.name, frame, "Missing marker");
                run_log.append(&format!("    Missing marker at frame {frame}."))?;
                missing_frames.push(frame);
            }
        }
    }

    writer
        .flush()
        .map_err(|e| track_file_error(output_path, e))?;

    Ok((rows_written, missing_frames))
}

fn track_file_error(path: &Path, err: impl Display) -> TrackExportError {
    TrackExportError::TrackFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
