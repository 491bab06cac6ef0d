//! Run log sinks
//!
//! The run log is a plain-text account of an export run, written next to the
//! CSV files for the person who started the export. It is separate from the
//! diagnostic `tracing` output.

use crate::domain::{Result, TrackExportError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the run log inside the export directory
pub const RUN_LOG_FILE_NAME: &str = "log.txt";

/// Separator line framing the per-clip sections
pub const RUN_LOG_RULE: &str = "-----------------------------------------------------------";

/// Append-only sink for run log lines
pub trait RunLog {
    /// Appends one line; the sink adds the line terminator
    fn append(&mut self, line: &str) -> Result<()>;
}

/// Sink used when no run log was requested
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRunLog;

impl RunLog for NullRunLog {
    fn append(&mut self, _line: &str) -> Result<()> {
        Ok(())
    }
}

/// Run log backed by a file, truncated when opened
///
/// The handle is released when the value is dropped, so an aborted run
/// still leaves a closed file behind. Call [`FileRunLog::finish`] to surface
/// flush errors.
#[derive(Debug)]
pub struct FileRunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileRunLog {
    /// Creates (or truncates) the log file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| {
            TrackExportError::RunLog(format!("Failed to create {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Opened run log");

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and closes the file
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|e| {
            TrackExportError::RunLog(format!("Failed to flush {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "Closed run log");
        Ok(())
    }
}

impl RunLog for FileRunLog {
    fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|e| {
            TrackExportError::RunLog(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

/// In-memory run log, for hosts that display the log themselves
#[derive(Debug, Default, Clone)]
pub struct MemoryRunLog {
    lines: Vec<String>,
}

impl MemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whole log as it would appear in `log.txt`
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl RunLog for MemoryRunLog {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}
