//! Logging and observability
//!
//! Diagnostic logging through `tracing`. This is separate from the run log
//! (`log.txt`) that an export writes for its user.
//!
//! # Example
//!
//! ```no_run
//! use trackexport::config::LoggingConfig;
//! use trackexport::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(clip = "shot.mp4", "Processing clip");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use trackexport::log_error_with_context;
/// use trackexport::domain::TrackExportError;
///
/// let error = TrackExportError::NoActiveClip;
/// log_error_with_context!(&error, "Export aborted");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log the outcome of a finished export run
///
/// # Example
///
/// ```no_run
/// use trackexport::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(3, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($files:expr, $duration:expr) => {
        tracing::info!(
            files = $files,
            duration_ms = $duration.as_millis() as u64,
            "Export command completed"
        );
    };
}
