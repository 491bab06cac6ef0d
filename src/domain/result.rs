//! Result type alias for trackexport
//!
//! This module provides a convenient Result type alias that uses
//! `TrackExportError` as the error type.

use super::errors::TrackExportError;

/// Result type alias for trackexport operations
///
/// # Examples
///
/// ```
/// use trackexport::domain::result::Result;
/// use trackexport::domain::errors::TrackExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TrackExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TrackExportError>;
