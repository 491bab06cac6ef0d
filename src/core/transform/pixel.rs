//! Normalized → pixel coordinate mapping
//!
//! Marker positions are stored relative to the clip frame. Exported rows use
//! integer pixel coordinates instead.

use crate::domain::scene::Marker;
use serde::Serialize;

/// Integer pixel position within (or, after drift, outside of) a clip frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PixelCoordinate {
    pub x: i64,
    pub y: i64,
}

/// Maps a normalized marker position to pixel space
///
/// Each axis is scaled by the clip dimension and rounded half-to-even, so
/// `1.5 → 2` and `2.5 → 2`. Results are not clamped to the frame.
///
/// # Examples
///
/// ```
/// use trackexport::core::transform::pixel::{to_pixel, PixelCoordinate};
/// use trackexport::domain::Marker;
///
/// let pixel = to_pixel(&Marker::new(0.1, 0.2), 1000, 500);
/// assert_eq!(pixel, PixelCoordinate { x: 100, y: 100 });
/// ```
pub fn to_pixel(marker: &Marker, width: u32, height: u32) -> PixelCoordinate {
    PixelCoordinate {
        x: scale_axis(marker.x, width),
        y: scale_axis(marker.y, height),
    }
}

fn scale_axis(normalized: f64, extent: u32) -> i64 {
    (normalized * f64::from(extent)).round_ties_even() as i64
}
