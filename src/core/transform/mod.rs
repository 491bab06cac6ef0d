//! Data transformation logic
//!
//! Converts tracked marker data into the values written to export rows.

pub mod pixel;

pub use pixel::{to_pixel, PixelCoordinate};
