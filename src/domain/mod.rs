//! Domain models and types for trackexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed names** ([`ClipName`], [`TrackName`])
//! - **Scene model** ([`Scene`], [`Clip`], [`Track`], [`Marker`])
//! - **Run parameters** ([`ExportRequest`], [`TrackFailurePolicy`])
//! - **Error types** ([`TrackExportError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use trackexport::domain::{Clip, ClipName, Scene, Track, TrackName};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = Scene::builder("Scene")
//!     .frame_range(1, 100)
//!     .clip(
//!         Clip::new(ClipName::new("shot.mp4")?, 1920, 1080)
//!             .with_track(Track::new(TrackName::new("T1")?).with_marker(1, 0.5, 0.5)),
//!     )
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod request;
pub mod result;
pub mod scene;

// Re-export commonly used types for convenience
pub use errors::TrackExportError;
pub use ids::{ClipName, FrameNumber, TrackName};
pub use request::{ExportRequest, TrackFailurePolicy};
pub use result::Result;
pub use scene::{Clip, Marker, Scene, SceneBuilder, Track};
