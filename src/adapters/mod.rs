//! Integrations with the tracking host.
//!
//! - [`source`] - The [`TrackingSource`](source::TrackingSource) query trait
//! - [`scene`] - JSON scene documents loaded from disk
//!
//! # Design Pattern
//!
//! Adapters isolate the host's object model from the export core. The core
//! only sees the `TrackingSource` trait, which lets tests drive it with
//! in-memory fixtures.
//!
//! ```rust,no_run
//! use trackexport::adapters::scene::load_scene;
//! use trackexport::adapters::source::TrackingSource;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = load_scene("scene.json")?;
//! for clip in scene.list_clips() {
//!     println!("{} ({} tracks)", clip.name, scene.list_tracks(clip).len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod scene;
pub mod source;
