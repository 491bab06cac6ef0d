//! # trackexport - motion-tracking trajectory export
//!
//! trackexport writes the 2D marker trajectories of a tracking session to
//! one `;`-delimited CSV file per track, in pixel coordinates.
//!
//! ## Overview
//!
//! - **Reading** clips, tracks and markers through the
//!   [`TrackingSource`](adapters::source::TrackingSource) trait
//! - **Mapping** normalized marker positions to integer pixels
//! - **Writing** `frame;x;y` files per track, optionally one directory per clip
//! - **Reporting** gaps in a plain-text run log (`log.txt`) and a [`RunSummary`](core::export::RunSummary)
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline and coordinate mapping
//! - [`adapters`] - Tracking source trait and JSON scene documents
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured diagnostic logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trackexport::adapters::scene::load_scene;
//! use trackexport::adapters::source::TrackingSource;
//! use trackexport::core::export::ExportCoordinator;
//! use trackexport::domain::ExportRequest;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = load_scene("scene.json")?;
//!     let (start, end) = scene.frame_range();
//!
//!     let request = ExportRequest::new("export", start, end)
//!         .with_subdirectories(true)
//!         .with_log(true);
//!
//!     let summary = ExportCoordinator::without_shutdown(request).execute_export(&scene)?;
//!     println!("{}", summary.status_message());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::TrackExportError`]. Missing markers are
//! not errors: they are logged and mark the track as exported "with errors".

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
