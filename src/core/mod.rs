//! Core export logic.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, clip walking and CSV writing
//! - [`transform`] - Normalized-to-pixel coordinate mapping
//!
//! # Export Workflow
//!
//! 1. **Resolve clips**: every clip, or only the active one in selected mode
//! 2. **Prepare**: create the export directory and open the run log
//! 3. **Walk clips**: pick tracks and resolve file names per clip
//! 4. **Write tracks**: one `;`-delimited CSV file per track
//! 5. **Report**: close the run log and return a [`RunSummary`](export::RunSummary)
//!
//! # Example
//!
//! ```rust,no_run
//! use trackexport::adapters::scene::load_scene;
//! use trackexport::core::export::ExportCoordinator;
//! use trackexport::domain::ExportRequest;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = load_scene("scene.json")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let request = ExportRequest::new("export", 1, 250).with_log(true);
//!
//! let summary = ExportCoordinator::new(request, shutdown_rx).execute_export(&scene)?;
//!
//! println!("{}", summary.status_message());
//! println!("Files written: {}", summary.files_written());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
