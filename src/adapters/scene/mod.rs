//! Scene document adapter
//!
//! Loads a tracking session exported from the tracking host as JSON and turns
//! it into a validated [`Scene`], which implements
//! [`TrackingSource`](crate::adapters::source::TrackingSource).

pub mod models;

pub use models::{ClipDocument, MarkerDocument, SceneDocument, TrackDocument};

use crate::domain::scene::Scene;
use crate::domain::{Result, TrackExportError};
use std::fs;
use std::path::Path;

/// Loads a scene document from a JSON file
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, is not valid JSON,
/// or describes an inconsistent scene.
///
/// # Examples
///
/// ```no_run
/// use trackexport::adapters::scene::load_scene;
///
/// let scene = load_scene("scene.json").expect("Failed to load scene");
/// println!("{} clip(s)", scene.clips().len());
/// ```
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackExportError::Scene(format!(
            "Scene file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TrackExportError::Scene(format!(
            "Failed to read scene file {}: {}",
            path.display(),
            e
        ))
    })?;

    let scene = parse_scene(&contents)?;

    tracing::debug!(
        path = %path.display(),
        scene = %scene.name,
        clips = scene.clips().len(),
        "Loaded scene document"
    );

    Ok(scene)
}

/// Parses a scene document from a JSON string
pub fn parse_scene(contents: &str) -> Result<Scene> {
    let document: SceneDocument = serde_json::from_str(contents)
        .map_err(|e| TrackExportError::Scene(format!("Failed to parse scene JSON: {e}")))?;
    document.to_domain()
}
