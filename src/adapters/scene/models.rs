//! Scene document models
//!
//! On-disk JSON representation of a tracking session. These models are
//! separate from the domain types and only handle (de)serialization; use
//! [`SceneDocument::to_domain`] to obtain a validated [`Scene`].

use crate::domain::ids::{ClipName, FrameNumber, TrackName};
use crate::domain::scene::{Clip, Marker, Scene, Track};
use crate::domain::{Result, TrackExportError};
use serde::{Deserialize, Serialize};

/// Root of a scene document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene name
    #[serde(default = "default_scene_name")]
    pub name: String,

    /// First frame of the scene range
    #[serde(default = "default_frame_start")]
    pub frame_start: FrameNumber,

    /// Last frame of the scene range
    #[serde(default = "default_frame_end")]
    pub frame_end: FrameNumber,

    /// Name of the clip open in the tracking editor
    #[serde(default)]
    pub active_clip: Option<String>,

    /// Loaded movie clips
    #[serde(default)]
    pub clips: Vec<ClipDocument>,
}

/// A movie clip entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDocument {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub tracks: Vec<TrackDocument>,
}

/// A track entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDocument {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub markers: Vec<MarkerDocument>,
}

/// A marker entry in normalized coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkerDocument {
    pub frame: FrameNumber,
    pub x: f64,
    pub y: f64,
}

impl SceneDocument {
    /// Convert to the domain Scene
    ///
    /// # Errors
    ///
    /// Returns [`TrackExportError::Scene`] for names that are empty or not a
    /// single path component, non-finite coordinates, repeated marker frames,
    /// repeated clip or track names, or an unknown active clip.
    ///
    /// Clips with a zero width or height are kept (footage that could not be
    /// loaded reports `0x0`); their markers export as `0;0`.
    pub fn to_domain(&self) -> Result<Scene> {
        let mut builder = Scene::builder(self.name.clone())
            .frame_range(self.frame_start, self.frame_end);

        for clip in &self.clips {
            builder = builder.clip(clip.to_domain()?);
        }

        if let Some(active) = &self.active_clip {
            builder = builder.active_clip(active.clone());
        }

        builder.build().map_err(TrackExportError::Scene)
    }
}

impl ClipDocument {
    fn to_domain(&self) -> Result<Clip> {
        let name = ClipName::new(self.name.clone()).map_err(TrackExportError::Scene)?;

        if self.width == 0 || self.height == 0 {
            tracing::warn!(
                clip = %self.name,
                width = self.width,
                height = self.height,
                "Clip has no pixel dimensions, its markers export as 0;0"
            );
        }

        let mut clip = Clip::new(name, self.width, self.height);
        for track in &self.tracks {
            clip = clip.with_track(track.to_domain(&self.name)?);
        }
        Ok(clip)
    }
}

impl TrackDocument {
    fn to_domain(&self, clip_name: &str) -> Result<Track> {
        let name = TrackName::new(self.name.clone()).map_err(|e| {
            TrackExportError::Scene(format!("{e} (clip '{clip_name}')"))
        })?;

        let mut track = Track::new(name).selected(self.selected);
        for marker in &self.markers {
            if !marker.x.is_finite() || !marker.y.is_finite() {
                return Err(TrackExportError::Scene(format!(
                    "Track '{}' in clip '{}' has a non-finite marker at frame {}",
                    self.name, clip_name, marker.frame
                )));
            }

            if track
                .insert_marker(marker.frame, Marker::new(marker.x, marker.y))
                .is_some()
            {
                return Err(TrackExportError::Scene(format!(
                    "Track '{}' in clip '{}' has more than one marker at frame {}",
                    self.name, clip_name, marker.frame
                )));
            }
        }
        Ok(track)
    }
}

fn default_scene_name() -> String {
    "Scene".to_string()
}

fn default_frame_start() -> FrameNumber {
    1
}

fn default_frame_end() -> FrameNumber {
    250
}
