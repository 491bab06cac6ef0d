//! Scene domain model
//!
//! A scene holds the movie clips of a tracking session. Each clip owns its
//! tracks, and each track owns a sparse frame → marker mapping. The export
//! core only ever reads these types.

use super::ids::{ClipName, FrameNumber, TrackName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A tracked position in normalized clip coordinates
///
/// `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right corner of the
/// frame. Values outside `[0, 1]` occur when tracking drifted off-frame and
/// are kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
}

impl Marker {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single tracked feature within a clip
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Name, unique within the owning clip
    pub name: TrackName,

    /// Selection state as set by the tracking host
    pub selected: bool,

    markers: BTreeMap<FrameNumber, Marker>,
}

impl Track {
    /// Creates an unselected track without markers
    pub fn new(name: TrackName) -> Self {
        Self {
            name,
            selected: false,
            markers: BTreeMap::new(),
        }
    }

    /// Sets the selection state
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Adds a marker at `frame`, replacing any marker already there
    pub fn with_marker(mut self, frame: FrameNumber, x: f64, y: f64) -> Self {
        self.markers.insert(frame, Marker::new(x, y));
        self
    }

    /// Inserts a marker, returning the one previously stored at `frame`
    pub fn insert_marker(&mut self, frame: FrameNumber, marker: Marker) -> Option<Marker> {
        self.markers.insert(frame, marker)
    }

    /// Marker at `frame`, if the track has one there
    pub fn marker_at(&self, frame: FrameNumber) -> Option<&Marker> {
        self.markers.get(&frame)
    }

    /// All markers ordered by frame
    pub fn markers(&self) -> &BTreeMap<FrameNumber, Marker> {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// First and last frame carrying a marker
    pub fn frame_span(&self) -> Option<(FrameNumber, FrameNumber)> {
        let first = self.markers.keys().next()?;
        let last = self.markers.keys().next_back()?;
        Some((*first, *last))
    }
}

/// A movie clip with its pixel dimensions and tracks
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: ClipName,
    pub width: u32,
    pub height: u32,
    tracks: Vec<Track>,
}

impl Clip {
    /// Creates a clip without tracks
    pub fn new(name: ClipName, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
            tracks: Vec::new(),
        }
    }

    /// Appends a track, keeping insertion order
    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Tracks in tracking-system order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name.as_str() == name)
    }

    /// Frames covered by any track of the clip
    pub fn frame_span(&self) -> Option<(FrameNumber, FrameNumber)> {
        self.tracks
            .iter()
            .filter_map(Track::frame_span)
            .reduce(|(a_start, a_end), (b_start, b_end)| (a_start.min(b_start), a_end.max(b_end)))
    }

    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for track in &self.tracks {
            if !seen.insert(track.name.as_str()) {
                return Err(format!(
                    "Duplicate track name '{}' in clip '{}'",
                    track.name, self.name
                ));
            }
        }
        Ok(())
    }
}

/// A tracking session: clips, the active clip and the scene frame range
///
/// # Examples
///
/// ```
/// use trackexport::domain::scene::{Clip, SceneBuilder, Track};
/// use trackexport::domain::ids::{ClipName, TrackName};
///
/// let clip = Clip::new(ClipName::new("shot.mp4").unwrap(), 1000, 500)
///     .with_track(
///         Track::new(TrackName::new("T1").unwrap())
///             .with_marker(1, 0.1, 0.2)
///             .with_marker(3, 0.5, 0.5),
///     );
///
/// let scene = SceneBuilder::new("Scene")
///     .frame_range(1, 3)
///     .clip(clip)
///     .active_clip("shot.mp4")
///     .build()
///     .unwrap();
///
/// assert_eq!(scene.clips().len(), 1);
/// assert!(scene.active().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Scene name, reported in the run log preamble
    pub name: String,

    /// First frame of the scene range
    pub frame_start: FrameNumber,

    /// Last frame of the scene range (inclusive)
    pub frame_end: FrameNumber,

    clips: Vec<Clip>,
    active_clip: Option<usize>,
}

impl Scene {
    /// Creates a new builder for constructing a Scene
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.name.as_str() == name)
    }

    /// The clip currently shown in the tracking editor, if any
    pub fn active(&self) -> Option<&Clip> {
        self.active_clip.and_then(|idx| self.clips.get(idx))
    }
}

/// Builder for constructing Scene instances
#[derive(Debug)]
pub struct SceneBuilder {
    name: String,
    frame_start: FrameNumber,
    frame_end: FrameNumber,
    clips: Vec<Clip>,
    active_clip: Option<String>,
}

impl SceneBuilder {
    /// Creates a builder with the host's default range of frames 1 to 250
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame_start: 1,
            frame_end: 250,
            clips: Vec::new(),
            active_clip: None,
        }
    }

    /// Sets the inclusive scene frame range
    pub fn frame_range(mut self, start: FrameNumber, end: FrameNumber) -> Self {
        self.frame_start = start;
        self.frame_end = end;
        self
    }

    /// Appends a clip
    pub fn clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Marks the clip with the given name as active
    pub fn active_clip(mut self, name: impl Into<String>) -> Self {
        self.active_clip = Some(name.into());
        self
    }

    /// Builds the Scene
    ///
    /// # Errors
    ///
    /// Returns an error if clip names or track names within a clip repeat, or
    /// if the active clip does not name one of the clips.
    pub fn build(self) -> Result<Scene, String> {
        let mut seen = HashSet::new();
        for clip in &self.clips {
            if !seen.insert(clip.name.as_str()) {
                return Err(format!("Duplicate clip name '{}'", clip.name));
            }
            clip.validate()?;
        }

        let active_clip = match self.active_clip {
            Some(name) => Some(
                self.clips
                    .iter()
                    .position(|c| c.name.as_str() == name)
                    .ok_or_else(|| format!("Active clip '{name}' is not part of the scene"))?,
            ),
            None => None,
        };

        Ok(Scene {
            name: self.name,
            frame_start: self.frame_start,
            frame_end: self.frame_end,
            clips: self.clips,
            active_clip,
        })
    }
}
