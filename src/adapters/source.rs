//! Tracking source abstraction
//!
//! The export core never reaches into a host application directly. It asks a
//! [`TrackingSource`] for clips, tracks and markers instead, so the same
//! pipeline runs against a scene document, an embedding host or test fixtures.

use crate::domain::ids::FrameNumber;
use crate::domain::scene::{Clip, Marker, Scene, Track};

/// Read-only query interface over tracking data
///
/// Only `scene_name`, `frame_range`, `list_clips` and `active_clip` are
/// required; the per-clip and per-track queries default to reading the
/// domain types directly.
pub trait TrackingSource {
    /// Name of the scene the clips belong to
    fn scene_name(&self) -> &str;

    /// Inclusive frame range configured on the scene
    fn frame_range(&self) -> (FrameNumber, FrameNumber);

    /// Every clip currently loaded
    fn list_clips(&self) -> Vec<&Clip>;

    /// The clip the user is working on, if one is open
    fn active_clip(&self) -> Option<&Clip>;

    /// Tracks of `clip` in tracking-system order
    fn list_tracks<'a>(&'a self, clip: &'a Clip) -> Vec<&'a Track> {
        clip.tracks().iter().collect()
    }

    /// Marker of `track` at `frame`, `None` for a gap
    fn marker_at(&self, track: &Track, frame: FrameNumber) -> Option<Marker> {
        track.marker_at(frame).copied()
    }

    /// Pixel dimensions `(width, height)` of `clip`
    fn dimensions(&self, clip: &Clip) -> (u32, u32) {
        (clip.width, clip.height)
    }
}

impl TrackingSource for Scene {
    fn scene_name(&self) -> &str {
        &self.name
    }

    fn frame_range(&self) -> (FrameNumber, FrameNumber) {
        (self.frame_start, self.frame_end)
    }

    fn list_clips(&self) -> Vec<&Clip> {
        self.clips().iter().collect()
    }

    fn active_clip(&self) -> Option<&Clip> {
        self.active()
    }
}
