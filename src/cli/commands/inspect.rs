//! Inspect command implementation
//!
//! Lists the clips and tracks of a scene document with their marker
//! coverage, so users can pick a frame range and selection before exporting.

use crate::adapters::scene::load_scene;
use crate::adapters::source::TrackingSource;
use crate::config::load_config_or_default;
use crate::domain::ids::FrameNumber;
use crate::domain::scene::{Clip, Scene, Track};
use clap::Args;
use serde::Serialize;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Override the scene document to inspect
    #[arg(long)]
    pub scene: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Overview of a scene
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SceneReport {
    pub name: String,
    pub frame_start: FrameNumber,
    pub frame_end: FrameNumber,
    pub active_clip: Option<String>,
    /// Union of the frames covered by any track of any clip
    pub tracked_span: Option<(FrameNumber, FrameNumber)>,
    pub clips: Vec<ClipReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClipReport {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tracked_span: Option<(FrameNumber, FrameNumber)>,
    pub tracks: Vec<TrackReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackReport {
    pub name: String,
    pub selected: bool,
    pub markers: usize,
    pub tracked_span: Option<(FrameNumber, FrameNumber)>,
    /// Frames of the scene range that would export without a gap
    pub frames_covered: usize,
    pub frames_in_range: usize,
}

impl SceneReport {
    /// Builds the report for `scene`
    pub fn from_scene(scene: &Scene) -> Self {
        let (frame_start, frame_end) = scene.frame_range();
        let clips: Vec<ClipReport> = scene
            .list_clips()
            .into_iter()
            .map(|clip| ClipReport::from_clip(scene, clip, frame_start, frame_end))
            .collect();

        Self {
            name: scene.name.clone(),
            frame_start,
            frame_end,
            active_clip: scene.active_clip().map(|c| c.name.to_string()),
            tracked_span: clips
                .iter()
                .filter_map(|c| c.tracked_span)
                .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1))),
            clips,
        }
    }
}

impl ClipReport {
    fn from_clip(scene: &Scene, clip: &Clip, start: FrameNumber, end: FrameNumber) -> Self {
        let (width, height) = scene.dimensions(clip);
        Self {
            name: clip.name.to_string(),
            width,
            height,
            tracked_span: clip.frame_span(),
            tracks: scene
                .list_tracks(clip)
                .into_iter()
                .map(|track| TrackReport::from_track(track, start, end))
                .collect(),
        }
    }
}

impl TrackReport {
    fn from_track(track: &Track, start: FrameNumber, end: FrameNumber) -> Self {
        // BTreeMap::range panics on an inverted range
        let (frames_in_range, frames_covered) = if start > end {
            (0, 0)
        } else {
            (
                (end - start) as usize + 1,
                track.markers().range(start..=end).count(),
            )
        };
        Self {
            name: track.name.to_string(),
            selected: track.selected,
            markers: track.marker_count(),
            tracked_span: track.frame_span(),
            frames_covered,
            frames_in_range,
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let scene_file = match &self.scene {
            Some(scene) => scene.clone(),
            None => match load_config_or_default(config_path) {
                Ok(config) => config.source.scene_file,
                Err(e) => {
                    eprintln!("Failed to load configuration: {e}");
                    return Ok(2);
                }
            },
        };

        tracing::info!(scene_file = %scene_file, "Inspecting scene");

        let scene = match load_scene(&scene_file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to load scene: {e}");
                return Ok(3);
            }
        };

        let report = SceneReport::from_scene(&scene);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(0);
        }

        print_report(&report);
        Ok(0)
    }
}

fn describe_span(span: Option<(FrameNumber, FrameNumber)>) -> String {
    match span {
        Some((start, end)) => format!("{start} - {end}"),
        None => "no markers".to_string(),
    }
}

fn print_report(report: &SceneReport) {
    println!("🎞️  Scene {}", report.name);
    println!("  Frame range: {} - {}", report.frame_start, report.frame_end);
    println!("  Tracked frames: {}", describe_span(report.tracked_span));
    println!(
        "  Active clip: {}",
        report.active_clip.as_deref().unwrap_or("none")
    );
    println!();

    if report.clips.is_empty() {
        println!("No clip opened...");
        return;
    }

    for clip in &report.clips {
        println!(
            "🎬 {} ({} x {} pixels), tracked frames: {}",
            clip.name,
            clip.width,
            clip.height,
            describe_span(clip.tracked_span)
        );
        for track in &clip.tracks {
            println!(
                "  {} {}: {} marker(s), {}, {}/{} frame(s) covered",
                if track.selected { "●" } else { "○" },
                track.name,
                track.markers,
                describe_span(track.tracked_span),
                track.frames_covered,
                track.frames_in_range
            );
        }
        println!();
    }
}
