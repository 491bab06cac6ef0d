//! Domain identifier types with validation
//!
//! Newtype wrappers for clip and track names so the two can't be mixed up
//! when building output paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame number within a clip's timeline
pub type FrameNumber = i64;

/// Checks that `name` can be used as a single path component
///
/// Names end up in output directory and file names, so they must not carry
/// separators or refer to the current or parent directory.
fn validate_name(kind: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{kind} name cannot be empty"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(format!(
            "{kind} name '{name}' cannot contain path separators"
        ));
    }
    if name == "." || name == ".." {
        return Err(format!("{kind} name '{name}' is not a valid file name"));
    }
    Ok(())
}

/// Clip name newtype wrapper
///
/// Usually the file name of the source footage (e.g. `shot.mp4`).
///
/// # Examples
///
/// ```
/// use trackexport::domain::ids::ClipName;
/// use std::str::FromStr;
///
/// let clip = ClipName::from_str("shot.mp4").unwrap();
/// assert_eq!(clip.base_name(), "shot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipName(String);

impl ClipName {
    /// Creates a new ClipName from a string
    ///
    /// # Returns
    ///
    /// Returns `Err` if the name is empty, contains `/` or `\`, or is `.`
    /// or `..`
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        validate_name("Clip", &name)?;
        Ok(Self(name))
    }

    /// Returns the clip name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Everything before the first `.` of the name
    ///
    /// This is deliberately not "strip the extension": `a.b.c` yields `a`,
    /// and a name starting with `.` yields an empty string. Output file names
    /// downstream depend on exactly this rule.
    pub fn base_name(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClipName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ClipName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Track name newtype wrapper
///
/// Unique within its clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackName(String);

impl TrackName {
    /// Creates a new TrackName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        validate_name("Track", &name)?;
        Ok(Self(name))
    }

    /// Returns the track name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TrackName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TrackName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_clip_name_valid() {
        let clip = ClipName::new("shot.mp4").unwrap();
        assert_eq!(clip.as_str(), "shot.mp4");
        assert_eq!(clip.to_string(), "shot.mp4");
    }

    #[test]
    fn test_clip_name_empty() {
        assert!(ClipName::new("").is_err());
        assert!(ClipName::new("   ").is_err());
    }

    #[test]
    fn test_clip_base_name_single_extension() {
        let clip = ClipName::new("shot.mp4").unwrap();
        assert_eq!(clip.base_name(), "shot");
    }

    #[test]
    fn test_clip_base_name_splits_on_first_dot() {
        let clip = ClipName::new("a.b.c").unwrap();
        assert_eq!(clip.base_name(), "a");
    }

    #[test]
    fn test_clip_base_name_without_dot() {
        let clip = ClipName::new("footage").unwrap();
        assert_eq!(clip.base_name(), "footage");
    }

    #[test]
    fn test_clip_base_name_leading_dot() {
        let clip = ClipName::new(".hidden.mov").unwrap();
        assert_eq!(clip.base_name(), "");
    }

    #[test]
    fn test_track_name_valid() {
        let track = TrackName::from_str("Track.001").unwrap();
        assert_eq!(track.as_str(), "Track.001");
        assert_eq!(track.clone().into_inner(), "Track.001".to_string());
    }

    #[test]
    fn test_track_name_empty() {
        assert!(TrackName::new("").is_err());
    }

    #[test_case("/tmp/outside" ; "absolute path")]
    #[test_case("footage/shot.mp4" ; "forward slash")]
    #[test_case("footage\\shot.mp4" ; "backslash")]
    #[test_case("C:\\shot.mp4" ; "windows drive")]
    #[test_case("." ; "current dir")]
    #[test_case(".." ; "parent dir")]
    #[test_case("shot\0.mp4" ; "nul byte")]
    fn test_names_rejecting_path_shapes(name: &str) {
        assert!(ClipName::new(name).is_err());
        assert!(TrackName::new(name).is_err());
    }

    #[test]
    fn test_names_with_inner_dots_allowed() {
        assert!(ClipName::new("..shot.mp4").is_ok());
        assert!(TrackName::new("Track.001").is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let clip = ClipName::new("shot.mp4").unwrap();
        let json = serde_json::to_string(&clip).unwrap();
        assert_eq!(json, "\"shot.mp4\"");
    }
}
