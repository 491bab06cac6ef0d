//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TrackexportConfig;
use crate::domain::errors::TrackExportError;
use crate::domain::request::TrackFailurePolicy;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TrackexportConfig
/// 4. Applies environment variable overrides (TRACKEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use trackexport::config::loader::load_config;
///
/// let config = load_config("trackexport.toml")?;
/// # Ok::<(), trackexport::domain::TrackExportError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrackexportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TrackExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads `path` if it exists, otherwise the built-in defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<TrackexportConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        parse_config("")
    }
}

/// Same as [`load_config`], starting from TOML text
pub fn parse_config(contents: &str) -> Result<TrackexportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TrackexportConfig = toml::from_str(&contents)
        .map_err(|e| TrackExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        TrackExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged. All missing variables are reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TrackExportError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TrackExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using TRACKEXPORT_* prefix
///
/// Environment variables follow the pattern: TRACKEXPORT_<SECTION>_<KEY>
/// For example: TRACKEXPORT_EXPORT_PATH, TRACKEXPORT_EXPORT_WRITE_LOG
fn apply_env_overrides(config: &mut TrackexportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("TRACKEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("TRACKEXPORT_SOURCE_SCENE_FILE") {
        config.source.scene_file = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_PATH") {
        config.export.path = val;
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_SELECTED_ONLY") {
        config.export.selected_only = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_SUBDIRECTORIES") {
        config.export.subdirectories = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_WRITE_LOG") {
        config.export.write_log = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_FRAME_START") {
        config.export.frame_start = Some(parse_frame("TRACKEXPORT_EXPORT_FRAME_START", &val)?);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_FRAME_END") {
        config.export.frame_end = Some(parse_frame("TRACKEXPORT_EXPORT_FRAME_END", &val)?);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_EXPORT_ON_TRACK_FAILURE") {
        config.export.on_track_failure = match val.to_lowercase().as_str() {
            "abort" => TrackFailurePolicy::Abort,
            "continue" => TrackFailurePolicy::Continue,
            other => {
                return Err(TrackExportError::Configuration(format!(
                    "Invalid TRACKEXPORT_EXPORT_ON_TRACK_FAILURE '{}'. Must be one of: abort, continue",
                    other
                )))
            }
        };
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TRACKEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TRACKEXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_frame(var: &str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| {
        TrackExportError::Configuration(format!(
            "Invalid {} '{}'. Must be an integer frame number",
            var, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TRACKEXPORT_LOADER_TEST_VAR", "renders");
        let input = "path = \"${TRACKEXPORT_LOADER_TEST_VAR}/out\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"renders/out\"\n");
        std::env::remove_var("TRACKEXPORT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TRACKEXPORT_LOADER_MISSING_A");
        std::env::remove_var("TRACKEXPORT_LOADER_MISSING_B");
        let input = "a = \"${TRACKEXPORT_LOADER_MISSING_A}\"\nb = \"${TRACKEXPORT_LOADER_MISSING_B}\"";

        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("TRACKEXPORT_LOADER_MISSING_A"));
        assert!(err.contains("TRACKEXPORT_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("TRACKEXPORT_LOADER_IN_COMMENT");
        let input = "# path = \"${TRACKEXPORT_LOADER_IN_COMMENT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "# path = \"${TRACKEXPORT_LOADER_IN_COMMENT}\"\n");
    }

    #[test]
    fn test_parse_frame() {
        assert_eq!(parse_frame("X", " 42 ").unwrap(), 42);
        assert_eq!(parse_frame("X", "-5").unwrap(), -5);
        assert!(parse_frame("X", "ten").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(TrackExportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[source]
scene_file = "shots/scene.json"

[export]
path = "tracking"
subdirectories = true
write_log = true
frame_start = 10
frame_end = 20
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.source.scene_file, "shots/scene.json");
        assert!(config.export.subdirectories);
        assert!(config.export.write_log);
        assert_eq!(config.export.frame_start, Some(10));
        assert_eq!(config.export.frame_end, Some(20));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("definitely-missing-trackexport.toml").unwrap();
        assert_eq!(config.source.scene_file, "scene.json");
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let result = parse_config("[export\npath = ");
        assert!(matches!(result, Err(TrackExportError::Configuration(_))));
    }
}
