//! Flip Motion configuration system
//!
//! This crate provides centralized configuration for the layout animation
//! engine, loading settings from `flip.toml` with environment variable
//! overrides. Values stay as plain strings and numbers here; the engine
//! validates easing and transform-origin syntax when it converts them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raw TOML value as found in keyframe tables.
pub use toml::Value as ConfigValue;

/// Default file name looked up by [`MotionConfig::load_or_default`].
pub const DEFAULT_CONFIG_FILE: &str = "flip.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`MotionConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Layout-change (FLIP) transition tuning
    pub flip: FlipConfig,
    /// Enter/exit keyframes for keyed lists
    pub presence: PresenceConfig,
    /// Viewport resize handling
    pub resize: ResizeConfig,
    /// Diagnostics
    pub debug: DebugConfig,
}

/// FLIP transition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlipConfig {
    /// Duration of the play step in milliseconds
    pub transition_ms: f64,
    /// Delay before the play step starts, in milliseconds
    pub delay_ms: f64,
    /// CSS timing function (`ease`, `linear`, `cubic-bezier(...)`, `steps(...)`)
    pub easing: String,
    /// CSS transform origin applied during the invert step
    pub transform_origin: String,
}

/// Keyframe table as written in the config file.
///
/// ```toml
/// [presence.exit]
/// duration_ms = 300
/// from = { opacity = 1 }
/// to = { opacity = 0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyframeConfig {
    pub from: BTreeMap<String, ConfigValue>,
    pub to: BTreeMap<String, ConfigValue>,
    pub duration_ms: u32,
}

/// Enter/exit keyframe configuration. Missing tables fall back to the
/// engine's built-in fades.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PresenceConfig {
    pub enter: Option<KeyframeConfig>,
    pub exit: Option<KeyframeConfig>,
}

/// Resize handling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResizeConfig {
    /// Quiet period before cached positions are resynced after a resize
    pub debounce_ms: f64,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Emit the position cache after every pass (test and inspection hook)
    pub report_positions: bool,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            transition_ms: 500.0,
            delay_ms: 0.0,
            easing: "ease".to_string(),
            transform_origin: "50% 50% 0".to_string(),
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 500.0 }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl MotionConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `flip.toml` in the current directory,
    /// or return the default configuration if it is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable numeric values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("FLIP_TRANSITION_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.flip.transition_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("FLIP_DELAY_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.flip.delay_ms = ms;
            }
        }
        if let Ok(easing) = std::env::var("FLIP_EASING") {
            self.flip.easing = easing;
        }
        if let Ok(origin) = std::env::var("FLIP_TRANSFORM_ORIGIN") {
            self.flip.transform_origin = origin;
        }

        if let Ok(val) = std::env::var("FLIP_RESIZE_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.resize.debounce_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("FLIP_REPORT_POSITIONS") {
            self.debug.report_positions = parse_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from flip.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.flip.transition_ms, 500.0);
        assert_eq!(config.flip.delay_ms, 0.0);
        assert_eq!(config.flip.easing, "ease");
        assert_eq!(config.flip.transform_origin, "50% 50% 0");
        assert_eq!(config.resize.debounce_ms, 500.0);
        assert!(config.presence.enter.is_none());
        assert!(!config.debug.report_positions);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MotionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MotionConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: MotionConfig = toml::from_str(
            r#"
            [flip]
            easing = "linear"

            [presence.exit]
            duration_ms = 250
            from = { opacity = 1 }
            to = { opacity = 0, transform = "scale(0.9)" }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.flip.easing, "linear");
        assert_eq!(parsed.flip.transition_ms, 500.0);

        let exit = parsed.presence.exit.unwrap();
        assert_eq!(exit.duration_ms, 250);
        assert_eq!(exit.to.get("transform").and_then(|v| v.as_str()), Some("scale(0.9)"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[flip]\ntransition_ms = 300\ndelay_ms = 20").unwrap();

        let config = MotionConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.flip.transition_ms, 300.0);
        assert_eq!(config.flip.delay_ms, 20.0);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = MotionConfig::load_from_file("/nonexistent/flip.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[flip]\ntransition_ms = \"slow\"").unwrap();

        let err = MotionConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("FLIP_TRANSITION_MS", "250");
            std::env::set_var("FLIP_EASING", "ease-out");
            std::env::set_var("FLIP_REPORT_POSITIONS", "1");
            std::env::set_var("FLIP_DELAY_MS", "not-a-number");
        }

        let mut config = MotionConfig::default();
        config.merge_with_env();

        assert_eq!(config.flip.transition_ms, 250.0);
        assert_eq!(config.flip.easing, "ease-out");
        assert!(config.debug.report_positions);
        assert_eq!(config.flip.delay_ms, 0.0);

        unsafe {
            std::env::remove_var("FLIP_TRANSITION_MS");
            std::env::remove_var("FLIP_EASING");
            std::env::remove_var("FLIP_REPORT_POSITIONS");
            std::env::remove_var("FLIP_DELAY_MS");
        }
    }
}
