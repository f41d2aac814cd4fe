//! Configuration schema types
//!
//! This module defines the configuration structure for wfdb-json. Every
//! section has defaults so an empty file (or no file at all) is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main wfdb-json configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WfdbJsonConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input tree settings
    #[serde(default)]
    pub input: InputConfig,

    /// Output document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Record reader settings
    #[serde(default)]
    pub reader: ReaderConfig,

    /// JSON encoding settings
    #[serde(default)]
    pub encoding: EncodingConfig,

    /// Batch execution settings
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WfdbJsonConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.conversion.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (decode and encode, but write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid application.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Input tree configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Root directory searched recursively for records
    #[serde(default = "default_input_root")]
    pub root: PathBuf,

    /// Header file extension, without the leading dot
    #[serde(default = "default_header_extension")]
    pub header_extension: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("input.root cannot be empty".to_string());
        }
        if self.header_extension.is_empty()
            || self.header_extension.starts_with('.')
            || self.header_extension.contains(['/', '\\'])
        {
            return Err(format!(
                "input.header_extension must be a bare extension such as 'hea', got '{}'",
                self.header_extension
            ));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: default_input_root(),
            header_extension: default_header_extension(),
        }
    }
}

/// Where documents land inside the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// All documents directly in the output directory
    #[default]
    Flat,
    /// Documents mirror the input directory tree
    Mirror,
}

impl FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(OutputLayout::Flat),
            "mirror" => Ok(OutputLayout::Mirror),
            _ => Err(format!(
                "Invalid output layout '{s}'. Must be one of: flat, mirror"
            )),
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLayout::Flat => write!(f, "flat"),
            OutputLayout::Mirror => write!(f, "mirror"),
        }
    }
}

/// Output document configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSON documents (created if missing)
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Spaces per indentation level in the written JSON
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Output layout
    #[serde(default)]
    pub layout: OutputLayout,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        if self.indent > 16 {
            return Err(format!(
                "output.indent must be between 0 and 16, got {}",
                self.indent
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            indent: default_indent(),
            layout: OutputLayout::default(),
        }
    }
}

/// Which sample arrays the reader materializes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalMode {
    /// Calibrated physical values only
    #[default]
    Physical,
    /// Raw digital values only
    Digital,
    /// Both digital and physical values
    Both,
}

impl SignalMode {
    /// Whether digital arrays are produced
    pub fn digital(self) -> bool {
        matches!(self, SignalMode::Digital | SignalMode::Both)
    }

    /// Whether physical arrays are produced
    pub fn physical(self) -> bool {
        matches!(self, SignalMode::Physical | SignalMode::Both)
    }
}

/// Record reader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Sample arrays to produce
    #[serde(default)]
    pub signal_mode: SignalMode,

    /// Keep every sample of multi-frequency signals instead of averaging frames
    #[serde(default)]
    pub expand_frames: bool,
}

/// Handling of NaN and infinite floats, which JSON cannot represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NonFinitePolicy {
    /// Substitute JSON `null`
    #[default]
    Null,
    /// Fail the record with an encode error
    Fail,
}

impl FromStr for NonFinitePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" => Ok(NonFinitePolicy::Null),
            "fail" => Ok(NonFinitePolicy::Fail),
            _ => Err(format!(
                "Invalid non-finite policy '{s}'. Must be one of: null, fail"
            )),
        }
    }
}

impl fmt::Display for NonFinitePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonFinitePolicy::Null => write!(f, "null"),
            NonFinitePolicy::Fail => write!(f, "fail"),
        }
    }
}

/// JSON encoding configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Non-finite float policy
    #[serde(default)]
    pub non_finite: NonFinitePolicy,
}

/// Batch execution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Maximum number of records converted at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl ConversionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > 256 {
            return Err(format!(
                "conversion.max_concurrency must be between 1 and 256, got {}",
                self.max_concurrency
            ));
        }
        Ok(())
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_input_root() -> PathBuf {
    PathBuf::from("data/wfdb")
}

fn default_header_extension() -> String {
    "hea".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("out/json")
}

fn default_indent() -> usize {
    4
}

fn default_max_concurrency() -> usize {
    4
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WfdbJsonConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.indent, 4);
        assert_eq!(config.input.header_extension, "hea");
        assert_eq!(config.encoding.non_finite, NonFinitePolicy::Null);
        assert_eq!(config.reader.signal_mode, SignalMode::Physical);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: WfdbJsonConfig = toml::from_str("").unwrap();
        assert_eq!(config, WfdbJsonConfig::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = WfdbJsonConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("application.log_level"));
    }

    #[test]
    fn test_invalid_header_extension() {
        let mut config = WfdbJsonConfig::default();
        config.input.header_extension = ".hea".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_concurrency() {
        let mut config = WfdbJsonConfig::default();
        config.conversion.max_concurrency = 0;
        assert!(config.validate().is_err());
        config.conversion.max_concurrency = 257;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_indent() {
        let mut config = WfdbJsonConfig::default();
        config.output.indent = 17;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = WfdbJsonConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Mirror".parse::<OutputLayout>().unwrap(), OutputLayout::Mirror);
        assert!("tree".parse::<OutputLayout>().is_err());
        assert_eq!("FAIL".parse::<NonFinitePolicy>().unwrap(), NonFinitePolicy::Fail);
        assert!(SignalMode::Both.digital() && SignalMode::Both.physical());
        assert!(!SignalMode::Physical.digital());
    }

    #[test]
    fn test_enums_in_toml() {
        let config: WfdbJsonConfig = toml::from_str(
            r#"
[output]
layout = "mirror"

[reader]
signal_mode = "both"
expand_frames = true

[encoding]
non_finite = "fail"
"#,
        )
        .unwrap();
        assert_eq!(config.output.layout, OutputLayout::Mirror);
        assert_eq!(config.reader.signal_mode, SignalMode::Both);
        assert!(config.reader.expand_frames);
        assert_eq!(config.encoding.non_finite, NonFinitePolicy::Fail);
    }
}
