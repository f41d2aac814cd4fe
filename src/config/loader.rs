//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::WfdbJsonConfig;
use crate::domain::errors::WfdbJsonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into WfdbJsonConfig
/// 4. Applies environment variable overrides (WFDB_JSON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use wfdb_json::config::loader::load_config;
///
/// let config = load_config("wfdb-json.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<WfdbJsonConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WfdbJsonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        WfdbJsonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: WfdbJsonConfig = toml::from_str(&contents)
        .map_err(|e| WfdbJsonError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<WfdbJsonConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::info!(
        config_path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = WfdbJsonConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut WfdbJsonConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        WfdbJsonError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| WfdbJsonError::Configuration(format!("Invalid substitution pattern: {e}")))?;
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
                    let placeholder = format!("${{{var_name}}}");
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
        return Err(WfdbJsonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        WfdbJsonError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Applies environment variable overrides using the WFDB_JSON_* prefix
///
/// Environment variables follow the pattern: WFDB_JSON_<SECTION>_<KEY>
/// For example: WFDB_JSON_INPUT_ROOT, WFDB_JSON_OUTPUT_DIRECTORY
fn apply_env_overrides(config: &mut WfdbJsonConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("WFDB_JSON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("WFDB_JSON_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("WFDB_JSON_APPLICATION_DRY_RUN", &val)?;
    }

    // Input overrides
    if let Ok(val) = std::env::var("WFDB_JSON_INPUT_ROOT") {
        config.input.root = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("WFDB_JSON_INPUT_HEADER_EXTENSION") {
        config.input.header_extension = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("WFDB_JSON_OUTPUT_DIRECTORY") {
        config.output.directory = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("WFDB_JSON_OUTPUT_INDENT") {
        config.output.indent = parse_override("WFDB_JSON_OUTPUT_INDENT", &val)?;
    }
    if let Ok(val) = std::env::var("WFDB_JSON_OUTPUT_LAYOUT") {
        config.output.layout = parse_override("WFDB_JSON_OUTPUT_LAYOUT", &val)?;
    }

    // Reader overrides
    if let Ok(val) = std::env::var("WFDB_JSON_READER_EXPAND_FRAMES") {
        config.reader.expand_frames = parse_override("WFDB_JSON_READER_EXPAND_FRAMES", &val)?;
    }

    // Encoding overrides
    if let Ok(val) = std::env::var("WFDB_JSON_ENCODING_NON_FINITE") {
        config.encoding.non_finite = parse_override("WFDB_JSON_ENCODING_NON_FINITE", &val)?;
    }

    // Conversion overrides
    if let Ok(val) = std::env::var("WFDB_JSON_CONVERSION_MAX_CONCURRENCY") {
        config.conversion.max_concurrency =
            parse_override("WFDB_JSON_CONVERSION_MAX_CONCURRENCY", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("WFDB_JSON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("WFDB_JSON_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("WFDB_JSON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
