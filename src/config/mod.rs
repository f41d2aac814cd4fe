//! Configuration management for wfdb-json.
//!
//! wfdb-json reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `WFDB_JSON_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! dry_run = false
//!
//! [input]
//! root = "${WFDB_HOME}/ptb-xl/records500"
//! header_extension = "hea"
//!
//! [output]
//! directory = "out/json/ptb-xl"
//! indent = 4
//! layout = "flat"
//!
//! [reader]
//! signal_mode = "physical"
//! expand_frames = false
//!
//! [encoding]
//! non_finite = "null"
//!
//! [conversion]
//! max_concurrency = 4
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use wfdb_json::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("wfdb-json.toml")?;
//! println!("Input root: {}", config.input.root.display());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, ConversionConfig, EncodingConfig, InputConfig, LoggingConfig,
    NonFinitePolicy, OutputConfig, OutputLayout, ReaderConfig, SignalMode, WfdbJsonConfig,
};
