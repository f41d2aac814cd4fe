//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "wfdb-json.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [input] root at your WFDB records");
                println!("  2. Validate configuration: wfdb-json validate-config");
                println!("  3. Run conversion: wfdb-json convert");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration listing every setting with its default
    fn generate_config() -> &'static str {
        r#"# wfdb-json Configuration File
#
# Every setting below shows its default. Values may reference environment
# variables as ${VAR_NAME}; any setting can also be overridden with
# WFDB_JSON_<SECTION>_<KEY>, e.g. WFDB_JSON_OUTPUT_DIRECTORY.

[application]
# trace, debug, info, warn or error
log_level = "info"
# Decode and encode every record without writing files
dry_run = false

[input]
# Root directory searched recursively for records
root = "data/wfdb"
# Header file extension, without the dot
header_extension = "hea"

[output]
# Created if missing; existing documents are overwritten
directory = "out/json"
# Spaces per indentation level (0-16)
indent = 4
# flat: <directory>/<record>.json
# mirror: <directory>/<relative input dir>/<record>.json
layout = "flat"

[reader]
# physical, digital or both
signal_mode = "physical"
# Keep every sample of multi-frequency signals instead of frame averages
expand_frames = false

[encoding]
# NaN and infinity: null (write JSON null) or fail (skip the record)
non_finite = "null"

[conversion]
# Records converted at once (1-256)
max_concurrency = 4

[logging]
# Rolling JSON log files in local_path
local_enabled = false
local_path = "logs"
# daily, hourly or never
local_rotation = "daily"
"#
    }
}
