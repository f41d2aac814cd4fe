//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration file, applies environment overrides, validates it and
//! prints the effective settings.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub show: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Input Root: {}", config.input.root.display());
        println!("  Header Extension: {}", config.input.header_extension);
        println!("  Output Directory: {}", config.output.directory.display());
        println!("  Output Layout: {}", config.output.layout);
        println!("  Indent: {}", config.output.indent);
        println!("  Signal Mode: {:?}", config.reader.signal_mode);
        println!("  Expand Frames: {}", config.reader.expand_frames);
        println!("  Non-finite Floats: {}", config.encoding.non_finite);
        println!("  Max Concurrency: {}", config.conversion.max_concurrency);
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();

        if self.show {
            println!("{}", toml::to_string_pretty(&config)?);
        }

        Ok(0)
    }
}
