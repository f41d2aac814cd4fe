//! Convert command implementation
//!
//! This module implements the `convert` command, which turns every record
//! under the input root into one JSON document.

use crate::adapters::wfdb::WfdbReader;
use crate::config::{load_config_or_default, NonFinitePolicy, OutputLayout, WfdbJsonConfig};
use crate::core::export::{ConversionCoordinator, ConversionSummary};
use crate::domain::WfdbJsonError;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Failures listed individually before the rest are summarized
const MAX_LISTED_FAILURES: usize = 20;

/// Arguments for the convert command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input root directory (overrides input.root)
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output directory (overrides output.directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Decode and encode every record without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum records converted at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Output layout (flat or mirror)
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<OutputLayout>,

    /// Non-finite float handling (null or fail)
    #[arg(long, value_name = "POLICY")]
    pub non_finite: Option<NonFinitePolicy>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting convert command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("DRY RUN MODE - No files will be written");
            println!();
        }

        let reader = match WfdbReader::new(&config.reader, &config.input.header_extension) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create record reader");
                eprintln!("Failed to initialize conversion: {e}");
                return Ok(5);
            }
        };

        println!("Input:  {}", config.input.root.display());
        println!("Output: {} ({})", config.output.directory.display(), config.output.layout);
        println!();

        let mut coordinator = ConversionCoordinator::new(config, Arc::new(reader), shutdown_signal);
        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(e @ WfdbJsonError::Discovery(_)) => {
                tracing::error!(error = %e, "Record discovery failed");
                eprintln!("Record discovery failed: {e}");
                return Ok(5);
            }
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("Conversion failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("Conversion interrupted. Run the same command again to convert the rest.");
            tracing::info!("Conversion interrupted by user signal");
            130
        } else if summary.discovered == 0 {
            println!("No records found.");
            0
        } else if summary.is_successful() {
            println!("Conversion completed successfully!");
            0
        } else {
            println!("Conversion completed with failures");
            0
        };

        Ok(exit_code)
    }

    /// Applies command-line overrides on top of file and environment settings
    fn apply_overrides(&self, config: &mut WfdbJsonConfig) {
        if let Some(input) = &self.input {
            tracing::info!(input = %input.display(), "Overriding input root from CLI");
            config.input.root = input.clone();
        }
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output directory from CLI");
            config.output.directory = output.clone();
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding max concurrency from CLI");
            config.conversion.max_concurrency = concurrency;
        }
        if let Some(layout) = self.layout {
            tracing::info!(layout = %layout, "Overriding output layout from CLI");
            config.output.layout = layout;
        }
        if let Some(policy) = self.non_finite {
            tracing::info!(policy = %policy, "Overriding non-finite policy from CLI");
            config.encoding.non_finite = policy;
        }
    }
}

fn print_summary(summary: &ConversionSummary) {
    println!();
    println!("Conversion Summary:");
    println!("  Discovered: {}", summary.discovered);
    println!("  Converted: {}", summary.converted);
    println!("  Failed: {}", summary.failed);
    if summary.not_scheduled > 0 {
        println!("  Not scheduled: {}", summary.not_scheduled);
    }
    if summary.dry_run {
        println!("  Dry run: nothing written");
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.failures.is_empty() {
        println!("Could not process:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!(
                "  - {} [{}]: {}",
                failure.record_id,
                failure.error.stage(),
                failure.error
            );
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }
}
