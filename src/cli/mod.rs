//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for wfdb-json using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// wfdb-json - WFDB record to JSON batch converter
#[derive(Parser, Debug)]
#[command(name = "wfdb-json")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "wfdb-json.toml", env = "WFDB_JSON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WFDB_JSON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every record under the input root to JSON
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputLayout;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["wfdb-json", "convert"]);
        assert_eq!(cli.config, "wfdb-json.toml");
        assert!(matches!(cli.command, Commands::Convert(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["wfdb-json", "--config", "custom.toml", "convert"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["wfdb-json", "--log-level", "debug", "convert"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_convert_overrides() {
        let cli = Cli::parse_from([
            "wfdb-json",
            "convert",
            "--input",
            "data/mitdb",
            "--output",
            "out/mitdb",
            "--layout",
            "mirror",
            "--concurrency",
            "8",
            "--dry-run",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.input, Some(PathBuf::from("data/mitdb")));
        assert_eq!(args.output, Some(PathBuf::from("out/mitdb")));
        assert_eq!(args.layout, Some(OutputLayout::Mirror));
        assert_eq!(args.concurrency, Some(8));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_rejects_unknown_layout() {
        let result = Cli::try_parse_from(["wfdb-json", "convert", "--layout", "tree"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["wfdb-json", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["wfdb-json", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
