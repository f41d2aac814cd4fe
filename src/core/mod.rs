//! Core business logic for wfdb-json.
//!
//! # Modules
//!
//! - [`encode`] - JSON rendering of extended numeric and calendar values
//! - [`transform`] - Decoded record to output document shaping
//! - [`export`] - Discovery, per-record conversion and batch coordination
//!
//! # Conversion Workflow
//!
//! 1. **Discover**: walk the input root and collect unique record identifiers
//! 2. **Plan**: assign every record its output path
//! 3. **Convert**: decode, shape, encode and write each record independently
//! 4. **Report**: summarize converted and failed records
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wfdb_json::adapters::wfdb::WfdbReader;
//! use wfdb_json::config::load_config;
//! use wfdb_json::core::export::ConversionCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("wfdb-json.toml")?;
//! let reader = WfdbReader::new(&config.reader, &config.input.header_extension)?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let mut coordinator = ConversionCoordinator::new(config, Arc::new(reader), shutdown_rx);
//! let summary = coordinator.execute().await?;
//!
//! println!("Converted: {}", summary.converted);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod encode;
pub mod export;
pub mod transform;
