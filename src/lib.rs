//! # wfdb-json - WFDB record to JSON batch converter
//!
//! wfdb-json walks a directory tree of physiological waveform records in
//! WFDB format and writes one self-contained JSON document per record.
//!
//! ## Overview
//!
//! This library provides:
//! - **Discovering** records: one identifier per header file, data files collapse into it
//! - **Decoding** records through the [`adapters::RecordReader`] capability
//! - **Encoding** sample matrices, scalars and calendar values as plain JSON
//! - **Converting** a whole batch with per-record failure isolation
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Encoding, document shaping and batch conversion
//! - [`adapters`] - Record readers (native WFDB)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wfdb_json::adapters::wfdb::WfdbReader;
//! use wfdb_json::config::WfdbJsonConfig;
//! use wfdb_json::core::export::ConversionCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WfdbJsonConfig::default();
//!     let reader = WfdbReader::new(&config.reader, &config.input.header_extension)?;
//!     let (_tx, shutdown) = tokio::sync::watch::channel(false);
//!
//!     let mut coordinator = ConversionCoordinator::new(config, Arc::new(reader), shutdown);
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Converted {} of {} records", summary.converted, summary.discovered);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! Only discovery errors abort a batch. A record that cannot be decoded,
//! encoded or written becomes a [`core::export::ConversionOutcome::Failed`]
//! entry in the summary and the batch moves on.
//!
//! ## Numeric Encoding
//!
//! Sample matrices become nested arrays in row-major order. NaN and infinite
//! values are written as `null` by default, or fail the record when
//! `encoding.non_finite = "fail"`:
//!
//! ```rust
//! use wfdb_json::config::NonFinitePolicy;
//! use wfdb_json::core::encode::{FieldValue, JsonEncoder};
//! use wfdb_json::domain::NdArray;
//!
//! let samples = FieldValue::Array(NdArray::from_floats(vec![0.25, f64::NAN]));
//!
//! let lenient = JsonEncoder::new(NonFinitePolicy::Null);
//! assert_eq!(lenient.encode("p_signal", &samples).unwrap(), serde_json::json!([0.25, null]));
//!
//! let strict = JsonEncoder::new(NonFinitePolicy::Fail);
//! assert!(strict.encode("p_signal", &samples).is_err());
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
