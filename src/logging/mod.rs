//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use wfdb_json::config::LoggingConfig;
//! use wfdb_json::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a record conversion
///
/// # Example
///
/// ```no_run
/// use wfdb_json::domain::RecordId;
/// use wfdb_json::log_conversion_start;
///
/// let id = RecordId::new("data/a103l").unwrap();
/// log_conversion_start!(&id);
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($record_id:expr) => {
        tracing::debug!(record_id = %$record_id, "Converting record");
    };
}

/// Log a failed record conversion with its stage and cause
///
/// # Example
///
/// ```no_run
/// use wfdb_json::domain::{ConversionError, DecodeError, RecordId};
/// use wfdb_json::log_conversion_failure;
///
/// let id = RecordId::new("data/a103l").unwrap();
/// let error = ConversionError::from(DecodeError::UnsupportedFormat(8));
/// log_conversion_failure!(&id, error.stage(), &error);
/// ```
#[macro_export]
macro_rules! log_conversion_failure {
    ($record_id:expr, $stage:expr, $error:expr) => {
        tracing::warn!(
            record_id = %$record_id,
            stage = %$stage,
            error = %$error,
            "Could not process record"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use wfdb_json::log_batch_progress;
///
/// log_batch_progress!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Batch progress"
        );
    };
}
