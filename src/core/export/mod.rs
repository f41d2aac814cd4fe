//! Batch conversion
//!
//! This module provides the core conversion logic for wfdb-json, including:
//! - Record discovery over the input tree
//! - Per-record conversion with failure isolation
//! - Batch coordination and summary reporting

pub mod converter;
pub mod coordinator;
pub mod discovery;
pub mod summary;

pub use converter::{
    output_path_for, write_document, ConversionOutcome, ConvertedRecord, RecordConverter,
    RecordFailure,
};
pub use coordinator::{BatchPhase, ConversionCoordinator};
pub use discovery::discover_records;
pub use summary::ConversionSummary;
