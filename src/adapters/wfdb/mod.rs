//! WFDB record decoding
//!
//! Supports single-segment records whose signals are stored in formats
//! 80, 16, 61, 160, 212, 24 and 32. Multi-segment records, skewed signals
//! and signals without a data file are rejected as unsupported.

pub mod header;
pub mod reader;
pub mod signal;

pub use header::{HeaderParser, RecordHeader, SignalSpec};
pub use reader::WfdbReader;
