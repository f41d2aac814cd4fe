//! Record sources for wfdb-json.
//!
//! - [`reader`] - The [`RecordReader`] capability the conversion core depends on
//! - [`wfdb`] - Native WFDB header and signal file decoding
//!
//! # Design Pattern
//!
//! Adapters isolate file-format details from the conversion core. The core
//! only sees the [`RecordReader`] trait, so tests can inject fake readers
//! that produce controlled records.

pub mod reader;
pub mod wfdb;

pub use reader::RecordReader;
