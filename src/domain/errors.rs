//! Domain error types
//!
//! This module defines the error taxonomy for wfdb-json. Only
//! [`DiscoveryError`] is fatal to a batch; decode, encode and write errors
//! are recovered per record and surface in the conversion summary.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main wfdb-json error type
///
/// This is the primary error type used throughout the application.
/// It wraps the stage-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum WfdbJsonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record discovery errors (fatal to the batch)
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Record decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// JSON encoding errors
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Output write errors
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while walking the input tree
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Input root does not exist
    #[error("Input directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Input root exists but is not a directory
    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Header file whose name is not valid UTF-8
    #[error("Header file name is not valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),

    /// Traversal failed below the root (permission denied, unreadable entry)
    #[error("Failed to traverse {}: {message}", .path.display())]
    Traversal { path: PathBuf, message: String },
}

/// Errors raised by a [`RecordReader`](crate::adapters::RecordReader)
///
/// These don't expose the underlying I/O or parsing types.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Header file missing
    #[error("Header file not found: {}", .0.display())]
    HeaderNotFound(PathBuf),

    /// Failed to read a header or data file
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Header text is malformed
    #[error("Invalid header line {line}: {message}")]
    InvalidHeader { line: usize, message: String },

    /// Sample storage format the reader cannot decode
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(u16),

    /// Data file holds fewer samples than the header announces
    #[error("Truncated data file {}: expected {expected} samples, found {found}", .path.display())]
    Truncated {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// Record feature the reader does not handle
    #[error("Unsupported record feature: {0}")]
    Unsupported(String),
}

/// Errors raised while rendering values as JSON
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// NaN or infinity found while the policy forbids substitution
    #[error("Non-finite value {value} in field '{field}'")]
    NonFinite { field: String, value: f64 },

    /// Array data length does not match the declared shape
    #[error("Array shape {shape:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Value kind with no JSON rendering
    #[error("Type Not Serializable: {kind}")]
    TypeNotSerializable { kind: String },
}

/// Errors raised while persisting an output document
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output directory could not be created
    #[error("Failed to create directory {}: {message}", .path.display())]
    CreateDirectory { path: PathBuf, message: String },

    /// Output file could not be written
    #[error("Failed to write {}: {message}", .path.display())]
    WriteFile { path: PathBuf, message: String },

    /// Another record already owns this output path
    #[error("Output {} already claimed by record {owner}", .path.display())]
    OutputCollision { path: PathBuf, owner: String },
}

/// Stage of the per-record pipeline where a conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Decode,
    Encode,
    Write,
    /// Worker task panicked or was cancelled
    Internal,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Decode => "decode",
            FailureStage::Encode => "encode",
            FailureStage::Write => "write",
            FailureStage::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Failure of a single record conversion
///
/// Never fatal to the batch; the coordinator records it and moves on.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Conversion task failed: {0}")]
    Internal(String),
}

impl ConversionError {
    /// Pipeline stage this error belongs to
    pub fn stage(&self) -> FailureStage {
        match self {
            ConversionError::Decode(_) => FailureStage::Decode,
            ConversionError::Encode(_) => FailureStage::Encode,
            ConversionError::Write(_) => FailureStage::Write,
            ConversionError::Internal(_) => FailureStage::Internal,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for WfdbJsonError {
    fn from(err: std::io::Error) -> Self {
        WfdbJsonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for WfdbJsonError {
    fn from(err: serde_json::Error) -> Self {
        WfdbJsonError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for WfdbJsonError {
    fn from(err: toml::de::Error) -> Self {
        WfdbJsonError::Configuration(format!("TOML parse error: {err}"))
    }
}
