//! Domain models and types for wfdb-json.
//!
//! The domain layer provides:
//! - **Record identifiers** ([`RecordId`]) used as the deduplication key
//! - **Decoded records** ([`DecodedRecord`]) and their numeric arrays ([`NdArray`])
//! - **Error types** ([`WfdbJsonError`] and one enum per failure class)
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! ```rust
//! use wfdb_json::domain::{DiscoveryError, Result, WfdbJsonError};
//! use std::path::PathBuf;
//!
//! fn example() -> Result<()> {
//!     Err(DiscoveryError::RootNotFound(PathBuf::from("missing")).into())
//! }
//!
//! assert!(matches!(example(), Err(WfdbJsonError::Discovery(_))));
//! ```

pub mod array;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use array::{NdArray, NdData};
pub use errors::{
    ConversionError, DecodeError, DiscoveryError, EncodeError, FailureStage, WfdbJsonError,
    WriteError,
};
pub use ids::RecordId;
pub use record::{DecodedRecord, DecodedRecordBuilder};
pub use result::Result;
