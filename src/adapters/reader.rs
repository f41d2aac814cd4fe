//! Record reader trait definition
//!
//! The conversion core never parses record files itself. It asks a
//! [`RecordReader`] to decode an identifier, so discovery, shaping and
//! encoding can run against any source of decoded records, including
//! in-memory fakes in tests.

use crate::domain::{DecodeError, DecodedRecord, RecordId};

/// Capability that decodes a record identifier into a [`DecodedRecord`]
///
/// Implementations are shared across conversion workers and must be
/// thread-safe. A call must not depend on other calls having happened.
///
/// # Example
///
/// ```
/// use wfdb_json::adapters::RecordReader;
/// use wfdb_json::domain::{DecodeError, DecodedRecord, RecordId};
///
/// struct EmptyReader;
///
/// impl RecordReader for EmptyReader {
///     fn read(&self, id: &RecordId) -> Result<DecodedRecord, DecodeError> {
///         DecodedRecord::builder()
///             .record_name(id.base_name())
///             .n_sig(0)
///             .fs(250.0)
///             .sig_len(0)
///             .build()
///             .map_err(DecodeError::Unsupported)
///     }
/// }
/// ```
pub trait RecordReader: Send + Sync {
    /// Decodes one record
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the header or data files are missing,
    /// malformed or use features the reader cannot decode.
    fn read(&self, id: &RecordId) -> Result<DecodedRecord, DecodeError>;
}
