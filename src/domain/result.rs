//! Result type alias for wfdb-json

use super::errors::WfdbJsonError;

/// Result type alias for wfdb-json operations
///
/// # Examples
///
/// ```
/// use wfdb_json::domain::result::Result;
/// use wfdb_json::domain::errors::WfdbJsonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(WfdbJsonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, WfdbJsonError>;
