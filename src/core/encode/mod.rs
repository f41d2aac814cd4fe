//! Numeric encoding
//!
//! Turns extended numeric values (sized scalars, multi-dimensional arrays,
//! calendar values) into JSON-native values. See [`json`] for the exact
//! rendering rules.

pub mod json;
pub mod value;

pub use json::JsonEncoder;
pub use value::FieldValue;
