//! Encodable field values
//!
//! [`FieldValue`] is the closed set of value kinds an output document can
//! carry. JSON-native kinds pass through unchanged; extended kinds (sized
//! numbers, arrays, calendar values) get explicit renderings; anything else
//! is [`FieldValue::Opaque`] and fails to encode.

use crate::domain::NdArray;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A value destined for an output document
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON string
    Text(String),
    /// Signed integer scalar
    Integer(i64),
    /// Unsigned integer scalar
    Unsigned(u64),
    /// Floating scalar
    Float(f64),
    /// Multi-dimensional numeric array, rendered as nested lists
    Array(NdArray),
    /// Time of day, rendered as ISO-8601 text
    Time(NaiveTime),
    /// Calendar date, rendered as ISO-8601 text
    Date(NaiveDate),
    /// Date and time, rendered as ISO-8601 text
    DateTime(NaiveDateTime),
    /// Heterogeneous sequence
    List(Vec<FieldValue>),
    /// Value of a kind with no JSON rendering
    Opaque { kind: String },
}

impl FieldValue {
    /// Short kind name, used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "int64",
            FieldValue::Unsigned(_) => "uint64",
            FieldValue::Float(_) => "float64",
            FieldValue::Array(array) => array.data().kind(),
            FieldValue::Time(_) => "time",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::List(_) => "list",
            FieldValue::Opaque { kind } => kind,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Unsigned(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Unsigned(value as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<NdArray> for FieldValue {
    fn from(value: NdArray) -> Self {
        FieldValue::Array(value)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        FieldValue::Time(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
