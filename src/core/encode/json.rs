//! JSON rendering of field values
//!
//! Rules:
//! - `Integer` / `Unsigned` become JSON integers without loss. Consumers
//!   that parse numbers as IEEE doubles lose precision beyond 2^53.
//! - `Float` becomes a JSON number with shortest round-trip formatting.
//!   NaN and infinities follow the configured [`NonFinitePolicy`].
//! - `Array` becomes nested lists in row-major order, one nesting level per
//!   dimension.
//! - `Time`, `Date` and `DateTime` become ISO-8601 strings.
//! - `Opaque` fails with [`EncodeError::TypeNotSerializable`].

use super::value::FieldValue;
use crate::config::NonFinitePolicy;
use crate::domain::{EncodeError, NdArray, NdData};
use serde_json::{Map, Number, Value};

/// Stateless encoder from [`FieldValue`] to [`serde_json::Value`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    non_finite: NonFinitePolicy,
}

impl JsonEncoder {
    /// Creates an encoder with the given non-finite policy
    pub fn new(non_finite: NonFinitePolicy) -> Self {
        Self { non_finite }
    }

    /// Non-finite float policy in effect
    pub fn non_finite_policy(&self) -> NonFinitePolicy {
        self.non_finite
    }

    /// Encodes one value
    ///
    /// `field` names the value in error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfdb_json::core::encode::{FieldValue, JsonEncoder};
    /// use serde_json::json;
    ///
    /// let encoder = JsonEncoder::default();
    /// assert_eq!(encoder.encode("n_sig", &FieldValue::Integer(42)).unwrap(), json!(42));
    /// assert_eq!(encoder.encode("fs", &FieldValue::Float(f64::NAN)).unwrap(), json!(null));
    /// ```
    pub fn encode(&self, field: &str, value: &FieldValue) -> Result<Value, EncodeError> {
        match value {
            FieldValue::Null => Ok(Value::Null),
            FieldValue::Bool(b) => Ok(Value::Bool(*b)),
            FieldValue::Text(s) => Ok(Value::String(s.clone())),
            FieldValue::Integer(i) => Ok(Value::from(*i)),
            FieldValue::Unsigned(u) => Ok(Value::from(*u)),
            FieldValue::Float(f) => self.encode_float(field, *f),
            FieldValue::Array(array) => self.encode_array(field, array),
            FieldValue::Time(t) => Ok(Value::String(t.format("%H:%M:%S%.f").to_string())),
            FieldValue::Date(d) => Ok(Value::String(d.format("%Y-%m-%d").to_string())),
            FieldValue::DateTime(dt) => Ok(Value::String(
                dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            )),
            FieldValue::List(items) => items
                .iter()
                .map(|item| self.encode(field, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            FieldValue::Opaque { kind } => Err(EncodeError::TypeNotSerializable {
                kind: kind.clone(),
            }),
        }
    }

    /// Encodes named fields into a JSON object, keeping their order
    pub fn encode_fields<'k, 'v, I>(&self, fields: I) -> Result<Map<String, Value>, EncodeError>
    where
        I: IntoIterator<Item = (&'k str, &'v FieldValue)>,
    {
        let mut object = Map::new();
        for (name, value) in fields {
            object.insert(name.to_string(), self.encode(name, value)?);
        }
        Ok(object)
    }

    fn encode_float(&self, field: &str, value: f64) -> Result<Value, EncodeError> {
        match Number::from_f64(value) {
            Some(number) => Ok(Value::Number(number)),
            None => match self.non_finite {
                NonFinitePolicy::Null => Ok(Value::Null),
                NonFinitePolicy::Fail => Err(EncodeError::NonFinite {
                    field: field.to_string(),
                    value,
                }),
            },
        }
    }

    fn encode_array(&self, field: &str, array: &NdArray) -> Result<Value, EncodeError> {
        match array.data() {
            NdData::Int(values) => nest(array.shape(), values, &mut |v: i64| Ok(Value::from(v))),
            NdData::Float(values) => nest(array.shape(), values, &mut |v: f64| {
                self.encode_float(field, v)
            }),
        }
    }
}

/// Builds nested lists from a row-major slice
fn nest<T, F>(shape: &[usize], data: &[T], leaf: &mut F) -> Result<Value, EncodeError>
where
    T: Copy,
    F: FnMut(T) -> Result<Value, EncodeError>,
{
    let Some((&len, rest)) = shape.split_first() else {
        return match data {
            [single] => leaf(*single),
            _ => Err(EncodeError::ShapeMismatch {
                shape: Vec::new(),
                expected: 1,
                actual: data.len(),
            }),
        };
    };

    let stride: usize = rest.iter().product();
    if data.len() != len * stride {
        return Err(EncodeError::ShapeMismatch {
            shape: shape.to_vec(),
            expected: len * stride,
            actual: data.len(),
        });
    }

    let mut items = Vec::with_capacity(len);
    for i in 0..len {
        items.push(nest(rest, &data[i * stride..(i + 1) * stride], leaf)?);
    }
    Ok(Value::Array(items))
}
