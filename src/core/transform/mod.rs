//! Record to document shaping
//!
//! Maps every field of a [`DecodedRecord`] one-to-one onto an output
//! document field. Nothing is added or inferred: `base_time` and `base_date`
//! become fixed-format text (`HH:MM:SS`, `YYYY-MM-DD`), absent optional
//! values become `null`, and sample arrays are passed through untouched.

use crate::core::encode::{FieldValue, JsonEncoder};
use crate::domain::{DecodedRecord, EncodeError, NdArray};
use serde_json::{Map, Value};

/// Output document keys, in document order
pub const DOCUMENT_KEYS: [&str; 18] = [
    "record_name",
    "n_sig",
    "fs",
    "counter_freq",
    "base_counter",
    "sig_len",
    "base_time",
    "base_date",
    "comments",
    "sig_name",
    "d_signal",
    "e_d_signal",
    "p_signal",
    "e_p_signal",
    "units",
    "init_value",
    "checksum",
    "block_size",
];

/// Ordered output document for one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDocument {
    fields: Vec<(&'static str, FieldValue)>,
}

impl RecordDocument {
    /// Value of a field, if the key exists
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// Fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Encodes the document into a JSON object
    pub fn encode(&self, encoder: &JsonEncoder) -> Result<Map<String, Value>, EncodeError> {
        encoder.encode_fields(self.fields())
    }
}

impl From<DecodedRecord> for RecordDocument {
    fn from(record: DecodedRecord) -> Self {
        let base_time = record
            .base_time
            .map(|t| FieldValue::Text(t.format("%H:%M:%S").to_string()))
            .unwrap_or(FieldValue::Null);
        let base_date = record
            .base_date
            .map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(FieldValue::Null);

        let values = [
            FieldValue::Text(record.record_name),
            record.n_sig.into(),
            record.fs.into(),
            record.counter_freq.into(),
            record.base_counter.into(),
            record.sig_len.into(),
            base_time,
            base_date,
            record.comments.into(),
            record.sig_name.into(),
            record.d_signal.into(),
            expanded(record.e_d_signal),
            record.p_signal.into(),
            expanded(record.e_p_signal),
            record.units.into(),
            NdArray::from_ints(record.init_value).into(),
            NdArray::from_ints(record.checksum).into(),
            NdArray::from_ints(record.block_size).into(),
        ];

        Self {
            fields: DOCUMENT_KEYS.into_iter().zip(values).collect(),
        }
    }
}

fn expanded(signals: Option<Vec<NdArray>>) -> FieldValue {
    signals
        .map(|arrays| FieldValue::List(arrays.into_iter().map(FieldValue::Array).collect()))
        .unwrap_or(FieldValue::Null)
}
