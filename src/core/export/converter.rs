//! Single-record conversion
//!
//! Reads one record, shapes it into a [`RecordDocument`], renders pretty JSON
//! and writes it out. Every failure is returned as a [`ConversionOutcome`]
//! value so the caller can continue with the next record.

use crate::adapters::RecordReader;
use crate::config::OutputLayout;
use crate::core::encode::JsonEncoder;
use crate::core::transform::RecordDocument;
use crate::domain::{ConversionError, RecordId, WriteError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Successfully converted record
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecord {
    pub record_id: RecordId,
    pub output_path: PathBuf,
    /// False in dry-run mode
    pub written: bool,
}

/// Record that could not be converted
#[derive(Debug)]
pub struct RecordFailure {
    pub record_id: RecordId,
    pub error: ConversionError,
}

/// Result of converting one record
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(ConvertedRecord),
    Failed(RecordFailure),
}

impl ConversionOutcome {
    /// Builds a failed outcome
    pub fn failed(record_id: RecordId, error: impl Into<ConversionError>) -> Self {
        ConversionOutcome::Failed(RecordFailure {
            record_id,
            error: error.into(),
        })
    }

    /// Identifier of the record this outcome is about
    pub fn record_id(&self) -> &RecordId {
        match self {
            ConversionOutcome::Converted(c) => &c.record_id,
            ConversionOutcome::Failed(f) => &f.record_id,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted(_))
    }
}

/// Output file for a record under the given layout
///
/// `flat` puts every document directly in `output_dir`; `mirror` keeps the
/// record's directory relative to `input_root`.
pub fn output_path_for(
    id: &RecordId,
    input_root: &Path,
    output_dir: &Path,
    layout: OutputLayout,
) -> PathBuf {
    let file_name = format!("{}.json", id.base_name());
    match layout {
        OutputLayout::Flat => output_dir.join(file_name),
        OutputLayout::Mirror => {
            let relative = id.directory().strip_prefix(input_root).unwrap_or(Path::new(""));
            output_dir.join(relative).join(file_name)
        }
    }
}

/// Converts records one at a time
///
/// Holds no per-record state and can be shared across worker threads.
pub struct RecordConverter {
    reader: Arc<dyn RecordReader>,
    encoder: JsonEncoder,
    indent: usize,
    dry_run: bool,
}

impl RecordConverter {
    /// Create a new record converter
    pub fn new(reader: Arc<dyn RecordReader>, encoder: JsonEncoder, indent: usize) -> Self {
        Self {
            reader,
            encoder,
            indent,
            dry_run: false,
        }
    }

    /// Decode and encode without writing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Converts one record into `output_path`
    pub fn convert(&self, id: &RecordId, output_path: &Path) -> ConversionOutcome {
        crate::log_conversion_start!(id);

        match self.try_convert(id, output_path) {
            Ok(()) => {
                tracing::debug!(
                    record_id = %id,
                    output_path = %output_path.display(),
                    dry_run = self.dry_run,
                    "Record converted"
                );
                ConversionOutcome::Converted(ConvertedRecord {
                    record_id: id.clone(),
                    output_path: output_path.to_path_buf(),
                    written: !self.dry_run,
                })
            }
            Err(error) => {
                crate::log_conversion_failure!(id, error.stage(), &error);
                ConversionOutcome::failed(id.clone(), error)
            }
        }
    }

    fn try_convert(&self, id: &RecordId, output_path: &Path) -> Result<(), ConversionError> {
        let record = self.reader.read(id)?;
        let document = RecordDocument::from(record).encode(&self.encoder)?;
        let bytes = self.render(document)?;

        if self.dry_run {
            return Ok(());
        }
        write_document(output_path, &bytes)?;
        Ok(())
    }

    /// Pretty JSON with the configured indent and a trailing newline
    fn render(&self, document: Map<String, Value>) -> Result<Vec<u8>, ConversionError> {
        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buffer,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        Value::Object(document)
            .serialize(&mut serializer)
            .map_err(|e| ConversionError::Internal(format!("JSON rendering failed: {e}")))?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

/// Writes a document, creating missing parent directories
///
/// An existing file is overwritten.
pub fn write_document(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    fs::write(path, bytes).map_err(|e| WriteError::WriteFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecodeError, DecodedRecord, NdArray};
    use tempfile::TempDir;

    struct FixedReader;

    impl RecordReader for FixedReader {
        fn read(&self, id: &RecordId) -> Result<DecodedRecord, DecodeError> {
            if id.base_name() == "broken" {
                return Err(DecodeError::InvalidHeader {
                    line: 1,
                    message: "garbage".to_string(),
                });
            }
            DecodedRecord::builder()
                .record_name(id.base_name())
                .n_sig(1)
                .fs(360.0)
                .sig_len(2)
                .p_signal(Some(
                    NdArray::new(vec![2, 1], crate::domain::NdData::Float(vec![0.5, f64::NAN]))
                        .unwrap(),
                ))
                .build()
                .map_err(DecodeError::Unsupported)
        }
    }

    fn converter() -> RecordConverter {
        RecordConverter::new(Arc::new(FixedReader), JsonEncoder::default(), 4)
    }

    #[test]
    fn test_output_path_layouts() {
        let id = RecordId::new("data/wfdb/set1/r1").unwrap();
        let root = Path::new("data/wfdb");
        let out = Path::new("out");
        assert_eq!(
            output_path_for(&id, root, out, OutputLayout::Flat),
            PathBuf::from("out/r1.json")
        );
        assert_eq!(
            output_path_for(&id, root, out, OutputLayout::Mirror),
            PathBuf::from("out/set1/r1.json")
        );
    }

    #[test]
    fn test_convert_writes_pretty_json() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out/r1.json");
        let id = RecordId::new("in/r1").unwrap();

        let outcome = converter().convert(&id, &target);
        assert!(outcome.is_converted());

        let text = fs::read_to_string(&target).unwrap();
        assert!(text.starts_with("{\n    \"record_name\": \"r1\",\n"));
        assert!(text.ends_with("}\n"));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["p_signal"], serde_json::json!([[0.5], [null]]));
    }

    #[test]
    fn test_convert_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("r1.json");
        fs::write(&target, "stale").unwrap();

        let id = RecordId::new("in/r1").unwrap();
        assert!(converter().convert(&id, &target).is_converted());
        assert!(converter().convert(&id, &target).is_converted());

        let value: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(value["record_name"], "r1");
    }

    #[test]
    fn test_decode_failure_is_an_outcome() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("broken.json");
        let id = RecordId::new("in/broken").unwrap();

        match converter().convert(&id, &target) {
            ConversionOutcome::Failed(failure) => {
                assert_eq!(failure.record_id, id);
                assert_eq!(failure.error.stage(), crate::domain::FailureStage::Decode);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!target.exists());
    }

    #[test]
    fn test_encode_failure_under_fail_policy() {
        let dir = TempDir::new().unwrap();
        let converter = RecordConverter::new(
            Arc::new(FixedReader),
            JsonEncoder::new(crate::config::NonFinitePolicy::Fail),
            2,
        );
        let id = RecordId::new("in/r1").unwrap();
        match converter.convert(&id, &dir.path().join("r1.json")) {
            ConversionOutcome::Failed(failure) => {
                assert_eq!(failure.error.stage(), crate::domain::FailureStage::Encode);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out/r1.json");
        let id = RecordId::new("in/r1").unwrap();

        match converter().with_dry_run(true).convert(&id, &target) {
            ConversionOutcome::Converted(converted) => assert!(!converted.written),
            other => panic!("expected conversion, got {other:?}"),
        }
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_write_error_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();
        let err = write_document(&dir.path().join("blocker/r1.json"), b"{}").unwrap_err();
        assert!(matches!(err, WriteError::CreateDirectory { .. }));
    }
}
