//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;
use wfdb_json::adapters::RecordReader;
use wfdb_json::config::WfdbJsonConfig;
use wfdb_json::domain::{DecodeError, DecodedRecord, NdArray, NdData, RecordId};

/// Reader producing two-signal records without touching the filesystem
///
/// Records whose base name is listed in `corrupt` fail to decode. The
/// record identifier is echoed in `comments` so tests can tell records with
/// the same base name apart.
pub struct FakeReader {
    pub sig_len: usize,
    pub corrupt: HashSet<String>,
    /// Records below this directory fail to decode
    pub corrupt_under: Option<PathBuf>,
    pub reads: AtomicUsize,
    /// Raised after the first read when set
    pub shutdown_on_read: Option<watch::Sender<bool>>,
    pub non_finite: bool,
}

impl FakeReader {
    pub fn new(sig_len: usize) -> Self {
        Self {
            sig_len,
            corrupt: HashSet::new(),
            corrupt_under: None,
            reads: AtomicUsize::new(0),
            shutdown_on_read: None,
            non_finite: false,
        }
    }

    pub fn with_corrupt(mut self, names: &[&str]) -> Self {
        self.corrupt = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_corrupt_under(mut self, dir: &Path) -> Self {
        self.corrupt_under = Some(dir.to_path_buf());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl RecordReader for FakeReader {
    fn read(&self, id: &RecordId) -> Result<DecodedRecord, DecodeError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(tx) = &self.shutdown_on_read {
            let _ = tx.send(true);
        }

        let under_corrupt_dir = self
            .corrupt_under
            .as_ref()
            .is_some_and(|dir| id.as_path().starts_with(dir));
        if under_corrupt_dir || self.corrupt.contains(id.base_name()) {
            return Err(DecodeError::Truncated {
                path: id.with_extension("dat"),
                expected: self.sig_len * 2,
                found: 7,
            });
        }

        let mut samples: Vec<f64> = (0..self.sig_len * 2).map(|i| i as f64 * 0.25).collect();
        if self.non_finite {
            samples[0] = f64::NAN;
        }

        DecodedRecord::builder()
            .record_name(id.base_name())
            .n_sig(2)
            .fs(500.0)
            .sig_len(self.sig_len)
            .comments(vec![id.to_string()])
            .sig_name(vec!["I".to_string(), "II".to_string()])
            .units(vec!["mV".to_string(), "mV".to_string()])
            .signal_specs(vec![0, 0], vec![0, 0], vec![0, 0])
            .p_signal(Some(
                NdArray::new(vec![self.sig_len, 2], NdData::Float(samples))
                    .map_err(|e| DecodeError::Unsupported(e.to_string()))?,
            ))
            .build()
            .map_err(DecodeError::Unsupported)
    }
}

/// Creates empty files below `root`
pub fn touch_all(root: &Path, names: &[&str]) {
    for name in names {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }
}

/// Config pointing at the given input and output directories
pub fn config_for(input: &Path, output: &Path) -> WfdbJsonConfig {
    let mut config = WfdbJsonConfig::default();
    config.input.root = input.to_path_buf();
    config.output.directory = output.to_path_buf();
    config
}

/// Sorted file paths below `dir`, relative to it
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
