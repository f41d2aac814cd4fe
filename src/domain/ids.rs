//! Record identifier newtype
//!
//! A record identifier is the directory-qualified base name shared by a
//! record's header and data files, e.g. `data/ptb-xl/00001_hr` for
//! `data/ptb-xl/00001_hr.hea` plus `data/ptb-xl/00001_hr.dat`.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Record identifier newtype wrapper
///
/// Identifiers compare and hash by path, which makes them the deduplication
/// key during discovery.
///
/// # Examples
///
/// ```
/// use wfdb_json::domain::ids::RecordId;
/// use std::path::Path;
///
/// let id = RecordId::from_header_path(Path::new("data/a103l.hea"), "hea").unwrap();
/// assert_eq!(id.base_name(), "a103l");
/// assert_eq!(id.as_path(), Path::new("data/a103l"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(PathBuf);

impl RecordId {
    /// Creates a new RecordId from an extension-less record path
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        match path.file_name().and_then(OsStr::to_str) {
            Some(name) if !name.trim().is_empty() => Ok(Self(path)),
            _ => Err(format!(
                "Record identifier must end in a base name: '{}'",
                path.display()
            )),
        }
    }

    /// Derives the identifier of a header file by stripping its extension
    ///
    /// Returns `None` when the file name does not end in `.<extension>` or
    /// nothing is left once the suffix is removed.
    pub fn from_header_path(path: &Path, extension: &str) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let suffix = format!(".{extension}");
        let stem = file_name.strip_suffix(suffix.as_str())?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(path.with_file_name(stem)))
    }

    /// Whether the file name ends in `.<extension>`, compared byte-wise so
    /// names that are not valid UTF-8 still match
    pub fn has_header_suffix(path: &Path, extension: &str) -> bool {
        path.file_name().is_some_and(|name| {
            let name = name.as_encoded_bytes();
            name.len() > extension.len()
                && name.ends_with(extension.as_bytes())
                && name[name.len() - extension.len() - 1] == b'.'
        })
    }

    /// Returns the record path without extension
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the record base name (the final path component)
    pub fn base_name(&self) -> &str {
        self.0
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
    }

    /// Returns the directory holding the record files
    pub fn directory(&self) -> &Path {
        self.0.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Returns the path of a sibling file carrying the given extension
    pub fn with_extension(&self, extension: &str) -> PathBuf {
        self.directory()
            .join(format!("{}.{extension}", self.base_name()))
    }

    /// Consumes self and returns the inner path
    pub fn into_inner(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<Path> for RecordId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
