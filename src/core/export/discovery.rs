//! Record discovery
//!
//! Walks the input tree and collects one [`RecordId`] per header file. Data
//! files sharing a header's base name collapse into the same identifier.

use crate::domain::{DiscoveryError, RecordId};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively finds every record under `root`
///
/// Symbolic links are not followed. Any traversal error aborts discovery.
///
/// # Errors
///
/// Returns [`DiscoveryError::RootNotFound`] or
/// [`DiscoveryError::NotADirectory`] for a bad root,
/// [`DiscoveryError::Traversal`] when an entry below it cannot be read, and
/// [`DiscoveryError::InvalidFileName`] for a header whose name is not UTF-8.
pub fn discover_records(
    root: &Path,
    header_extension: &str,
) -> Result<BTreeSet<RecordId>, DiscoveryError> {
    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DiscoveryError::RootNotFound(root.to_path_buf()),
        _ => DiscoveryError::Traversal {
            path: root.to_path_buf(),
            message: e.to_string(),
        },
    })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut records = BTreeSet::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| DiscoveryError::Traversal {
            path: e
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            message: e.to_string(),
        })?;
        if entry.file_type().is_dir()
            || !RecordId::has_header_suffix(entry.path(), header_extension)
        {
            continue;
        }
        match RecordId::from_header_path(entry.path(), header_extension) {
            Some(id) => {
                records.insert(id);
            }
            None if entry.file_name().to_str().is_none() => {
                return Err(DiscoveryError::InvalidFileName(entry.path().to_path_buf()));
            }
            None => {}
        }
    }

    tracing::debug!(
        root = %root.display(),
        count = records.len(),
        "Discovery finished"
    );
    Ok(records)
}
