//! Whole-file reads and writes for the Gemfile
//!
//! Files are read completely, changed in memory and written back in one go.
//! Nothing guards against another process editing the file in between.

use crate::error::ManifestError;
use std::fs;
use std::path::Path;

/// Read a manifest file content
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
