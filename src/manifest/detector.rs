//! Manifest file location
//!
//! A directory is searched for `snapcraft.yaml` first and then for
//! `snap/snapcraft.yaml`. A file path is used as given.

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Manifest file name
pub const MANIFEST_FILENAME: &str = "snapcraft.yaml";

/// Directory conventionally holding the manifest
pub const MANIFEST_SUBDIR: &str = "snap";

/// Candidate manifest paths for a directory, in lookup order
pub fn manifest_candidates(dir: &Path) -> [PathBuf; 2] {
    [
        dir.join(MANIFEST_FILENAME),
        dir.join(MANIFEST_SUBDIR).join(MANIFEST_FILENAME),
    ]
}

/// Resolve the manifest path for a file or directory argument
pub fn locate_manifest(path: &Path) -> Result<PathBuf, ManifestError> {
    if path.is_dir() {
        return manifest_candidates(path)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ManifestError::not_found(path.join(MANIFEST_FILENAME)));
    }

    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    Err(ManifestError::not_found(path))
}
