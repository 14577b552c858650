//! Manifest file detection and parsing
//!
//! This module provides functionality to:
//! - Locate `snapcraft.yaml` (project root or `snap/` directory)
//! - Parse parts and their pinned sources
//! - Decide whether a part's source can be audited

mod detector;
mod snapcraft;
mod source;

pub use detector::{locate_manifest, manifest_candidates, MANIFEST_FILENAME};
pub use snapcraft::Manifest;
pub use source::check_source;

use crate::error::ManifestError;
use std::path::Path;
use tracing::info;

/// Locate, read and parse the manifest for a file or directory argument
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let manifest_path = locate_manifest(path)?;
    info!(path = %manifest_path.display(), "opening manifest");

    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| ManifestError::read_error(&manifest_path, e))?;

    Manifest::parse(&content, manifest_path)
}
