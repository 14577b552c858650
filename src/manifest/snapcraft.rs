//! snapcraft.yaml parser
//!
//! Only the `parts` section is read. For each part the keys `source`,
//! `source-type`, `source-tag` and `source-branch` are extracted; all
//! other keys are ignored. Parts without a `source` are not audited.

use crate::domain::{ManifestEntry, PinSpec};
use crate::error::ManifestError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_norway::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level manifest document
#[derive(Debug, Deserialize)]
struct SnapcraftDocument {
    /// Snap name
    #[serde(default)]
    name: Option<String>,
    /// Parts, in declaration order
    #[serde(default)]
    parts: Option<IndexMap<String, Option<PartDocument>>>,
}

/// A single part; scalars are kept untyped because YAML reads `2.10` as a number
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PartDocument {
    #[serde(default)]
    source: Option<Value>,
    #[serde(default)]
    source_type: Option<Value>,
    #[serde(default)]
    source_tag: Option<Value>,
    #[serde(default)]
    source_branch: Option<Value>,
}

/// A parsed snapcraft manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Path the manifest was read from
    pub path: PathBuf,
    /// Snap name, if declared
    pub name: Option<String>,
    /// Parts that declare a source, in declaration order
    pub entries: Vec<ManifestEntry>,
    /// Names of every declared part, including those without a source
    pub part_names: Vec<String>,
}

impl Manifest {
    /// Parse manifest content read from `path`
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let document: SnapcraftDocument = serde_norway::from_str(content)
            .map_err(|e| ManifestError::yaml_parse_error(&path, e.to_string()))?;

        let parts = document
            .parts
            .ok_or_else(|| ManifestError::missing_parts(&path))?;

        let part_names = parts.keys().cloned().collect();
        let entries = parts
            .into_iter()
            .filter_map(|(id, part)| entry_from_part(id, part.unwrap_or_default()))
            .collect();

        Ok(Self {
            path,
            name: document.name,
            entries,
            part_names,
        })
    }

    /// Returns the entry for a part name
    pub fn entry(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns true if a part with this name is declared
    pub fn has_part(&self, id: &str) -> bool {
        self.part_names.iter().any(|p| p == id)
    }

    /// Returns the directory holding the manifest
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn entry_from_part(id: String, part: PartDocument) -> Option<ManifestEntry> {
    let Some(source) = part.source.as_ref().and_then(scalar_to_string) else {
        debug!(part = %id, "part has no source, not auditing");
        return None;
    };

    let mut entry = ManifestEntry::new(&id, source.trim());
    if let Some(source_type) = part.source_type.as_ref().and_then(scalar_to_string) {
        entry = entry.with_source_type(source_type);
    }

    let tag = part.source_tag.as_ref().and_then(scalar_to_string);
    let branch = part.source_branch.as_ref().and_then(scalar_to_string);
    let pin = match (tag, branch) {
        (Some(tag), Some(branch)) => {
            warn!(part = %id, tag = %tag, branch = %branch, "both source-tag and source-branch declared, using the tag");
            Some(PinSpec::Tag(tag))
        }
        (Some(tag), None) => Some(PinSpec::Tag(tag)),
        (None, Some(branch)) => Some(PinSpec::Branch(branch)),
        (None, None) => None,
    };

    if let Some(pin) = pin {
        entry = entry.with_pin(pin);
    }
    Some(entry)
}

/// Render a YAML scalar as written; non-scalars yield None
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
