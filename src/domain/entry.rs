//! Manifest entries (snapcraft parts) to audit

use super::PinSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A part declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Part name
    pub id: String,
    /// Source repository URL as written in the manifest
    pub source: String,
    /// Declared `source-type`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Pinned tag or branch, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinSpec>,
}

impl ManifestEntry {
    /// Creates an entry without a pin
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            source_type: None,
            pin: None,
        }
    }

    /// Sets the declared source type (builder pattern)
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    /// Sets the pin (builder pattern)
    pub fn with_pin(mut self, pin: PinSpec) -> Self {
        self.pin = Some(pin);
        self
    }

    /// Returns true if the manifest declares `source-type: git`
    pub fn is_declared_git(&self) -> bool {
        self.source_type.as_deref() == Some("git")
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pin {
            Some(pin) => write!(f, "{} ({}, {})", self.id, self.source, pin),
            None => write!(f, "{} ({})", self.id, self.source),
        }
    }
}
