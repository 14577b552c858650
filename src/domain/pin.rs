//! Pinned source references declared in the manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reference a manifest entry is locked to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PinSpec {
    /// `source-tag`
    Tag(String),
    /// `source-branch`
    Branch(String),
}

impl PinSpec {
    /// Returns the pinned reference name
    pub fn name(&self) -> &str {
        match self {
            PinSpec::Tag(name) | PinSpec::Branch(name) => name,
        }
    }

    /// Returns true for tag pins
    pub fn is_tag(&self) -> bool {
        matches!(self, PinSpec::Tag(_))
    }

    /// Returns true for branch pins
    pub fn is_branch(&self) -> bool {
        matches!(self, PinSpec::Branch(_))
    }
}

impl fmt::Display for PinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinSpec::Tag(name) => write!(f, "tag {}", name),
            PinSpec::Branch(name) => write!(f, "branch {}", name),
        }
    }
}
