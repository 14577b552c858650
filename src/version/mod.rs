//! Version semantics for upstream tag and branch names
//!
//! This module provides:
//! - `ParsedVersion`, a partially-populated `major.minor.revision.rc` value
//! - An ordered catalogue of textual version patterns (`parse`)
//! - A level-by-level "is newer" predicate with an explicit tie policy

mod compare;
mod parser;

pub use parser::parse;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A version decomposed from a raw tag or branch name
///
/// Every level is optional: `None` means the name did not carry that level,
/// which is different from carrying a `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParsedVersion {
    /// Major component
    pub major: Option<u64>,
    /// Minor component
    pub minor: Option<u64>,
    /// Revision (third) component
    pub revision: Option<u64>,
    /// Release-candidate number
    pub rc: Option<u64>,
    /// Whether any pattern of the catalogue recognized the name
    pub valid: bool,
}

impl ParsedVersion {
    /// Creates a valid version from its components
    pub fn new(
        major: Option<u64>,
        minor: Option<u64>,
        revision: Option<u64>,
        rc: Option<u64>,
    ) -> Self {
        Self {
            major,
            minor,
            revision,
            rc,
            valid: true,
        }
    }

    /// The result for names no pattern recognizes
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Returns true if the name was recognized
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(major) = self.major else {
            return write!(f, "Unknown");
        };
        write!(f, "{}", major)?;

        let Some(minor) = self.minor else {
            return Ok(());
        };
        write!(f, ".{}", minor)?;

        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        if let Some(rc) = self.rc {
            write!(f, "rc{}", rc)?;
        }
        Ok(())
    }
}
