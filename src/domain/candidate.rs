//! Upstream references considered as replacements for a pin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tag or branch published by an upstream repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Reference name as published by the host
    pub name: String,
    /// Commit date; tags carry one, branches do not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Creates a dated candidate (a tag)
    pub fn tag(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date: Some(date),
        }
    }

    /// Creates an undated candidate (a branch)
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: None,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} ({})", self.name, date.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}", self.name),
        }
    }
}
