//! Freshness verdicts for a single pin

use super::Candidate;
use crate::version::ParsedVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a pin against the upstream references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessKind {
    /// No newer reference exists
    UpToDate,
    /// Newer tags exist
    OutdatedTag,
    /// Newer branches exist
    OutdatedBranch,
    /// The pinned name matches no known version pattern
    UnknownFormat,
    /// The pinned tag is not in the upstream tag list
    MissingCurrentTag,
    /// Upstream returned no references at all
    NoCandidates,
}

impl FreshnessKind {
    /// Snake-case name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessKind::UpToDate => "up_to_date",
            FreshnessKind::OutdatedTag => "outdated_tag",
            FreshnessKind::OutdatedBranch => "outdated_branch",
            FreshnessKind::UnknownFormat => "unknown_format",
            FreshnessKind::MissingCurrentTag => "missing_current_tag",
            FreshnessKind::NoCandidates => "no_candidates",
        }
    }

    /// Returns true if newer references were found
    pub fn is_outdated(&self) -> bool {
        matches!(self, FreshnessKind::OutdatedTag | FreshnessKind::OutdatedBranch)
    }

    /// Returns true if no verdict could be reached cleanly
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            FreshnessKind::UnknownFormat
                | FreshnessKind::MissingCurrentTag
                | FreshnessKind::NoCandidates
        )
    }
}

impl fmt::Display for FreshnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreshnessKind::UpToDate => write!(f, "up to date"),
            FreshnessKind::OutdatedTag => write!(f, "newer tags available"),
            FreshnessKind::OutdatedBranch => write!(f, "newer branches available"),
            FreshnessKind::UnknownFormat => write!(f, "unknown tag/branch format"),
            FreshnessKind::MissingCurrentTag => write!(f, "current tag not found upstream"),
            FreshnessKind::NoCandidates => write!(f, "no tags or branches found"),
        }
    }
}

/// Result of analyzing one pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessReport {
    /// The verdict
    pub kind: FreshnessKind,
    /// References that supersede the pin, most relevant first
    pub superseding: Vec<Candidate>,
    /// The pinned name, parsed
    pub current_version: ParsedVersion,
    /// Date of the pinned tag, when it was found upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_date: Option<DateTime<Utc>>,
    /// Most recent upstream tags, attached to branch pins as a hint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub latest_tags: Vec<Candidate>,
}

impl FreshnessReport {
    /// Creates a report with no superseding references
    pub fn new(kind: FreshnessKind, current_version: ParsedVersion) -> Self {
        Self {
            kind,
            superseding: Vec::new(),
            current_version,
            current_date: None,
            latest_tags: Vec::new(),
        }
    }

    /// Sets the superseding references (builder pattern)
    pub fn with_superseding(mut self, superseding: Vec<Candidate>) -> Self {
        self.superseding = superseding;
        self
    }

    /// Sets the pinned tag date (builder pattern)
    pub fn with_current_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.current_date = date;
        self
    }

    /// Sets the advisory tag list (builder pattern)
    pub fn with_latest_tags(mut self, latest_tags: Vec<Candidate>) -> Self {
        self.latest_tags = latest_tags;
        self
    }

    /// Names of the superseding references, in order
    pub fn superseding_names(&self) -> Vec<&str> {
        self.superseding.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns true if the pinned name was not recognized as a version
    pub fn has_unknown_format(&self) -> bool {
        !self.current_version.is_valid()
    }
}
