//! Per-entry audit outcome types

use super::{Candidate, FreshnessKind, FreshnessReport, ManifestEntry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why an entry could not be audited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Source is neither http://, https:// nor git://
    UnsupportedProtocol,
    /// Source does not point to a git repository
    NotGitRepository,
    /// Repository host has no supported API
    UnsupportedHost(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedProtocol => write!(f, "source is neither http:// nor git://"),
            SkipReason::NotGitRepository => write!(f, "source is not a git repository"),
            SkipReason::UnsupportedHost(host) => write!(f, "{} repositories not supported", host),
        }
    }
}

/// What the audit produced for one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// The pin was classified
    Analyzed(FreshnessReport),
    /// Neither a tag nor a branch is pinned
    NoPin {
        /// Most recent upstream tags, as a hint
        latest_tags: Vec<Candidate>,
    },
    /// The entry was not audited
    Skipped {
        /// Why the entry was not audited
        reason: SkipReason,
    },
}

/// Audit result for a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    /// The audited entry
    pub entry: ManifestEntry,
    /// The outcome
    pub outcome: EntryOutcome,
}

impl EntryReport {
    /// Creates a report for an analyzed pin
    pub fn analyzed(entry: ManifestEntry, report: FreshnessReport) -> Self {
        Self {
            entry,
            outcome: EntryOutcome::Analyzed(report),
        }
    }

    /// Creates a report for an entry without a pin
    pub fn no_pin(entry: ManifestEntry, latest_tags: Vec<Candidate>) -> Self {
        Self {
            entry,
            outcome: EntryOutcome::NoPin { latest_tags },
        }
    }

    /// Creates a report for a skipped entry
    pub fn skipped(entry: ManifestEntry, reason: SkipReason) -> Self {
        Self {
            entry,
            outcome: EntryOutcome::Skipped { reason },
        }
    }

    /// Returns the entry id
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    /// Returns the freshness verdict, if the pin was analyzed
    pub fn kind(&self) -> Option<FreshnessKind> {
        match &self.outcome {
            EntryOutcome::Analyzed(report) => Some(report.kind),
            _ => None,
        }
    }

    /// Returns true if the pin is up to date
    pub fn is_up_to_date(&self) -> bool {
        self.kind() == Some(FreshnessKind::UpToDate)
    }

    /// Returns true if newer references were found
    pub fn is_outdated(&self) -> bool {
        self.kind().is_some_and(|k| k.is_outdated())
    }

    /// Returns true if the analysis reported a problem
    pub fn is_problem(&self) -> bool {
        self.kind().is_some_and(|k| k.is_problem())
    }

    /// Returns true if the entry was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Skipped { .. })
    }

    /// Returns true if the entry declares no pin
    pub fn is_unpinned(&self) -> bool {
        matches!(self.outcome, EntryOutcome::NoPin { .. })
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            EntryOutcome::Analyzed(report) => write!(f, "{}: {}", self.entry.id, report.kind),
            EntryOutcome::NoPin { .. } => {
                write!(f, "{}: has neither a source-tag nor a source-branch", self.entry.id)
            }
            EntryOutcome::Skipped { reason } => write!(f, "{}: skipped ({})", self.entry.id, reason),
        }
    }
}
