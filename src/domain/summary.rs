//! Audit summary across all entries of a manifest

use super::EntryReport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All entry reports of one manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Path to the manifest file
    pub manifest: PathBuf,
    /// One report per audited entry, in manifest order
    pub reports: Vec<EntryReport>,
}

impl AuditSummary {
    /// Creates an empty summary
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            reports: Vec::new(),
        }
    }

    /// Adds an entry report
    pub fn add_report(&mut self, report: EntryReport) {
        self.reports.push(report);
    }

    /// Returns the report for an entry id
    pub fn get(&self, id: &str) -> Option<&EntryReport> {
        self.reports.iter().find(|r| r.id() == id)
    }

    /// Returns the number of entries reported
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Returns the number of up-to-date pins
    pub fn up_to_date_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_up_to_date()).count()
    }

    /// Returns the number of outdated pins
    pub fn outdated_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_outdated()).count()
    }

    /// Returns the number of pins with problems
    pub fn problem_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_problem()).count()
    }

    /// Returns the number of entries without a pin
    pub fn unpinned_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_unpinned()).count()
    }

    /// Returns the number of skipped entries
    pub fn skipped_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_skipped()).count()
    }

    /// Returns true if any pin has newer references
    pub fn has_outdated(&self) -> bool {
        self.outdated_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FreshnessKind, FreshnessReport, ManifestEntry, SkipReason};
    use crate::version::ParsedVersion;

    fn analyzed(id: &str, kind: FreshnessKind) -> EntryReport {
        EntryReport::analyzed(
            ManifestEntry::new(id, "https://github.com/o/r.git"),
            FreshnessReport::new(kind, ParsedVersion::invalid()),
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = AuditSummary::new("snapcraft.yaml");
        assert_eq!(summary.total(), 0);
        assert!(!summary.has_outdated());
    }

    #[test]
    fn test_counts() {
        let mut summary = AuditSummary::new("snap/snapcraft.yaml");
        summary.add_report(analyzed("a", FreshnessKind::UpToDate));
        summary.add_report(analyzed("b", FreshnessKind::OutdatedTag));
        summary.add_report(analyzed("c", FreshnessKind::OutdatedBranch));
        summary.add_report(analyzed("d", FreshnessKind::MissingCurrentTag));
        summary.add_report(EntryReport::no_pin(
            ManifestEntry::new("e", "https://github.com/o/e.git"),
            Vec::new(),
        ));
        summary.add_report(EntryReport::skipped(
            ManifestEntry::new("f", "https://example.com/f.tar.gz"),
            SkipReason::NotGitRepository,
        ));

        assert_eq!(summary.total(), 6);
        assert_eq!(summary.up_to_date_count(), 1);
        assert_eq!(summary.outdated_count(), 2);
        assert_eq!(summary.problem_count(), 1);
        assert_eq!(summary.unpinned_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert!(summary.has_outdated());
    }

    #[test]
    fn test_get_by_id() {
        let mut summary = AuditSummary::new("snapcraft.yaml");
        summary.add_report(analyzed("glib", FreshnessKind::UpToDate));
        assert!(summary.get("glib").is_some());
        assert!(summary.get("gtk").is_none());
    }
}
