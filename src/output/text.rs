//! Text output formatter for human-readable display
//!
//! One block per part: a `Part:` header, the pinned reference, the verdict
//! and the references superseding it. Branch pins and unpinned parts also
//! list the most recent tags. A summary line closes the report.

use crate::domain::{
    AuditSummary, Candidate, EntryOutcome, EntryReport, FreshnessKind, FreshnessReport, PinSpec,
};
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn good(&self, text: &str) -> String {
        self.paint(text, |s| s.green())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |s| s.yellow())
    }

    fn bad(&self, text: &str) -> String {
        self.paint(text, |s| s.red())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |s| s.dimmed())
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |s| s.bold())
    }

    fn write_candidates(
        &self,
        candidates: &[Candidate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for candidate in candidates {
            writeln!(writer, "    - {}", candidate)?;
        }
        Ok(())
    }

    fn write_latest_tags(
        &self,
        heading: &str,
        tags: &[Candidate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        writeln!(writer, "  {}", heading)?;
        self.write_candidates(tags, writer)
    }

    fn write_analysis(
        &self,
        pin: Option<&PinSpec>,
        report: &FreshnessReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let is_branch = pin.is_some_and(PinSpec::is_branch);
        let pinned = pin.map(PinSpec::name).unwrap_or_default();

        if is_branch {
            writeln!(
                writer,
                "  Current branch: {} (version {})",
                self.bold(pinned),
                report.current_version
            )?;
        } else {
            let date = report
                .current_date
                .map(|d| format!(" ({})", d.format("%Y-%m-%d %H:%M:%S")))
                .unwrap_or_default();
            writeln!(
                writer,
                "  Current tag: {}{} (version {})",
                self.bold(pinned),
                date,
                report.current_version
            )?;
            if report.has_unknown_format() && report.kind != FreshnessKind::UnknownFormat {
                writeln!(
                    writer,
                    "  {}",
                    self.warning("Tag format not recognized, compared by date only")
                )?;
            }
        }

        match report.kind {
            FreshnessKind::UpToDate => {
                writeln!(writer, "  {}", self.good("Up to date"))?;
            }
            FreshnessKind::OutdatedTag => {
                writeln!(writer, "  {}", self.warning("Newer tags available:"))?;
                self.write_candidates(&report.superseding, writer)?;
            }
            FreshnessKind::OutdatedBranch => {
                writeln!(writer, "  {}", self.warning("Newer branches available:"))?;
                self.write_candidates(&report.superseding, writer)?;
            }
            FreshnessKind::UnknownFormat => {
                writeln!(writer, "  {}", self.bad("Unknown branch format"))?;
                if !report.superseding.is_empty() {
                    writeln!(writer, "  Branches:")?;
                    self.write_candidates(&report.superseding, writer)?;
                }
            }
            FreshnessKind::MissingCurrentTag => {
                writeln!(writer, "  {}", self.bad("Current tag not found upstream"))?;
            }
            FreshnessKind::NoCandidates => {
                let what = if is_branch { "No branches found" } else { "No tags found" };
                writeln!(writer, "  {}", self.bad(what))?;
            }
        }

        if is_branch {
            writeln!(
                writer,
                "  {}",
                self.warning("Branch pins should be moved to a specific tag")
            )?;
            self.write_latest_tags("Latest tags:", &report.latest_tags, writer)?;
        }

        Ok(())
    }

    fn format_summary(
        &self,
        summary: &AuditSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let total = summary.total();
        if total == 0 {
            writeln!(writer, "No parts to audit")?;
            return Ok(());
        }

        let outdated = summary.outdated_count();
        let counts = format!(
            "{} up to date, {} outdated, {} with problems, {} unpinned, {} skipped",
            summary.up_to_date_count(),
            outdated,
            summary.problem_count(),
            summary.unpinned_count(),
            summary.skipped_count()
        );
        let headline = format!("{} part(s) audited:", total);

        if outdated > 0 {
            writeln!(writer, "{} {}", self.bold(&headline), self.warning(&counts))
        } else {
            writeln!(writer, "{} {}", self.bold(&headline), counts)
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for report in &result.summary.reports {
            self.format_report(report, writer)?;
            writeln!(writer)?;
        }

        if !result.is_fatal() {
            self.format_summary(&result.summary, writer)?;
        }

        if !result.errors.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.bad("Errors:"))?;
            for error in &result.errors {
                writeln!(writer, "  - {}", error)?;
            }
        }

        Ok(())
    }

    fn format_report(&self, report: &EntryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let entry = &report.entry;
        writeln!(
            writer,
            "Part: {} ({})",
            self.bold(&entry.id),
            self.dim(&entry.source)
        )?;

        match &report.outcome {
            EntryOutcome::Skipped { reason } => {
                writeln!(writer, "  {}", self.dim(&format!("Skipped: {}", reason)))
            }
            EntryOutcome::NoPin { latest_tags } => {
                writeln!(
                    writer,
                    "  {}",
                    self.warning("Has neither a source-tag nor a source-branch")
                )?;
                self.write_latest_tags("Latest tags:", latest_tags, writer)
            }
            EntryOutcome::Analyzed(analysis) => {
                self.write_analysis(entry.pin.as_ref(), analysis, writer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManifestEntry, SkipReason};
    use crate::freshness;
    use crate::orchestrator::OrchestratorError;
    use chrono::{TimeZone, Utc};

    fn render(report: &EntryReport) -> String {
        let mut out = Vec::new();
        TextFormatter::with_color(false)
            .format_report(report, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn tag(name: &str, month: u32) -> Candidate {
        Candidate::tag(name, Utc.with_ymd_and_hms(2023, month, 1, 0, 0, 0).unwrap())
    }

    fn entry(pin: PinSpec) -> ManifestEntry {
        ManifestEntry::new("gtk", "https://github.com/GNOME/gtk.git").with_pin(pin)
    }

    #[test]
    fn test_outdated_tag() {
        let tags = vec![tag("4.10.0", 1), tag("4.12.0", 6)];
        let pin = PinSpec::Tag("4.10.0".to_string());
        let report = EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &tags, &[]));

        let out = render(&report);
        assert!(out.starts_with("Part: gtk (https://github.com/GNOME/gtk.git)\n"));
        assert!(out.contains("Current tag: 4.10.0 (2023-01-01 00:00:00) (version 4.10.0)"));
        assert!(out.contains("Newer tags available:"));
        assert!(out.contains("    - 4.12.0 (2023-06-01 00:00:00)"));
    }

    #[test]
    fn test_up_to_date_tag() {
        let tags = vec![tag("4.10.0", 1), tag("4.12.0", 6)];
        let pin = PinSpec::Tag("4.12.0".to_string());
        let report = EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &tags, &[]));

        assert!(render(&report).contains("Up to date"));
    }

    #[test]
    fn test_branch_suggests_tags() {
        let tags = vec![tag("4.12.0", 6)];
        let branches = vec![Candidate::branch("gtk-4-10"), Candidate::branch("gtk-4-12")];
        let pin = PinSpec::Branch("gtk-4-10".to_string());
        let report =
            EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &tags, &branches));

        let out = render(&report);
        assert!(out.contains("Current branch: gtk-4-10"));
        assert!(out.contains("Newer branches available:"));
        assert!(out.contains("    - gtk-4-12\n"));
        assert!(out.contains("Branch pins should be moved to a specific tag"));
        assert!(out.contains("Latest tags:"));
    }

    #[test]
    fn test_unknown_branch_format_lists_branches() {
        let branches = vec![Candidate::branch("main"), Candidate::branch("release-1.0")];
        let pin = PinSpec::Branch("main".to_string());
        let report =
            EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &[], &branches));

        let out = render(&report);
        assert!(out.contains("Unknown branch format"));
        assert!(out.contains("  Branches:\n    - release-1.0\n"));
        assert!(!out.contains("    - main\n"));
    }

    #[test]
    fn test_unknown_branch_format_without_candidates() {
        let pin = PinSpec::Branch("main".to_string());
        let report = EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &[], &[]));

        let out = render(&report);
        assert!(out.contains("Unknown branch format"));
        assert!(!out.contains("Branches:"));
    }

    #[test]
    fn test_missing_tag() {
        let pin = PinSpec::Tag("9.9".to_string());
        let report =
            EntryReport::analyzed(entry(pin.clone()), freshness::analyze(&pin, &[tag("1.0", 1)], &[]));
        assert!(render(&report).contains("Current tag not found upstream"));
    }

    #[test]
    fn test_skipped() {
        let report = EntryReport::skipped(
            ManifestEntry::new("local", "snap/local"),
            SkipReason::UnsupportedProtocol,
        );
        assert_eq!(
            render(&report),
            "Part: local (snap/local)\n  Skipped: source is neither http:// nor git://\n"
        );
    }

    #[test]
    fn test_no_pin() {
        let report = EntryReport::no_pin(
            ManifestEntry::new("lib", "https://github.com/o/lib.git"),
            vec![tag("v2", 2)],
        );
        let out = render(&report);
        assert!(out.contains("Has neither a source-tag nor a source-branch"));
        assert!(out.contains("    - v2 (2023-02-01 00:00:00)"));
    }

    #[test]
    fn test_format_with_summary_and_errors() {
        let mut summary = AuditSummary::new("snapcraft.yaml");
        summary.add_report(EntryReport::skipped(
            ManifestEntry::new("local", "."),
            SkipReason::UnsupportedProtocol,
        ));
        let result = OrchestratorResult {
            summary,
            errors: vec![OrchestratorError::UnknownPart("ghost".to_string())],
        };

        let mut out = Vec::new();
        TextFormatter::with_color(false).format(&result, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("1 part(s) audited: 0 up to date, 0 outdated, 0 with problems, 0 unpinned, 1 skipped"));
        assert!(out.contains("Errors:\n  - Part 'ghost' is not declared in the manifest"));
    }
}
