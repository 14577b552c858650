//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the audit result
//! - Part-by-part status with superseding references

use crate::domain::{AuditSummary, Candidate, EntryOutcome, EntryReport, ManifestEntry};
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Path of the audited manifest
    manifest: String,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-part results
    parts: Vec<JsonPart>,
    /// Errors encountered
    errors: Vec<String>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    up_to_date: usize,
    outdated: usize,
    problems: usize,
    unpinned: usize,
    skipped: usize,
}

/// JSON representation of a part
#[derive(Serialize)]
struct JsonPart {
    /// Part name
    name: String,
    /// Source URL
    source: String,
    /// `up_to_date`, `outdated_tag`, ..., `unpinned` or `skipped`
    status: &'static str,
    /// Pinned reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pin: Option<JsonPin>,
    /// Pinned name parsed as a version, when recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    /// Date of the pinned tag
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
    /// References superseding the pin
    #[serde(skip_serializing_if = "Vec::is_empty")]
    newer: Vec<JsonRef>,
    /// Most recent upstream tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    latest_tags: Vec<JsonRef>,
    /// Why the part was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Serialize)]
struct JsonPin {
    /// `tag` or `branch`
    kind: &'static str,
    name: String,
}

#[derive(Serialize)]
struct JsonRef {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
}

impl From<&Candidate> for JsonRef {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            date: candidate.date,
        }
    }
}

impl JsonPart {
    fn new(entry: &ManifestEntry, status: &'static str, pin: Option<JsonPin>) -> Self {
        Self {
            name: entry.id.clone(),
            source: entry.source.clone(),
            status,
            pin,
            version: None,
            date: None,
            newer: Vec::new(),
            latest_tags: Vec::new(),
            reason: None,
        }
    }
}

fn refs(candidates: &[Candidate]) -> Vec<JsonRef> {
    candidates.iter().map(JsonRef::from).collect()
}

impl JsonFormatter {
    fn summary_to_json(summary: &AuditSummary) -> JsonSummary {
        JsonSummary {
            total: summary.total(),
            up_to_date: summary.up_to_date_count(),
            outdated: summary.outdated_count(),
            problems: summary.problem_count(),
            unpinned: summary.unpinned_count(),
            skipped: summary.skipped_count(),
        }
    }

    fn report_to_json(report: &EntryReport) -> JsonPart {
        let entry = &report.entry;
        let pin = entry.pin.as_ref().map(|pin| JsonPin {
            kind: if pin.is_tag() { "tag" } else { "branch" },
            name: pin.name().to_string(),
        });

        match &report.outcome {
            EntryOutcome::Analyzed(analysis) => JsonPart {
                version: analysis
                    .current_version
                    .is_valid()
                    .then(|| analysis.current_version.to_string()),
                date: analysis.current_date,
                newer: refs(&analysis.superseding),
                latest_tags: refs(&analysis.latest_tags),
                ..JsonPart::new(entry, analysis.kind.as_str(), pin)
            },
            EntryOutcome::NoPin { latest_tags } => JsonPart {
                latest_tags: refs(latest_tags),
                ..JsonPart::new(entry, "unpinned", pin)
            },
            EntryOutcome::Skipped { reason } => JsonPart {
                reason: Some(reason.to_string()),
                ..JsonPart::new(entry, "skipped", pin)
            },
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            manifest: result.summary.manifest.display().to_string(),
            summary: Self::summary_to_json(&result.summary),
            parts: result.summary.reports.iter().map(Self::report_to_json).collect(),
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    fn format_report(&self, report: &EntryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&Self::report_to_json(report))
            .map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
