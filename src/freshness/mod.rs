//! Freshness classification of pinned references
//!
//! This module provides:
//! - Tag pins: date-driven comparison against the upstream tag list
//! - Branch pins: version-driven comparison against the upstream branch list
//! - The "most recent tags" hint attached to branch pins and unpinned entries
//!
//! Everything here is pure; fetching candidates is the caller's job and a
//! failed fetch must arrive here as an empty list.

use crate::domain::{Candidate, FreshnessKind, FreshnessReport, PinSpec};
use crate::version::{self, ParsedVersion};

/// Number of recent tags suggested for branch pins and unpinned entries
pub const LATEST_TAGS_LIMIT: usize = 4;

/// Classify a pin against the upstream tags and branches
pub fn analyze(pin: &PinSpec, tags: &[Candidate], branches: &[Candidate]) -> FreshnessReport {
    match pin {
        PinSpec::Tag(name) => analyze_tag(name, tags),
        PinSpec::Branch(name) => analyze_branch(name, branches, tags),
    }
}

/// Classify a tag pin
///
/// Every other tag dated at or after the pinned tag counts as newer; ties on
/// the timestamp are included on purpose.
pub fn analyze_tag(pinned: &str, tags: &[Candidate]) -> FreshnessReport {
    let current_version = version::parse(pinned);

    if tags.is_empty() {
        return FreshnessReport::new(FreshnessKind::NoCandidates, current_version);
    }

    let Some(current) = tags.iter().find(|t| t.name == pinned) else {
        return FreshnessReport::new(FreshnessKind::MissingCurrentTag, current_version);
    };

    let mut newer: Vec<Candidate> = tags
        .iter()
        .filter(|t| t.date >= current.date && t.name != pinned)
        .cloned()
        .collect();
    sort_by_date_desc(&mut newer);

    let kind = if newer.is_empty() {
        FreshnessKind::UpToDate
    } else {
        FreshnessKind::OutdatedTag
    };

    FreshnessReport::new(kind, current_version)
        .with_current_date(current.date)
        .with_superseding(newer)
}

/// Classify a branch pin
///
/// Branches whose names do not parse are never newer. The most recent tags
/// are always attached so the caller can suggest moving to a tag.
pub fn analyze_branch(
    pinned: &str,
    branches: &[Candidate],
    tags: &[Candidate],
) -> FreshnessReport {
    let current_version = version::parse(pinned);

    let mut newer: Vec<Candidate> = branches
        .iter()
        .filter(|b| is_newer_name(&b.name, &current_version))
        .map(|b| Candidate::branch(b.name.clone()))
        .collect();
    newer.sort_by(|a, b| b.name.cmp(&a.name));

    let kind = if !current_version.is_valid() {
        FreshnessKind::UnknownFormat
    } else if branches.is_empty() {
        FreshnessKind::NoCandidates
    } else if newer.is_empty() {
        FreshnessKind::UpToDate
    } else {
        FreshnessKind::OutdatedBranch
    };

    FreshnessReport::new(kind, current_version)
        .with_superseding(newer)
        .with_latest_tags(latest_tags(tags, LATEST_TAGS_LIMIT))
}

/// The `limit` most recently dated tags, newest first
pub fn latest_tags(tags: &[Candidate], limit: usize) -> Vec<Candidate> {
    let mut sorted = tags.to_vec();
    sort_by_date_desc(&mut sorted);
    sorted.truncate(limit);
    sorted
}

fn is_newer_name(name: &str, current: &ParsedVersion) -> bool {
    version::parse(name).is_newer(current, false)
}

/// Stable, so equal dates keep their upstream order
fn sort_by_date_desc(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.date.cmp(&a.date));
}
