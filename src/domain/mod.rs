//! Core domain models for snapup
//!
//! This module contains the fundamental types used throughout the application:
//! - Pins declared by manifest entries
//! - Upstream candidates (tags and branches)
//! - Freshness verdicts and per-entry outcomes
//! - Summary structures

mod candidate;
mod entry;
mod entry_report;
mod pin;
mod report;
mod summary;

pub use candidate::Candidate;
pub use entry::ManifestEntry;
pub use entry_report::{EntryOutcome, EntryReport, SkipReason};
pub use pin::PinSpec;
pub use report::{FreshnessKind, FreshnessReport};
pub use summary::AuditSummary;
