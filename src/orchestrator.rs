//! Audit orchestrator coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: locate → parse → select parts → fetch → classify
//! - Source validation before any network access
//! - No-fetch mode (every pin is classified against empty lists)
//! - Error handling with partial continuation: a failed fetch degrades to an
//!   empty candidate list and is recorded, the audit goes on

use crate::cli::CliArgs;
use crate::config::Credentials;
use crate::domain::{AuditSummary, Candidate, EntryReport, ManifestEntry, PinSpec, SkipReason};
use crate::freshness::{self, LATEST_TAGS_LIMIT};
use crate::manifest::{check_source, load_manifest, Manifest};
use crate::progress::Progress;
use crate::registry::{default_hosts, select_host, HttpClient, RepositoryHost, RepositoryRef};
use std::fmt;
use tracing::{debug, info, warn};

/// Orchestrator for coordinating the audit workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Hosts injected by the caller; built from the credentials otherwise
    hosts: Option<Vec<Box<dyn RepositoryHost>>>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// One report per audited entry
    pub summary: AuditSummary,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    fn failed(manifest: impl Into<std::path::PathBuf>, error: OrchestratorError) -> Self {
        Self {
            summary: AuditSummary::new(manifest),
            errors: vec![error],
        }
    }

    /// Returns true if the manifest could not be audited at all
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(OrchestratorError::is_fatal)
    }
}

/// Errors that can occur during orchestration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Failed to create HTTP client
    HttpClientError(String),
    /// Failed to locate, read or parse the manifest
    ManifestError(String),
    /// Failed to load the credentials file
    ConfigError(String),
    /// A part named on the command line is not declared
    UnknownPart(String),
    /// Failed to fetch references for a part
    FetchError { part: String, message: String },
}

impl OrchestratorError {
    /// Fatal errors leave nothing to report
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OrchestratorError::HttpClientError(_) | OrchestratorError::ManifestError(_)
        )
    }
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestratorError::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
            OrchestratorError::ManifestError(msg) => write!(f, "{}", msg),
            OrchestratorError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            OrchestratorError::UnknownPart(part) => {
                write!(f, "Part '{}' is not declared in the manifest", part)
            }
            OrchestratorError::FetchError { part, message } => {
                write!(f, "Failed to fetch {}: {}", part, message)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

/// Where a part's references come from
enum Upstream<'a> {
    /// Fetching is disabled or impossible; classify against empty lists
    Offline,
    /// Query this host
    Host(&'a dyn RepositoryHost, RepositoryRef),
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Self {
        Self { args, hosts: None }
    }

    /// Create an orchestrator with custom repository hosts (for testing)
    pub fn with_hosts(args: CliArgs, hosts: Vec<Box<dyn RepositoryHost>>) -> Self {
        Self {
            args,
            hosts: Some(hosts),
        }
    }

    /// Run the audit workflow
    pub async fn run(&self) -> OrchestratorResult {
        self.run_with_progress(self.args.show_progress()).await
    }

    /// Run the audit workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        let mut errors = Vec::new();

        // Step 1: Load the manifest
        progress.spinner("Reading manifest...");
        let manifest = match load_manifest(&self.args.path) {
            Ok(manifest) => manifest,
            Err(e) => {
                progress.finish_and_clear();
                return OrchestratorResult::failed(
                    &self.args.path,
                    OrchestratorError::ManifestError(e.to_string()),
                );
            }
        };
        progress.finish_and_clear();

        // Step 2: Prepare the hosts
        let built_hosts;
        let hosts: &[Box<dyn RepositoryHost>] = match &self.hosts {
            Some(hosts) => hosts,
            None if self.args.no_fetch => &[],
            None => {
                let credentials = self.load_credentials(&manifest, &mut errors);
                let client = match HttpClient::new() {
                    Ok(client) => client,
                    Err(e) => {
                        return OrchestratorResult::failed(
                            &manifest.path,
                            OrchestratorError::HttpClientError(e.to_string()),
                        );
                    }
                };
                built_hosts = default_hosts(client, &credentials);
                &built_hosts
            }
        };

        // Step 3: Select the entries to audit
        let entries = self.select_entries(&manifest, &mut errors);

        // Step 4: Fetch and classify each entry
        let mut summary = AuditSummary::new(&manifest.path);
        progress.start(entries.len() as u64, "Auditing parts");

        for entry in entries {
            progress.set_part(&entry.id);
            let report = self.audit_entry(entry, hosts, &mut errors).await;
            debug!(report = %report, "audited");
            summary.add_report(report);
            progress.inc();
        }
        progress.finish_and_clear();

        OrchestratorResult { summary, errors }
    }

    /// Load credentials; a broken config file is reported and ignored
    fn load_credentials(
        &self,
        manifest: &Manifest,
        errors: &mut Vec<OrchestratorError>,
    ) -> Credentials {
        match Credentials::load(self.args.config.as_deref(), manifest.dir()) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "continuing without credentials");
                errors.push(OrchestratorError::ConfigError(e.to_string()));
                Credentials::default()
            }
        }
    }

    /// Entries to audit: all of them, or the named parts in the given order
    fn select_entries(
        &self,
        manifest: &Manifest,
        errors: &mut Vec<OrchestratorError>,
    ) -> Vec<ManifestEntry> {
        if self.args.parts.is_empty() {
            return manifest.entries.clone();
        }

        let mut selected = Vec::with_capacity(self.args.parts.len());
        for name in &self.args.parts {
            match manifest.entry(name) {
                Some(entry) => selected.push(entry.clone()),
                None if manifest.has_part(name) => {
                    info!(part = %name, "part has no source, nothing to audit");
                }
                None => errors.push(OrchestratorError::UnknownPart(name.clone())),
            }
        }
        selected
    }

    /// Produce exactly one report for an entry
    async fn audit_entry(
        &self,
        entry: ManifestEntry,
        hosts: &[Box<dyn RepositoryHost>],
        errors: &mut Vec<OrchestratorError>,
    ) -> EntryReport {
        if let Err(reason) = check_source(&entry) {
            info!(part = %entry.id, reason = %reason, "skipping part");
            return EntryReport::skipped(entry, reason);
        }

        let upstream = match self.resolve_upstream(&entry, hosts, errors) {
            Ok(upstream) => upstream,
            Err(reason) => {
                info!(part = %entry.id, reason = %reason, "skipping part");
                return EntryReport::skipped(entry, reason);
            }
        };

        let tags = fetch_tags(&upstream, &entry.id, errors).await;

        let Some(pin) = entry.pin.clone() else {
            let latest = freshness::latest_tags(&tags, LATEST_TAGS_LIMIT);
            return EntryReport::no_pin(entry, latest);
        };

        let branches = match &pin {
            PinSpec::Branch(_) => fetch_branches(&upstream, &entry.id, errors).await,
            PinSpec::Tag(_) => Vec::new(),
        };

        let report = freshness::analyze(&pin, &tags, &branches);
        EntryReport::analyzed(entry, report)
    }

    fn resolve_upstream<'a>(
        &self,
        entry: &ManifestEntry,
        hosts: &'a [Box<dyn RepositoryHost>],
        errors: &mut Vec<OrchestratorError>,
    ) -> Result<Upstream<'a>, SkipReason> {
        if self.args.no_fetch {
            return Ok(Upstream::Offline);
        }

        let repo = match RepositoryRef::parse(&entry.source) {
            Ok(repo) => repo,
            Err(e) => {
                warn!(part = %entry.id, error = %e, "cannot query repository");
                errors.push(OrchestratorError::FetchError {
                    part: entry.id.clone(),
                    message: e.to_string(),
                });
                return Ok(Upstream::Offline);
            }
        };

        match select_host(hosts, &repo) {
            Ok(host) => Ok(Upstream::Host(host, repo)),
            Err(_) => Err(SkipReason::UnsupportedHost(repo.host)),
        }
    }
}

async fn fetch_tags(
    upstream: &Upstream<'_>,
    part: &str,
    errors: &mut Vec<OrchestratorError>,
) -> Vec<Candidate> {
    let Upstream::Host(host, repo) = upstream else {
        return Vec::new();
    };
    degrade(host.fetch_tags(repo).await, part, errors)
}

async fn fetch_branches(
    upstream: &Upstream<'_>,
    part: &str,
    errors: &mut Vec<OrchestratorError>,
) -> Vec<Candidate> {
    let Upstream::Host(host, repo) = upstream else {
        return Vec::new();
    };
    degrade(host.fetch_branches(repo).await, part, errors)
}

/// Turn a failed fetch into an empty list and record the failure
fn degrade<E: fmt::Display>(
    result: Result<Vec<Candidate>, E>,
    part: &str,
    errors: &mut Vec<OrchestratorError>,
) -> Vec<Candidate> {
    match result {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(part, error = %e, "fetch failed, continuing with an empty list");
            errors.push(OrchestratorError::FetchError {
                part: part.to_string(),
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}
