//! Repository hosts for fetching upstream tags and branches
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic and pagination
//! - Repository URL parsing
//! - GitHub and GitLab adapters

mod client;
mod github;
mod gitlab;
mod repo_url;

pub use client::{Auth, HttpClient, RequestContext};
pub use github::GitHubHost;
pub use gitlab::GitLabHost;
pub use repo_url::RepositoryRef;

use crate::config::Credentials;
use crate::domain::Candidate;
use crate::error::RegistryError;
use async_trait::async_trait;

/// A git hosting service able to list tags and branches
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Host display name
    fn name(&self) -> &'static str;

    /// Returns true if this host serves the repository
    fn matches(&self, repo: &RepositoryRef) -> bool;

    /// Fetch tags with their commit dates
    async fn fetch_tags(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError>;

    /// Fetch branch names
    async fn fetch_branches(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError>;
}

/// Create the supported hosts in lookup order
pub fn default_hosts(client: HttpClient, credentials: &Credentials) -> Vec<Box<dyn RepositoryHost>> {
    vec![
        Box::new(GitHubHost::new(client.clone()).with_credentials(credentials)),
        Box::new(GitLabHost::new(client).with_credentials(credentials)),
    ]
}

/// Pick the first host serving the repository
pub fn select_host<'a>(
    hosts: &'a [Box<dyn RepositoryHost>],
    repo: &RepositoryRef,
) -> Result<&'a dyn RepositoryHost, RegistryError> {
    hosts
        .iter()
        .find(|host| host.matches(repo))
        .map(|host| &**host)
        .ok_or_else(|| RegistryError::unsupported_host(&repo.url))
}
