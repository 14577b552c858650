//! GitHub REST API host
//!
//! Tags: `GET /repos/{owner}/{repo}/tags`, then one commit lookup per tag
//! for its date. Branches: `GET /repos/{owner}/{repo}/branches`.

use super::client::{Auth, HttpClient, RequestContext};
use super::{RepositoryHost, RepositoryRef};
use crate::config::Credentials;
use crate::domain::Candidate;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

/// Default base URL for GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Host display name
const HOST_NAME: &str = "GitHub";

/// Hosts served by this adapter
const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

#[derive(Debug, Deserialize)]
struct RefResponse {
    name: String,
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    author: Option<Signature>,
    #[serde(default)]
    committer: Option<Signature>,
}

#[derive(Debug, Deserialize)]
struct Signature {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl CommitDetail {
    fn date(&self) -> Option<DateTime<Utc>> {
        self.committer
            .as_ref()
            .and_then(|s| s.date)
            .or_else(|| self.author.as_ref().and_then(|s| s.date))
    }
}

/// Repository host for github.com
pub struct GitHubHost {
    client: HttpClient,
    base_url: String,
    auth: Auth,
}

impl GitHubHost {
    /// Create a GitHub host using the public API
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: Auth::Anonymous,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use basic auth when both user and token are configured
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        if let Some((user, token)) = credentials.github_basic_auth() {
            self.auth = Auth::Basic {
                user: user.to_string(),
                password: token.to_string(),
            };
        }
        self
    }

    fn repo_url(&self, repo: &RepositoryRef, listing: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url,
            repo.owner(),
            repo.name(),
            listing
        )
    }

    fn context<'a>(&'a self, repository: &'a str) -> RequestContext<'a> {
        RequestContext {
            repository,
            host: HOST_NAME,
            auth: &self.auth,
        }
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    fn name(&self) -> &'static str {
        HOST_NAME
    }

    fn matches(&self, repo: &RepositoryRef) -> bool {
        GITHUB_HOSTS.contains(&repo.host.as_str())
    }

    async fn fetch_tags(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError> {
        let path = repo.path();
        let ctx = self.context(&path);
        let refs: Vec<RefResponse> = self
            .client
            .get_paginated(&self.repo_url(repo, "tags"), ctx)
            .await?;
        debug!(repository = %repo, count = refs.len(), "listed tags");

        let mut tags = Vec::with_capacity(refs.len());
        for tag in refs {
            let commit: CommitResponse = match self.client.get_json(&tag.commit.url, ctx).await {
                Ok(commit) => commit,
                Err(e) => {
                    warn!(repository = %repo, tag = %tag.name, error = %e, "dropping tag without commit");
                    continue;
                }
            };

            match commit.commit.date() {
                Some(date) => tags.push(Candidate::tag(tag.name, date)),
                None => warn!(repository = %repo, tag = %tag.name, "dropping tag without commit date"),
            }
        }

        Ok(tags)
    }

    async fn fetch_branches(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError> {
        let path = repo.path();
        let refs: Vec<RefResponse> = self
            .client
            .get_paginated(&self.repo_url(repo, "branches"), self.context(&path))
            .await?;
        debug!(repository = %repo, count = refs.len(), "listed branches");

        Ok(refs.into_iter().map(|b| Candidate::branch(b.name)).collect())
    }
}
