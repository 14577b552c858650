//! GitLab REST API (v4) host
//!
//! Works for gitlab.com and self-hosted instances such as gitlab.gnome.org.
//! The API lives on the repository's own host; the project id is the
//! URL-encoded repository path.

use super::client::{Auth, HttpClient, RequestContext};
use super::{RepositoryHost, RepositoryRef};
use crate::config::Credentials;
use crate::domain::Candidate;
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

/// Host display name
const HOST_NAME: &str = "GitLab";

#[derive(Debug, Deserialize)]
struct TagResponse {
    name: String,
    #[serde(default)]
    commit: Option<CommitResponse>,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    committed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    name: String,
}

/// Repository host for GitLab instances
pub struct GitLabHost {
    client: HttpClient,
    base_url: Option<String>,
    auth: Auth,
}

impl GitLabHost {
    /// Create a GitLab host that queries each repository's own instance
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: None,
            auth: Auth::Anonymous,
        }
    }

    /// Query this base URL instead of the repository's host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Send the configured private token
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        if let Some(token) = credentials.gitlab_token() {
            self.auth = Auth::PrivateToken(token.to_string());
        }
        self
    }

    fn repository_url(&self, repo: &RepositoryRef, listing: &str) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => format!("{}://{}", repo.api_scheme(), repo.authority()),
        };
        format!(
            "{}/api/v4/projects/{}/repository/{}",
            base,
            project_id(repo),
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

/// URL-encoded project path, e.g. `GNOME%2Fglib`
fn project_id(repo: &RepositoryRef) -> String {
    repo.segments.join("%2F")
}

#[async_trait]
impl RepositoryHost for GitLabHost {
    fn name(&self) -> &'static str {
        HOST_NAME
    }

    fn matches(&self, repo: &RepositoryRef) -> bool {
        repo.host.contains("gitlab")
    }

    async fn fetch_tags(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError> {
        let path = repo.path();
        let refs: Vec<TagResponse> = self
            .client
            .get_paginated(&self.repository_url(repo, "tags"), self.context(&path))
            .await?;
        debug!(repository = %repo, count = refs.len(), "listed tags");

        let tags = refs
            .into_iter()
            .filter_map(|tag| {
                match tag.commit.and_then(|c| c.committed_date) {
                    Some(date) => Some(Candidate::tag(tag.name, date)),
                    None => {
                        warn!(repository = %repo, tag = %tag.name, "dropping tag without commit date");
                        None
                    }
                }
            })
            .collect();

        Ok(tags)
    }

    async fn fetch_branches(&self, repo: &RepositoryRef) -> Result<Vec<Candidate>, RegistryError> {
        let path = repo.path();
        let refs: Vec<BranchResponse> = self
            .client
            .get_paginated(&self.repository_url(repo, "branches"), self.context(&path))
            .await?;
        debug!(repository = %repo, count = refs.len(), "listed branches");

        Ok(refs.into_iter().map(|b| Candidate::branch(b.name)).collect())
    }
}
