//! Host credentials configuration
//!
//! Credentials are read from a TOML file:
//!
//! ```toml
//! [github]
//! user = "octocat"
//! token = "ghp_..."
//!
//! [gitlab]
//! token = "glpat-..."
//! ```
//!
//! Lookup order: the `--config` argument, `<config_dir>/snapup/snapup.toml`,
//! then `snapup.toml` next to the manifest. A missing file means anonymous
//! access.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name
pub const CONFIG_FILENAME: &str = "snapup.toml";

/// GitHub credentials, sent as HTTP basic auth
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitHubCredentials {
    pub user: Option<String>,
    pub token: Option<String>,
}

/// GitLab credentials, sent as the `PRIVATE-TOKEN` header
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitLabCredentials {
    pub token: Option<String>,
}

/// Credentials for every supported host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub github: GitHubCredentials,
    #[serde(default)]
    pub gitlab: GitLabCredentials,
}

impl Credentials {
    /// Parse credentials from TOML content
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read credentials from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load credentials following the lookup order
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>, manifest_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        match config_candidates(manifest_dir)
            .into_iter()
            .find(|candidate| candidate.is_file())
        {
            Some(path) => {
                debug!(path = %path.display(), "reading credentials");
                Self::from_file(&path)
            }
            None => {
                debug!("no credentials file found, using anonymous access");
                Ok(Self::default())
            }
        }
    }

    /// Returns GitHub basic auth (user, token) when both are set
    pub fn github_basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.github.user, &self.github.token) {
            (Some(user), Some(token)) => Some((user.as_str(), token.as_str())),
            _ => None,
        }
    }

    /// Returns the GitLab private token, if set
    pub fn gitlab_token(&self) -> Option<&str> {
        self.gitlab.token.as_deref()
    }
}

/// Implicit config locations, in lookup order
pub fn config_candidates(manifest_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("snapup").join(CONFIG_FILENAME));
    }
    candidates.push(manifest_dir.join(CONFIG_FILENAME));
    candidates
}
