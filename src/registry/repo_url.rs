//! Repository URL parsing
//!
//! Turns a part `source` such as `https://github.com/GNOME/gtk.git` into
//! its scheme, host and owner/name path.

use crate::error::RegistryError;
use reqwest::Url;
use std::fmt;

const SUPPORTED_SCHEMES: [&str; 3] = ["http", "https", "git"];

/// A repository on a git hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// URL as given, trimmed
    pub url: String,
    /// `http`, `https` or `git`
    pub scheme: String,
    /// Lowercased host name
    pub host: String,
    /// Explicit port, when it differs from the scheme's default
    pub port: Option<u16>,
    /// Path segments without the `.git` suffix; at least owner and name
    pub segments: Vec<String>,
}

impl RepositoryRef {
    /// Parse a repository URL
    pub fn parse(url: &str) -> Result<Self, RegistryError> {
        let trimmed = url.trim();
        let parsed = Url::parse(trimmed)
            .map_err(|e| RegistryError::invalid_repository_url(trimmed, e.to_string()))?;

        let scheme = parsed.scheme().to_string();
        if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
            return Err(RegistryError::invalid_repository_url(
                trimmed,
                format!("unsupported scheme '{}'", scheme),
            ));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| RegistryError::invalid_repository_url(trimmed, "missing host"))?
            .to_ascii_lowercase();

        let path = parsed.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.len() < 2 {
            return Err(RegistryError::invalid_repository_url(
                trimmed,
                "expected owner and repository name",
            ));
        }

        Ok(Self {
            url: trimmed.to_string(),
            scheme,
            host,
            port: parsed.port(),
            segments,
        })
    }

    /// First path segment
    pub fn owner(&self) -> &str {
        &self.segments[0]
    }

    /// Last path segment
    pub fn name(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Full path, e.g. `GNOME/gtk` or `group/subgroup/project`
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// `host` or `host:port`
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Scheme to use for API calls; `git://` hosts are queried over https
    pub fn api_scheme(&self) -> &str {
        match self.scheme.as_str() {
            "http" => "http",
            _ => "https",
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github() {
        let repo = RepositoryRef::parse("https://github.com/GNOME/gtk.git").unwrap();
        assert_eq!(repo.scheme, "https");
        assert_eq!(repo.host, "github.com");
        assert_eq!(repo.owner(), "GNOME");
        assert_eq!(repo.name(), "gtk");
        assert_eq!(repo.path(), "GNOME/gtk");
        assert_eq!(repo.port, None);
        assert_eq!(repo.authority(), "github.com");
    }

    #[test]
    fn test_parse_keeps_explicit_port() {
        let repo = RepositoryRef::parse("https://gitlab.example.org:8443/group/proj.git").unwrap();
        assert_eq!(repo.host, "gitlab.example.org");
        assert_eq!(repo.port, Some(8443));
        assert_eq!(repo.authority(), "gitlab.example.org:8443");
    }

    #[test]
    fn test_parse_drops_default_port() {
        let repo = RepositoryRef::parse("https://gitlab.example.org:443/group/proj.git").unwrap();
        assert_eq!(repo.port, None);
    }

    #[test]
    fn test_parse_without_git_suffix() {
        let repo = RepositoryRef::parse("https://gitlab.gnome.org/GNOME/glib").unwrap();
        assert_eq!(repo.path(), "GNOME/glib");
    }

    #[test]
    fn test_parse_trims_whitespace_and_slash() {
        let repo = RepositoryRef::parse("  https://github.com/o/r.git/ \n").unwrap();
        assert_eq!(repo.url, "https://github.com/o/r.git/");
        assert_eq!(repo.path(), "o/r");
    }

    #[test]
    fn test_parse_nested_group() {
        let repo = RepositoryRef::parse("https://gitlab.com/group/sub/project.git").unwrap();
        assert_eq!(repo.owner(), "group");
        assert_eq!(repo.name(), "project");
        assert_eq!(repo.path(), "group/sub/project");
    }

    #[test]
    fn test_parse_git_scheme() {
        let repo = RepositoryRef::parse("git://github.com/o/r.git").unwrap();
        assert_eq!(repo.scheme, "git");
        assert_eq!(repo.api_scheme(), "https");
    }

    #[test]
    fn test_http_scheme_kept_for_api() {
        let repo = RepositoryRef::parse("http://127.0.0.1:1234/o/r.git").unwrap();
        assert_eq!(repo.api_scheme(), "http");
    }

    #[test]
    fn test_host_lowercased() {
        let repo = RepositoryRef::parse("https://GitHub.com/o/r.git").unwrap();
        assert_eq!(repo.host, "github.com");
    }

    #[test]
    fn test_parse_rejects_scheme() {
        let err = RepositoryRef::parse("ftp://example.org/o/r.git").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRepositoryUrl { .. }));
    }

    #[test]
    fn test_parse_rejects_short_path() {
        assert!(RepositoryRef::parse("https://github.com/only").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RepositoryRef::parse("not a url").is_err());
    }

    #[test]
    fn test_display() {
        let repo = RepositoryRef::parse("https://github.com/GNOME/gtk.git").unwrap();
        assert_eq!(repo.to_string(), "github.com/GNOME/gtk");
    }
}
