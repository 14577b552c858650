//! Application error types using thiserror
//!
//! Error types:
//! - ManifestError: Issues with locating or parsing snapcraft.yaml
//! - RegistryError: Issues with repository host communication
//! - ConfigError: Issues with the credentials file

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("no snapcraft file found at {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },

    /// The manifest declares no `parts` section
    #[error("no parts declared in {path}")]
    MissingParts { path: PathBuf },
}

/// Errors related to repository host communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Repository not found on the host
    #[error("repository '{repository}' not found on {host}")]
    RepositoryNotFound { repository: String, host: String },

    /// Network request failed
    #[error("failed to fetch '{repository}' from {host}: {message}")]
    NetworkError {
        repository: String,
        host: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {host}")]
    RateLimitExceeded { host: String },

    /// Invalid response from host
    #[error("invalid response from {host} for '{repository}': {message}")]
    InvalidResponse {
        repository: String,
        host: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{repository}' from {host}")]
    Timeout { repository: String, host: String },

    /// Authentication error
    #[error("authentication failed for {host}: {message}")]
    AuthenticationError { host: String, message: String },

    /// No host adapter handles this repository
    #[error("no supported host for repository '{repository}'")]
    UnsupportedHost { repository: String },

    /// The repository URL cannot be queried
    #[error("invalid repository URL '{url}': {message}")]
    InvalidRepositoryUrl { url: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Explicitly requested config file does not exist
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingParts error
    pub fn missing_parts(path: impl Into<PathBuf>) -> Self {
        ManifestError::MissingParts { path: path.into() }
    }
}

impl RegistryError {
    /// Creates a new RepositoryNotFound error
    pub fn repository_not_found(repository: impl Into<String>, host: impl Into<String>) -> Self {
        RegistryError::RepositoryNotFound {
            repository: repository.into(),
            host: host.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        repository: impl Into<String>,
        host: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            repository: repository.into(),
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        repository: impl Into<String>,
        host: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            repository: repository.into(),
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(host: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded { host: host.into() }
    }

    /// Creates a new Timeout error
    pub fn timeout(repository: impl Into<String>, host: impl Into<String>) -> Self {
        RegistryError::Timeout {
            repository: repository.into(),
            host: host.into(),
        }
    }

    /// Creates a new UnsupportedHost error
    pub fn unsupported_host(repository: impl Into<String>) -> Self {
        RegistryError::UnsupportedHost {
            repository: repository.into(),
        }
    }

    /// Creates a new InvalidRepositoryUrl error
    pub fn invalid_repository_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidRepositoryUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}
