//! Part source validation
//!
//! A source can only be audited when it is a git repository reachable over
//! http(s) or git, unless the part declares `source-type: git` explicitly.

use crate::domain::{ManifestEntry, SkipReason};
use reqwest::Url;

/// Schemes whose repositories can be queried
const SUPPORTED_SCHEMES: [&str; 3] = ["http://", "https://", "git://"];

/// Hosts known to lack a tag/branch API
const UNSUPPORTED_HOSTS: [(&str, &str); 1] = [("savannah", "Savannah")];

/// Check whether an entry's source can be audited
pub fn check_source(entry: &ManifestEntry) -> Result<(), SkipReason> {
    let source = entry.source.as_str();
    let declared_git = entry.is_declared_git();

    if !declared_git && !SUPPORTED_SCHEMES.iter().any(|s| source.starts_with(s)) {
        return Err(SkipReason::UnsupportedProtocol);
    }

    if !declared_git && !source.ends_with(".git") {
        return Err(SkipReason::NotGitRepository);
    }

    if let Some(host) = Url::parse(source).ok().and_then(|u| u.host_str().map(str::to_string)) {
        for (marker, display) in UNSUPPORTED_HOSTS {
            if host.contains(marker) {
                return Err(SkipReason::UnsupportedHost(display.to_string()));
            }
        }
    }

    Ok(())
}
