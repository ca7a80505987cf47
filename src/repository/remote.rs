//! Remote upstream recognition.
//! Patterns are tried in order and each yields the host, owner and repository
//! used to place the clone under the template root.

use regex::Regex;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Recognised remote shapes: `https://`, `git://`, `ssh://` and scp-like
/// `user@host:owner/repo`. Any path segments between the host and the owner
/// are accepted and dropped.
static REMOTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://(?:[^@/]+@)?(?P<host>[^/]+)/(?:.+/)?(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
        r"^git://(?P<host>[^/]+)/(?:.+/)?(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
        r"^ssh://(?:[^@/]+@)?(?P<host>[^/]+)/(?:.+/)?(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
        r"^[^@/:\s]+@(?P<host>[^:/]+):(?:.+/)?(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Where a remote upstream lives, reduced to the parts naming its clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub host_tag: String,
    pub owner: String,
    pub repo: String,
}

impl RemoteLocation {
    /// `<host-tag>/<owner>/<repo>`, relative to the template root.
    pub fn relative_destination(&self) -> PathBuf {
        [&self.host_tag, &self.owner, &self.repo].iter().collect()
    }
}

/// Reduces a host to the directory name used for its clones.
///
/// Port and user info are dropped, then the final label of a DNS name:
/// `github.com` becomes `github`. IP addresses and single-label hosts are kept.
pub fn host_tag(host: &str) -> String {
    let host = host.rsplit_once('@').map_or(host, |(_, host)| host);
    let host = host.split(':').next().unwrap_or(host);
    if host.parse::<IpAddr>().is_ok() {
        return host.to_string();
    }
    host.rsplit_once('.').map_or(host, |(name, _)| name).to_string()
}

/// Components that would escape the destination or hide it from listings.
fn is_safe_component(component: &str) -> bool {
    !component.is_empty() && !component.starts_with('.')
}

/// Matches `upstream` against the remote patterns.
///
/// # Returns
/// * `Option<RemoteLocation>` - None when no pattern matches or a matched
///   component is unusable as a directory name
pub fn parse_remote(upstream: &str) -> Option<RemoteLocation> {
    let captures = REMOTE_PATTERNS.iter().find_map(|pattern| pattern.captures(upstream))?;
    let location = RemoteLocation {
        host_tag: host_tag(&captures["host"]),
        owner: captures["owner"].to_string(),
        repo: captures["repo"].to_string(),
    };

    [&location.host_tag, &location.owner, &location.repo]
        .iter()
        .all(|component| is_safe_component(component))
        .then_some(location)
}
