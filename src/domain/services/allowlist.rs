use std::collections::BTreeSet;

/// Hosts trusted as image sources when no override is configured.
pub const DEFAULT_ALLOWED_HOSTS: [&str; 4] = [
    "user-images.githubusercontent.com",
    "raw.githubusercontent.com",
    "github.com",
    "camo.githubusercontent.com",
];

/// Exact-match host allowlist. Fails closed on anything it cannot parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowlist {
    hosts: BTreeSet<String>,
}

impl HostAllowlist {
    /// Builds an allowlist from host names. Entries are trimmed and lowercased;
    /// blanks are dropped.
    #[must_use]
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { hosts }
    }

    /// Returns true if `url` parses and its host is allowlisted.
    #[must_use]
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return false;
        };

        parsed
            .host_str()
            .is_some_and(|host| self.hosts.contains(&host.to_ascii_lowercase()))
    }

    /// Returns the configured hosts in sorted order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

impl Default for HostAllowlist {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS)
    }
}
