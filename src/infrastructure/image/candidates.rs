//! Equivalent addresses for GitHub attachment assets.

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

/// Hosts that serve attachment assets by bare identifier.
pub const ALTERNATE_ASSET_HOSTS: [&str; 2] = [
    "user-images.githubusercontent.com",
    "private-user-images.githubusercontent.com",
];

static ATTACHMENT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(?:user-attachments/assets|[^/]+/[^/]+/assets/[^/]+)/([A-Za-z0-9-]+)/?$")
        .expect("valid attachment path regex")
});

/// Extracts the asset identifier from an attachment URL.
///
/// Matches `/user-attachments/assets/<id>` and `/<owner>/<repo>/assets/<user>/<id>`.
#[must_use]
pub fn extract_asset_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    ATTACHMENT_PATH_RE
        .captures(parsed.path())
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Checks if a URL is an attachment asset URL.
#[must_use]
pub fn is_attachment_url(url: &str) -> bool {
    extract_asset_id(url).is_some()
}

/// Returns `url` with `raw=true`, keeping every other query parameter.
#[must_use]
pub fn with_raw_param(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "raw")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("raw", "true");
    Some(parsed.into())
}

/// Ordered fetch candidates: the URL itself, then for attachment URLs the
/// `raw=true` variant and one bare-identifier URL per alternate host.
#[must_use]
pub fn candidate_urls(url: &str) -> Vec<String> {
    let mut candidates = vec![url.to_string()];

    let Some(asset_id) = extract_asset_id(url) else {
        return candidates;
    };

    if let Some(raw) = with_raw_param(url) {
        candidates.push(raw);
    }
    candidates.extend(
        ALTERNATE_ASSET_HOSTS
            .iter()
            .map(|host| format!("https://{host}/assets/{asset_id}")),
    );
    candidates.dedup();
    candidates
}
