//! Destination paths for published assets.

use std::fmt;

/// Top-level directory of published assets in the storage repository.
pub const ASSET_ROOT: &str = "assets";

/// Maximum length of a sanitized basename.
pub const MAX_BASENAME_LEN: usize = 180;

/// Extension of every published asset.
pub const TARGET_EXTENSION: &str = "webp";

const FALLBACK_BASENAME: &str = "image";

/// Repository-relative path of a published asset:
/// `assets/<subject-id>/<unix-ms>-<sanitized-basename>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    /// Builds the path for an image originally served from `source_url`.
    #[must_use]
    pub fn for_source(subject_id: u64, timestamp_ms: i64, source_url: &str) -> Self {
        let basename = sanitize_filename(&url_basename(source_url));
        Self(format!(
            "{ASSET_ROOT}/{subject_id}/{timestamp_ms}-{basename}.{TARGET_EXTENSION}"
        ))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_` and truncates.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_BASENAME_LEN)
        .collect()
}

/// Returns the last path segment of `url`, or `image` when there is none.
#[must_use]
pub fn url_basename(url: &str) -> String {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return FALLBACK_BASENAME.to_string();
    };

    parsed
        .path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_BASENAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("x.png", "x.png" ; "plain")]
    #[test_case("my image (1).png", "my_image__1_.png" ; "spaces_and_parens")]
    #[test_case("a%20b.jpg", "a_20b.jpg" ; "percent_encoding")]
    #[test_case("ünï.gif", "_n_.gif" ; "non_ascii")]
    #[test_case("a-b_c.d", "a-b_c.d" ; "allowed_punctuation")]
    fn test_sanitize_filename(input: &str, expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "a".repeat(400);
        assert_eq!(sanitize_filename(&long).len(), MAX_BASENAME_LEN);
    }

    #[test_case("https://user-images.githubusercontent.com/1/x.png", "x.png" ; "simple")]
    #[test_case("https://github.com/user-attachments/assets/abc-123", "abc-123" ; "no_extension")]
    #[test_case("https://camo.githubusercontent.com/a/b/?x=1", "b" ; "trailing_slash")]
    #[test_case("https://github.com/", "image" ; "root")]
    #[test_case("not a url", "image" ; "unparseable")]
    fn test_url_basename(url: &str, expected: &str) {
        assert_eq!(url_basename(url), expected);
    }

    #[test]
    fn test_asset_path_shape() {
        let path = AssetPath::for_source(
            42,
            1_700_000_000_123,
            "https://user-images.githubusercontent.com/x.png",
        );
        assert_eq!(path.as_str(), "assets/42/1700000000123-x.png.webp");
    }
}
