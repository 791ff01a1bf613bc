//! HTTP image fetcher with candidate-URL fallback.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header};
use tracing::{debug, warn};

use super::candidates::candidate_urls;
use crate::domain::entities::GitHubToken;
use crate::domain::errors::AssetError;
use crate::domain::ports::ImageFetchPort;
use crate::infrastructure::github::USER_AGENT;

/// Configuration for the image fetcher.
#[derive(Debug, Clone)]
pub struct ImageFetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ImageFetcherConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Fetches images over HTTP, trying each equivalent address in order.
pub struct HttpImageFetcher {
    client: Client,
    token: GitHubToken,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a new fetcher authenticating with `token`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(token: GitHubToken, config: &ImageFetcherConfig) -> Result<Self, AssetError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssetError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, token })
    }

    /// Downloads one candidate. `Ok(None)` means the candidate answered but
    /// was not acceptable image content.
    async fn try_candidate(&self, url: &str) -> Result<Option<Bytes>, AssetError> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.token.bearer())
            .header(header::ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssetError::network("request timed out")
                } else if e.is_connect() {
                    AssetError::network(format!("failed to connect: {e}"))
                } else {
                    AssetError::network(e.to_string())
                }
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            debug!(url, %status, "Candidate rejected: HTTP status");
            return Ok(None);
        }

        if !content_type.starts_with("image/") {
            debug!(url, content_type = %content_type, "Candidate rejected: not image content");
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssetError::network(format!("failed to read body: {e}")))?;

        debug!(url, content_type = %content_type, bytes = bytes.len(), "Candidate accepted");
        Ok(Some(bytes))
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, AssetError> {
        let candidates = candidate_urls(url);
        debug!(url, candidates = candidates.len(), "Fetching image");

        for candidate in &candidates {
            match self.try_candidate(candidate).await {
                Ok(Some(bytes)) => return Ok(bytes),
                Ok(None) => {}
                Err(e) => warn!(url = %candidate, error = %e, "Candidate request failed"),
            }
        }

        Err(AssetError::unavailable(url))
    }
}
