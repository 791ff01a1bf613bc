//! Shared GitHub REST API client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use thiserror::Error;
use tracing::warn;

use super::dto::ErrorResponse;
use crate::domain::entities::GitHubToken;

/// Default GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("rehost/", env!("CARGO_PKG_VERSION"));

const ACCEPT_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Transport-level failure talking to the GitHub API.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("unexpected response: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Returns true for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Authenticated GitHub API client shared by the issue and contents adapters.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: GitHubToken,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: GitHubToken) -> Result<Self, ApiError> {
        Self::with_base_url(GITHUB_API_BASE, token)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, token: GitHubToken) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Unexpected {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request to `path` (relative to the base URL) with the API headers set.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(header::AUTHORIZATION, self.token.bearer())
            .header(header::ACCEPT, ACCEPT_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    /// Sends `request`, turning transport failures and non-success statuses into [`ApiError`].
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] if the request could not be completed or
    /// [`ApiError::Status`] for any non-2xx response.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach GitHub API");
            if e.is_timeout() {
                ApiError::Network {
                    message: "request timed out".to_string(),
                }
            } else if e.is_connect() {
                ApiError::Network {
                    message: "failed to connect to GitHub".to_string(),
                }
            } else {
                ApiError::Network {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(status, response).await)
        }
    }

    async fn handle_error_response(status: StatusCode, response: Response) -> ApiError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        };

        ApiError::Status { status, message }
    }
}
