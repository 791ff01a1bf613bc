//! Asset store backed by the GitHub contents API.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use tracing::{debug, info, warn};

use super::client::{ApiError, GitHubClient};
use super::dto::{ContentResponse, PutContentRequest, RepositoryResponse, SERVICE_IDENTITY};
use crate::domain::entities::AssetPath;
use crate::domain::errors::AssetError;
use crate::domain::ports::AssetStorePort;

/// Raw content host used for public asset URLs.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Publishes assets as files in a storage repository.
#[derive(Debug, Clone)]
pub struct GitHubContentStore {
    client: GitHubClient,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubContentStore {
    /// Creates store for `owner/repo`, committing to and serving from `branch`.
    #[must_use]
    pub fn new(
        client: GitHubClient,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn contents_path(&self, path: &str) -> String {
        format!("/repos/{}/{}/contents/{path}", self.owner, self.repo)
    }

    async fn ensure_reachable(&self) -> Result<(), AssetError> {
        let request = self
            .client
            .request(Method::GET, &format!("/repos/{}/{}", self.owner, self.repo));

        let response = self
            .client
            .send(request)
            .await
            .map_err(|e| AssetError::repository_unavailable(self.full_name(), e.to_string()))?;

        match response.json::<RepositoryResponse>().await {
            Ok(repo) => debug!(
                repo = %repo.full_name,
                default_branch = ?repo.default_branch,
                "Target repository reachable"
            ),
            Err(e) => debug!(error = %e, "Target repository reachable, metadata unreadable"),
        }
        Ok(())
    }

    /// Returns the current blob sha at `path`, or `None` when the file does
    /// not exist or the probe fails.
    async fn probe_sha(&self, path: &str) -> Option<String> {
        let request = self
            .client
            .request(Method::GET, &self.contents_path(path))
            .query(&[("ref", self.branch.as_str())]);

        match self.client.send(request).await {
            Ok(response) => match response.json::<ContentResponse>().await {
                Ok(content) => {
                    debug!(path, sha = %content.sha, "Existing file found");
                    Some(content.sha)
                }
                Err(e) => {
                    warn!(path, error = %e, "Unreadable contents response, treating as new file");
                    None
                }
            },
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                warn!(path, error = %e, "Contents probe failed, treating as new file");
                None
            }
        }
    }
}

#[async_trait]
impl AssetStorePort for GitHubContentStore {
    async fn publish(
        &self,
        path: &AssetPath,
        content: &[u8],
        message: &str,
    ) -> Result<String, AssetError> {
        self.ensure_reachable().await?;

        let sha = self.probe_sha(path.as_str()).await;
        let body = PutContentRequest {
            message,
            content: STANDARD.encode(content),
            branch: &self.branch,
            sha,
            committer: SERVICE_IDENTITY,
            author: SERVICE_IDENTITY,
        };

        let request = self
            .client
            .request(Method::PUT, &self.contents_path(path.as_str()))
            .json(&body);

        self.client
            .send(request)
            .await
            .map_err(|e: ApiError| AssetError::publish_failed(path.as_str(), e.to_string()))?;

        info!(path = %path, repo = %self.full_name(), bytes = content.len(), "Asset committed");
        Ok(self.public_url(path.as_str()))
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{RAW_CONTENT_BASE}/{}/{}/{}/{path}",
            self.owner, self.repo, self.branch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GitHubToken;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ASSET: &str = "assets/7/1700000000000-x.png.webp";

    fn store(server: &MockServer) -> GitHubContentStore {
        let client =
            GitHubClient::with_base_url(server.uri(), GitHubToken::new("ghp_test").unwrap())
                .unwrap();
        GitHubContentStore::new(client, "user-attachments", "assets", "main")
    }

    fn asset_path() -> AssetPath {
        AssetPath::for_source(7, 1_700_000_000_000, "https://github.com/x.png")
    }

    async fn mount_repo(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/user-attachments/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "full_name": "user-attachments/assets",
                "default_branch": "main"
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_public_url_is_deterministic() {
        let client = GitHubClient::new(GitHubToken::new("ghp_test").unwrap()).unwrap();
        let store = GitHubContentStore::new(client, "acme", "media", "trunk");

        let first = store.public_url(ASSET);
        assert_eq!(
            first,
            format!("https://raw.githubusercontent.com/acme/media/trunk/{ASSET}")
        );
        assert_eq!(first, store.public_url(ASSET));
        assert!(store.is_hosted_here(&first));
        assert!(!store.is_hosted_here("https://raw.githubusercontent.com/acme/other/trunk/a.png"));
    }

    #[tokio::test]
    async fn test_publish_creates_new_file() {
        let server = MockServer::start().await;
        mount_repo(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/user-attachments/assets/contents/{ASSET}")))
            .and(query_param("ref", "main"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/repos/user-attachments/assets/contents/{ASSET}")))
            .and(body_partial_json(serde_json::json!({
                "message": "Add resized image for issue #7",
                "content": "AQID",
                "branch": "main",
                "committer": { "name": "github-actions", "email": "actions@github.com" }
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let url = store(&server)
            .publish(&asset_path(), &[1, 2, 3], "Add resized image for issue #7")
            .await
            .unwrap();

        assert_eq!(
            url,
            format!("https://raw.githubusercontent.com/user-attachments/assets/main/{ASSET}")
        );
    }

    #[tokio::test]
    async fn test_publish_updates_existing_file_with_sha() {
        let server = MockServer::start().await;
        mount_repo(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/user-attachments/assets/contents/{ASSET}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sha": "abc123", "path": ASSET
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/repos/user-attachments/assets/contents/{ASSET}")))
            .and(body_partial_json(serde_json::json!({ "sha": "abc123" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = store(&server).publish(&asset_path(), b"x", "m").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_repository() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/user-attachments/assets"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let result = store(&server).publish(&asset_path(), b"x", "m").await;

        assert!(matches!(
            result,
            Err(AssetError::TargetRepositoryUnavailable { repo, .. }) if repo == "user-attachments/assets"
        ));
    }

    #[tokio::test]
    async fn test_rejected_write_is_publish_failure() {
        let server = MockServer::start().await;
        mount_repo(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/user-attachments/assets/contents/{ASSET}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({ "message": "sha does not match" })),
            )
            .mount(&server)
            .await;

        let result = store(&server).publish(&asset_path(), b"x", "m").await;

        assert!(matches!(result, Err(AssetError::PublishFailed { message, .. }) if message.contains("sha does not match")));
    }
}
