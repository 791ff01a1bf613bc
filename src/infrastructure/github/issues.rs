//! Issue tracker backed by the GitHub issues API.

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use super::client::GitHubClient;
use super::dto::UpdateBodyRequest;
use crate::domain::entities::RepoIdentity;
use crate::domain::errors::RunError;
use crate::domain::ports::IssueTrackerPort;

/// Updates issue and comment bodies in the originating repository.
#[derive(Debug, Clone)]
pub struct GitHubIssueTracker {
    client: GitHubClient,
}

impl GitHubIssueTracker {
    /// Creates new tracker.
    #[must_use]
    pub const fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    async fn patch_body(&self, api_path: String, subject: String, body: &str) -> Result<(), RunError> {
        debug!(%subject, bytes = body.len(), "Updating body");

        let request = self
            .client
            .request(Method::PATCH, &api_path)
            .json(&UpdateBodyRequest { body });

        self.client
            .send(request)
            .await
            .map_err(|e| RunError::update_failed(subject.clone(), e.to_string()))?;

        info!(%subject, "Body updated");
        Ok(())
    }
}

#[async_trait]
impl IssueTrackerPort for GitHubIssueTracker {
    async fn update_issue_body(
        &self,
        repo: &RepoIdentity,
        number: u64,
        body: &str,
    ) -> Result<(), RunError> {
        self.patch_body(
            format!("/repos/{}/{}/issues/{number}", repo.owner(), repo.name()),
            format!("issue #{number} in {repo}"),
            body,
        )
        .await
    }

    async fn update_comment_body(
        &self,
        repo: &RepoIdentity,
        comment_id: u64,
        body: &str,
    ) -> Result<(), RunError> {
        self.patch_body(
            format!(
                "/repos/{}/{}/issues/comments/{comment_id}",
                repo.owner(),
                repo.name()
            ),
            format!("comment {comment_id} in {repo}"),
            body,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GitHubToken;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tracker(server: &MockServer) -> GitHubIssueTracker {
        GitHubIssueTracker::new(
            GitHubClient::with_base_url(server.uri(), GitHubToken::new("ghp_test").unwrap())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_update_issue_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/octo/widgets/issues/12"))
            .and(body_json(serde_json::json!({ "body": "new text" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = tracker(&server)
            .update_issue_body(&RepoIdentity::new("octo", "widgets"), 12, "new text")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_comment_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/octo/widgets/issues/comments/555"))
            .and(body_json(serde_json::json!({ "body": "c" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = tracker(&server)
            .update_comment_body(&RepoIdentity::new("octo", "widgets"), 555, "c")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_update_is_fatal_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "message": "Resource not accessible" })),
            )
            .mount(&server)
            .await;

        let result = tracker(&server)
            .update_issue_body(&RepoIdentity::new("octo", "widgets"), 1, "x")
            .await;

        match result {
            Err(RunError::SubjectUpdateFailed { subject, message }) => {
                assert_eq!(subject, "issue #1 in octo/widgets");
                assert!(message.contains("Resource not accessible"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
