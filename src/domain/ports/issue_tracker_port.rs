//! Port for updating issue and comment bodies.

use async_trait::async_trait;

use crate::domain::entities::RepoIdentity;
use crate::domain::errors::RunError;

/// Port for the text-document update API of the originating repository.
#[async_trait]
pub trait IssueTrackerPort: Send + Sync {
    /// Replaces the body of an issue.
    async fn update_issue_body(
        &self,
        repo: &RepoIdentity,
        number: u64,
        body: &str,
    ) -> Result<(), RunError>;

    /// Replaces the body of an issue comment.
    async fn update_comment_body(
        &self,
        repo: &RepoIdentity,
        comment_id: u64,
        body: &str,
    ) -> Result<(), RunError>;
}
