use serde::{Deserialize, Serialize};

/// Repository metadata response.
#[derive(Debug, Deserialize)]
pub struct RepositoryResponse {
    /// `owner/name`.
    pub full_name: String,
    /// Default branch name.
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Contents API file response. Only the blob sha is needed.
#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    /// Blob sha used as the update token.
    pub sha: String,
}

/// Commit identity attached to contents writes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommitIdentity<'a> {
    /// Display name.
    pub name: &'a str,
    /// Email address.
    pub email: &'a str,
}

/// Identity used for every asset commit.
pub const SERVICE_IDENTITY: CommitIdentity<'static> = CommitIdentity {
    name: "github-actions",
    email: "actions@github.com",
};

/// Create-or-update file request.
#[derive(Debug, Serialize)]
pub struct PutContentRequest<'a> {
    /// Commit message.
    pub message: &'a str,
    /// Base64-encoded file content.
    pub content: String,
    /// Branch to commit to.
    pub branch: &'a str,
    /// Current blob sha when updating an existing file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Committer identity.
    pub committer: CommitIdentity<'a>,
    /// Author identity.
    pub author: CommitIdentity<'a>,
}

/// Issue or comment body update request.
#[derive(Debug, Serialize)]
pub struct UpdateBodyRequest<'a> {
    /// Replacement markdown body.
    pub body: &'a str,
}

/// GitHub API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from GitHub.
    pub message: String,
}
