//! Inbound GitHub webhook payload.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! payload is ignored during deserialization.

use serde::Deserialize;

use crate::domain::errors::RunError;

/// Issue or issue-comment event as delivered to a workflow run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    /// Activity type (`opened`, `edited`, `created`, ...).
    #[serde(default)]
    pub action: Option<String>,
    /// Issue payload, present for issue and issue-comment events.
    #[serde(default)]
    pub issue: Option<IssuePayload>,
    /// Comment payload, present for issue-comment events.
    #[serde(default)]
    pub comment: Option<CommentPayload>,
    /// Repository the event originated from.
    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

impl Event {
    /// Parses an event from its JSON representation.
    ///
    /// # Errors
    /// Returns [`RunError::InvalidEvent`] if the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, RunError> {
        serde_json::from_str(json).map_err(|e| RunError::invalid_event(e.to_string()))
    }

    /// Returns the action as a string slice.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

/// Issue fields used by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    /// Issue number within its repository.
    pub number: u64,
    /// Markdown body; `null` for issues created without a description.
    #[serde(default)]
    pub body: Option<String>,
}

/// Comment fields used by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    /// Comment identifier.
    pub id: u64,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Repository fields used by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// `owner/name` form.
    pub full_name: String,
}
