//! The issue or comment whose text is being rewritten.

use std::fmt;

use crate::domain::errors::RunError;
use crate::domain::ports::IssueTrackerPort;

/// Owner/name pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    owner: String,
    name: String,
}

impl RepoIdentity {
    /// Creates identity from its parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses the `owner/name` form. Both parts must be non-empty.
    #[must_use]
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// Returns the owning user or organization.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Kind of text-bearing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    /// Issue body.
    Issue,
    /// Issue comment body.
    Comment,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::Comment => write!(f, "comment"),
        }
    }
}

/// Selected subject of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// Issue body, addressed by issue number.
    Issue {
        /// Issue number.
        number: u64,
    },
    /// Comment body, addressed by comment id.
    Comment {
        /// Comment identifier.
        id: u64,
        /// Issue the comment belongs to, when the payload carries it.
        issue_number: Option<u64>,
    },
}

impl Subject {
    /// Returns the subject kind.
    #[must_use]
    pub const fn kind(&self) -> SubjectKind {
        match self {
            Self::Issue { .. } => SubjectKind::Issue,
            Self::Comment { .. } => SubjectKind::Comment,
        }
    }

    /// Returns the identifier used for asset directories: issue number or comment id.
    #[must_use]
    pub const fn identifier(&self) -> u64 {
        match self {
            Self::Issue { number } => *number,
            Self::Comment { id, .. } => *id,
        }
    }

    /// Returns the commit message for assets published on behalf of this subject.
    #[must_use]
    pub fn commit_message(&self) -> String {
        match self {
            Self::Issue { number } => format!("Add resized image for issue #{number}"),
            Self::Comment {
                id,
                issue_number: Some(issue),
            } => format!("Add resized image for comment {id} on issue #{issue}"),
            Self::Comment {
                id,
                issue_number: None,
            } => format!("Add resized image for comment {id}"),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.identifier())
    }
}

/// Classified event: where the text lives, what it says, and how to replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectContext {
    /// Repository that owns the subject.
    pub repo: RepoIdentity,
    /// Issue or comment being processed.
    pub subject: Subject,
    /// Current markdown text.
    pub text: String,
}

impl SubjectContext {
    /// Creates new context.
    #[must_use]
    pub fn new(repo: RepoIdentity, subject: Subject, text: impl Into<String>) -> Self {
        Self {
            repo,
            subject,
            text: text.into(),
        }
    }

    /// Persists replacement text through the update API matching the subject kind.
    ///
    /// # Errors
    /// Returns [`RunError::SubjectUpdateFailed`] if the tracker rejects the update.
    pub async fn persist(&self, tracker: &dyn IssueTrackerPort, text: &str) -> Result<(), RunError> {
        match self.subject {
            Subject::Issue { number } => tracker.update_issue_body(&self.repo, number, text).await,
            Subject::Comment { id, .. } => {
                tracker.update_comment_body(&self.repo, id, text).await
            }
        }
    }
}
