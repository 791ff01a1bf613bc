//! Run-fatal error types.

use thiserror::Error;

/// Errors that abort the whole run with a non-zero exit.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RunError {
    #[error("repository context not found")]
    MissingRepositoryContext,

    #[error("no issue or comment payload to process")]
    NoProcessableSubject,

    #[error("failed to read event file {path}: {message}")]
    EventUnreadable { path: String, message: String },

    #[error("invalid event payload: {reason}")]
    InvalidEvent { reason: String },

    #[error("failed to parse document: {reason}")]
    UnparseableDocument { reason: String },

    #[error("failed to render document: {reason}")]
    DocumentRender { reason: String },

    #[error("failed to update {subject}: {message}")]
    SubjectUpdateFailed { subject: String, message: String },
}

impl RunError {
    /// Creates event unreadable error.
    #[must_use]
    pub fn event_unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EventUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates invalid event error.
    #[must_use]
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            reason: reason.into(),
        }
    }

    /// Creates unparseable document error.
    #[must_use]
    pub fn unparseable(reason: impl Into<String>) -> Self {
        Self::UnparseableDocument {
            reason: reason.into(),
        }
    }

    /// Creates document render error.
    #[must_use]
    pub fn render(reason: impl Into<String>) -> Self {
        Self::DocumentRender {
            reason: reason.into(),
        }
    }

    /// Creates subject update error.
    #[must_use]
    pub fn update_failed(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SubjectUpdateFailed {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
