//! Per-reference error types.

use thiserror::Error;

/// Errors confined to a single image reference. The run logs them and continues.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum AssetError {
    #[error("host not allowed: {url}")]
    DisallowedHost { url: String },

    #[error("image unavailable from any candidate: {url}")]
    ImageUnavailable { url: String },

    #[error("unsupported image: {reason}")]
    UnsupportedImage { reason: String },

    #[error("failed to encode image: {reason}")]
    EncodeFailed { reason: String },

    #[error("target repository {repo} unavailable: {message}")]
    TargetRepositoryUnavailable { repo: String, message: String },

    #[error("failed to publish {path}: {message}")]
    PublishFailed { path: String, message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl AssetError {
    /// Creates disallowed host error.
    #[must_use]
    pub fn disallowed(url: impl Into<String>) -> Self {
        Self::DisallowedHost { url: url.into() }
    }

    /// Creates image unavailable error.
    #[must_use]
    pub fn unavailable(url: impl Into<String>) -> Self {
        Self::ImageUnavailable { url: url.into() }
    }

    /// Creates unsupported image error.
    #[must_use]
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedImage {
            reason: reason.into(),
        }
    }

    /// Creates encode failed error.
    #[must_use]
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        Self::EncodeFailed {
            reason: reason.into(),
        }
    }

    /// Creates target repository unavailable error.
    #[must_use]
    pub fn repository_unavailable(repo: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TargetRepositoryUnavailable {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates publish failed error.
    #[must_use]
    pub fn publish_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PublishFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::ImageUnavailable { .. }
                | Self::Network { .. }
                | Self::TargetRepositoryUnavailable { .. }
        )
    }

    /// Returns whether the error comes from the image content itself.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedImage { .. } | Self::EncodeFailed { .. }
        )
    }
}
