//! Port for retrieving remote image content.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::AssetError;

/// Port for resolving an allowed URL to raw image bytes.
///
/// Implementations decide which equivalent addresses to try; callers only see
/// the image body or [`AssetError::ImageUnavailable`].
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches image bytes for `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, AssetError>;
}
