//! Port for the binary asset storage repository.

use async_trait::async_trait;

use crate::domain::entities::AssetPath;
use crate::domain::errors::AssetError;

/// Port for publishing binary objects and deriving their public URLs.
#[async_trait]
pub trait AssetStorePort: Send + Sync {
    /// Creates or updates `path` with `content` and returns its public URL.
    async fn publish(
        &self,
        path: &AssetPath,
        content: &[u8],
        message: &str,
    ) -> Result<String, AssetError>;

    /// Returns the public URL for `path`. Deterministic in the store's
    /// owner, repository, and branch.
    fn public_url(&self, path: &str) -> String;

    /// Returns true if `url` already points into this store.
    fn is_hosted_here(&self, url: &str) -> bool {
        url.starts_with(&self.public_url(""))
    }
}
