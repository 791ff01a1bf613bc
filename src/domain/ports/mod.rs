mod asset_store_port;
mod image_fetch_port;
mod issue_tracker_port;

pub use asset_store_port::AssetStorePort;
pub use image_fetch_port::ImageFetchPort;
pub use issue_tracker_port::IssueTrackerPort;

#[cfg(test)]
pub mod mocks {
    pub use super::asset_store_port::mock::{MockAssetStore, RecordedPublish};
    pub use super::image_fetch_port::mock::MockImageFetcher;
    pub use super::issue_tracker_port::mock::{MockIssueTracker, RecordedUpdate};
}
