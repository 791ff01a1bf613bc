//! Image retrieval infrastructure.
//!
//! This module provides:
//! - Candidate URL derivation for GitHub attachment assets
//! - An authenticated HTTP fetcher that validates image content

pub mod candidates;
pub mod fetcher;

pub use candidates::{ALTERNATE_ASSET_HOSTS, candidate_urls, extract_asset_id, is_attachment_url};
pub use fetcher::{HttpImageFetcher, ImageFetcherConfig};
