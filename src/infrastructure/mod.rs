//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Event payload loading.
pub mod event_source;
/// GitHub REST API adapters.
pub mod github;
/// Image retrieval.
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, load_config};
pub use event_source::load_event;
pub use github::{GitHubClient, GitHubContentStore, GitHubIssueTracker};
pub use image::{HttpImageFetcher, ImageFetcherConfig};
