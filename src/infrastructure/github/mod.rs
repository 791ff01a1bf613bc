//! GitHub REST API adapters.

mod client;
mod contents;
mod dto;
mod issues;

pub use client::{ApiError, GITHUB_API_BASE, GitHubClient, USER_AGENT};
pub use contents::{GitHubContentStore, RAW_CONTENT_BASE};
pub use issues::GitHubIssueTracker;
