//! Rehost - moves images embedded in GitHub issues and comments into a
//! dedicated asset repository.
//!
//! This crate classifies an issue or comment event, extracts the markdown
//! image references of its body, re-encodes each allowlisted image as a
//! bounded-width WebP committed to a storage repository, and rewrites the
//! body to point at the stable copies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services, and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "rehost";
