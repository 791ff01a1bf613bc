//! Domain layer with core entities, errors, ports, and pure services.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{Event, ImageReference, ReplacementMap, SubjectContext};
pub use errors::{AssetError, RunError};
pub use ports::{AssetStorePort, ImageFetchPort, IssueTrackerPort};
pub use services::HostAllowlist;
