//! Loads the event payload from disk.

use std::path::Path;

use tracing::debug;

use crate::domain::entities::Event;
use crate::domain::errors::RunError;

/// Reads and decodes the event payload at `path`.
///
/// # Errors
/// Returns [`RunError::EventUnreadable`] if the file cannot be read, or
/// [`RunError::InvalidEvent`] if it is not a valid payload.
pub async fn load_event(path: &Path) -> Result<Event, RunError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RunError::event_unreadable(path.display().to_string(), e.to_string()))?;

    debug!(path = %path.display(), bytes = content.len(), "Read event payload");

    Event::from_json(&content)
}
