//! Run summary DTO.

use std::fmt;

/// Counters describing what a single run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Image references found in the text.
    pub found: usize,
    /// References skipped: disallowed host, already rehosted, or repeated URL.
    pub skipped: usize,
    /// Distinct URLs published to the asset store.
    pub published: usize,
    /// Distinct URLs that failed to fetch, transcode, or publish.
    pub failed: usize,
    /// Whether the subject text was written back.
    pub updated: bool,
}

impl RunReport {
    /// Creates an empty report for `found` references.
    #[must_use]
    pub const fn with_found(found: usize) -> Self {
        Self {
            found,
            skipped: 0,
            published: 0,
            failed: 0,
            updated: false,
        }
    }

    /// Returns true if the run left the subject untouched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.updated
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, skipped {}, published {}, failed {}, {}",
            self.found,
            self.skipped,
            self.published,
            self.failed,
            if self.updated { "updated" } else { "unchanged" }
        )
    }
}
