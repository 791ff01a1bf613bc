//! Embedded image reference.

/// An image found in a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Zero-based position among the document's images.
    pub position: usize,
    /// Image source URL as written in the document.
    pub url: String,
    /// Alternative text (flattened inline content).
    pub alt: String,
    /// Optional title; empty when absent.
    pub title: String,
}

impl ImageReference {
    /// Creates new reference.
    #[must_use]
    pub fn new(
        position: usize,
        url: impl Into<String>,
        alt: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            position,
            url: url.into(),
            alt: alt.into(),
            title: title.into(),
        }
    }
}
