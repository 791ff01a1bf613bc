//! Application services.

pub mod event_classifier;
pub mod image_transcoder;
pub mod markdown_document;

pub use event_classifier::{COMMENT_ACTIONS, EventClassifier, ISSUE_ACTIONS};
pub use image_transcoder::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, ImageTranscoder, TranscodedImage};
pub use markdown_document::MarkdownDocument;
