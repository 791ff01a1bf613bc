//! Rehost images use case implementation.

use std::collections::HashSet;
use std::sync::Arc;

use comrak::Arena;
use tracing::{debug, info, warn};

use crate::application::dto::RunReport;
use crate::application::services::{ImageTranscoder, MarkdownDocument};
use crate::domain::entities::{AssetPath, ImageReference, ReplacementMap, SubjectContext};
use crate::domain::errors::{AssetError, RunError};
use crate::domain::ports::{AssetStorePort, ImageFetchPort, IssueTrackerPort};
use crate::domain::services::HostAllowlist;

/// Rewrites the images of one subject onto the asset store.
///
/// References are processed one at a time in document order. Per-reference
/// failures are logged and skipped; only parse, render and persist failures
/// abort the run.
#[derive(Clone)]
pub struct RehostImagesUseCase {
    fetcher: Arc<dyn ImageFetchPort>,
    store: Arc<dyn AssetStorePort>,
    tracker: Arc<dyn IssueTrackerPort>,
    transcoder: ImageTranscoder,
    allowlist: HostAllowlist,
}

impl RehostImagesUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        fetcher: Arc<dyn ImageFetchPort>,
        store: Arc<dyn AssetStorePort>,
        tracker: Arc<dyn IssueTrackerPort>,
        transcoder: ImageTranscoder,
        allowlist: HostAllowlist,
    ) -> Self {
        Self {
            fetcher,
            store,
            tracker,
            transcoder,
            allowlist,
        }
    }

    /// Runs the pipeline for `context`.
    ///
    /// # Errors
    /// Returns error if the text cannot be parsed or rendered, or if the
    /// rewritten text cannot be persisted.
    pub async fn execute(&self, context: &SubjectContext) -> Result<RunReport, RunError> {
        if context.text.trim().is_empty() {
            info!(subject = %context.subject, "Subject text is empty, nothing to do");
            return Ok(RunReport::default());
        }

        let references = extract_references(&context.text)?;
        let mut report = RunReport::with_found(references.len());

        if references.is_empty() {
            info!(subject = %context.subject, "No image references found");
            return Ok(report);
        }

        info!(
            subject = %context.subject,
            count = references.len(),
            "Processing image references"
        );

        let mut replacements = ReplacementMap::new();
        let mut attempted = HashSet::new();

        for reference in &references {
            let url = reference.url.as_str();

            if !self.allowlist.is_allowed(url) {
                let err = AssetError::disallowed(url);
                info!(position = reference.position, error = %err, "Skipping image");
                report.skipped += 1;
                continue;
            }

            if self.store.is_hosted_here(url) {
                debug!(url, "Image already rehosted, skipping");
                report.skipped += 1;
                continue;
            }

            if !attempted.insert(url) {
                debug!(url, "Image URL already handled in this run");
                report.skipped += 1;
                continue;
            }

            match self.rehost(context, url).await {
                Ok(public_url) => {
                    info!(from = url, to = %public_url, "Image rehosted");
                    replacements.insert(url, public_url);
                    report.published += 1;
                }
                Err(e) => {
                    if e.is_content_error() {
                        warn!(url, error = %e, "Image content rejected");
                    } else {
                        warn!(url, error = %e, network = e.is_network_error(), "Failed to rehost image");
                    }
                    report.failed += 1;
                }
            }
        }

        if replacements.is_empty() {
            info!("No images were rehosted, leaving text unchanged");
            return Ok(report);
        }

        let rewritten = rewrite_text(&context.text, &replacements)?;
        if rewritten == context.text {
            debug!("Rewritten text is identical, skipping update");
            return Ok(report);
        }

        context.persist(self.tracker.as_ref(), &rewritten).await?;
        report.updated = true;

        info!(subject = %context.subject, %report, "Subject updated");
        Ok(report)
    }

    async fn rehost(&self, context: &SubjectContext, url: &str) -> Result<String, AssetError> {
        let source = self.fetcher.fetch(url).await?;
        debug!(url, bytes = source.len(), "Fetched image");

        let transcoder = self.transcoder;
        let image = tokio::task::spawn_blocking(move || transcoder.transcode(&source))
            .await
            .map_err(|e| AssetError::encode_failed(e.to_string()))??;
        debug!(
            url,
            width = image.width,
            height = image.height,
            bytes = image.bytes.len(),
            "Transcoded image"
        );

        let path = AssetPath::for_source(
            context.subject.identifier(),
            chrono::Utc::now().timestamp_millis(),
            url,
        );

        self.store
            .publish(&path, &image.bytes, &context.subject.commit_message())
            .await
    }
}

fn extract_references(text: &str) -> Result<Vec<ImageReference>, RunError> {
    let arena = Arena::new();
    Ok(MarkdownDocument::parse(&arena, text)?.images())
}

fn rewrite_text(text: &str, replacements: &ReplacementMap) -> Result<String, RunError> {
    let arena = Arena::new();
    let document = MarkdownDocument::parse(&arena, text)?;
    let changed = document.rewrite(replacements);
    debug!(changed, "Rewrote image nodes");
    document.render()
}
