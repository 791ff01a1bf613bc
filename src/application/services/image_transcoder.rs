//! Decode, resize and re-encode as lossy WebP.

use image::imageops::FilterType;
use tracing::debug;

use crate::domain::errors::AssetError;

/// Default maximum output width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

/// Default WebP quality.
pub const DEFAULT_QUALITY: u8 = 80;

/// Encoded output together with its final dimensions.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct TranscodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Downscales images wider than `max_width` (aspect preserved, never
/// upscaled) and encodes the result as lossy WebP.
#[derive(Debug, Clone, Copy)]
pub struct ImageTranscoder {
    max_width: u32,
    quality: u8,
}

impl Default for ImageTranscoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH, DEFAULT_QUALITY)
    }
}

impl ImageTranscoder {
    /// `max_width` is clamped to at least 1 and `quality` to at most 100.
    #[must_use]
    pub fn new(max_width: u32, quality: u8) -> Self {
        Self {
            max_width: max_width.max(1),
            quality: quality.min(100),
        }
    }

    /// Returns the maximum output width.
    #[must_use]
    pub const fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Returns the WebP quality.
    #[must_use]
    pub const fn quality(&self) -> u8 {
        self.quality
    }

    /// Output dimensions for a source of `width` × `height`.
    #[must_use]
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width <= self.max_width {
            return (width, height);
        }

        let scaled = (f64::from(height) * f64::from(self.max_width) / f64::from(width)).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (scaled as u32).max(1);
        (self.max_width, scaled)
    }

    /// Transcodes `source`.
    ///
    /// # Errors
    /// Returns [`AssetError::UnsupportedImage`] if `source` cannot be decoded,
    /// or [`AssetError::EncodeFailed`] if the encoder rejects the frame.
    pub fn transcode(&self, source: &[u8]) -> Result<TranscodedImage, AssetError> {
        let decoded =
            image::load_from_memory(source).map_err(|e| AssetError::unsupported(e.to_string()))?;

        let (src_w, src_h) = (decoded.width(), decoded.height());
        let (width, height) = self.target_dimensions(src_w, src_h);

        let resized = if (width, height) == (src_w, src_h) {
            decoded
        } else {
            debug!(src_w, src_h, width, height, "Downscaling image");
            decoded.resize_exact(width, height, FilterType::Lanczos3)
        };

        let rgba = resized.to_rgba8();
        let encoded = webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, f32::from(self.quality))
            .map_err(|e| AssetError::encode_failed(format!("{e:?}")))?;

        Ok(TranscodedImage {
            bytes: encoded.to_vec(),
            width,
            height,
        })
    }
}
