// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding for captured photos
//!
//! Every photo leaves the pipeline as a JPEG at a fixed quality. This keeps
//! attachments small enough to hand to a messaging app.

use crate::errors::CaptureError;
use image::RgbImage;
use tracing::debug;

/// Encoded image data ready for sharing
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy)]
pub struct PhotoEncoder {
    quality: u8,
}

impl PhotoEncoder {
    /// Create an encoder; quality is clamped to 1-100
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode image as JPEG
    pub fn encode_jpeg(&self, image: &RgbImage) -> Result<EncodedImage, CaptureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::EncodeFailed("empty image".to_string()));
        }

        let mut buffer = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, self.quality);

        encoder
            .encode(image.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::EncodeFailed(format!("JPEG encoding failed: {}", e)))?;

        debug!(size = buffer.len(), quality = self.quality, "Encoding complete");

        Ok(EncodedImage {
            data: buffer,
            width,
            height,
        })
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new(crate::constants::JPEG_QUALITY)
    }
}
