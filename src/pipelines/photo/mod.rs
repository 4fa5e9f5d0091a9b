// SPDX-License-Identifier: MPL-2.0

//! Async photo capture pipeline
//!
//! ```text
//! Live stream ─┐
//!              ├─→ Raster / Decode → Mirror → Fit long edge → JPEG → CapturedPhoto
//! Picked file ─┘
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: copy the current frame, or the picked file bytes
//! 2. **Processing**: draw into the raster, mirror, cap the longest edge
//! 3. **Encoding**: JPEG at a fixed quality
//! 4. **Display handle**: a fresh, revocable preview reference

pub mod capture;
pub mod display;
pub mod encoding;
pub mod processing;

pub use capture::{CaptureJob, CaptureSettings, CaptureSource, FrameCapture};
pub use display::{DisplayHandle, DisplayRegistry};
pub use encoding::{EncodedImage, PhotoEncoder};

use std::sync::Arc;

/// Where a photo came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOrigin {
    Camera,
    File,
}

/// A captured, JPEG-encoded photo
///
/// The encoded bytes are what gets shared; the display handle is only for
/// on-screen preview and must be revoked when the photo is removed.
#[derive(Debug)]
pub struct CapturedPhoto {
    bytes: Arc<[u8]>,
    display: DisplayHandle,
    sequence_index: usize,
    width: u32,
    height: u32,
    origin: PhotoOrigin,
}

impl CapturedPhoto {
    /// Encoded JPEG payload
    pub fn source_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared reference to the payload, for handing to a share channel
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn display_handle(&self) -> &DisplayHandle {
        &self.display
    }

    /// Order in which the capture pipeline produced this photo
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> PhotoOrigin {
        self.origin
    }
}

#[cfg(test)]
impl CapturedPhoto {
    /// Photo over arbitrary bytes, without running the pipeline
    pub(crate) fn from_bytes(
        bytes: &[u8],
        registry: &DisplayRegistry,
        sequence_index: usize,
    ) -> Self {
        let bytes: Arc<[u8]> = Arc::from(bytes);
        Self {
            display: registry.create(&bytes),
            bytes,
            sequence_index,
            width: 1,
            height: 1,
            origin: PhotoOrigin::File,
        }
    }
}
