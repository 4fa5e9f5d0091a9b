// SPDX-License-Identifier: MPL-2.0

//! Photo capture from a live stream or a picked file
//!
//! Capture is split in two steps:
//! 1. [`FrameCapture::prepare`] runs synchronously: it checks readiness and
//!    copies the current frame (or the file bytes) into an owned job.
//! 2. [`FrameCapture::run`] does the CPU-bound work in a blocking task and
//!    yields a [`CapturedPhoto`].
//!
//! The job owns everything it needs, so the session can be closed while the
//! encode is still in flight.

use super::encoding::{EncodedImage, PhotoEncoder};
use super::processing;
use super::{CapturedPhoto, DisplayRegistry, PhotoOrigin};
use crate::backends::camera::{CameraFrame, CameraSession, FacingMode};
use crate::config::Config;
use crate::errors::CaptureError;
use image::RgbImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Where a capture takes its pixels from
#[derive(Debug, Clone, Copy)]
pub enum CaptureSource<'a> {
    /// Current frame of a live, ready session
    Stream(&'a CameraSession),
    /// Encoded bytes of a picked file
    File(&'a [u8]),
}

/// Owned capture work, detached from the session
#[derive(Debug)]
pub enum CaptureJob {
    Frame {
        frame: CameraFrame,
        raster: (u32, u32),
        mirror: bool,
    },
    File {
        bytes: Vec<u8>,
    },
}

/// Capture settings derived from the configuration
#[derive(Debug, Clone, Copy)]
pub struct CaptureSettings {
    pub default_frame: (u32, u32),
    pub max_edge: u32,
    /// Mirror captures from user-facing cameras, matching a mirrored preview
    pub mirror: bool,
    pub jpeg_quality: u8,
}

impl From<&Config> for CaptureSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_frame: (config.default_frame.width, config.default_frame.height),
            max_edge: config.max_edge,
            mirror: config.mirror_preview,
            jpeg_quality: config.jpeg_quality,
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Turns frames and files into size-bounded JPEG photos
///
/// Does not touch the capture collection; the caller decides what to do with
/// the photo.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    settings: CaptureSettings,
    registry: DisplayRegistry,
    next_index: Arc<AtomicUsize>,
}

impl FrameCapture {
    pub fn new(settings: CaptureSettings, registry: DisplayRegistry) -> Self {
        Self {
            settings,
            registry,
            next_index: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Registry the display handles of new photos are created in
    pub fn registry(&self) -> &DisplayRegistry {
        &self.registry
    }

    /// Capture a photo in one call
    pub async fn capture(&self, source: CaptureSource<'_>) -> Result<CapturedPhoto, CaptureError> {
        let job = self.prepare(source)?;
        self.run(job).await
    }

    /// Check the source and copy what the capture needs
    ///
    /// Fails fast with `NotReady` before the stream's first frame.
    pub fn prepare(&self, source: CaptureSource<'_>) -> Result<CaptureJob, CaptureError> {
        match source {
            CaptureSource::Stream(session) => {
                if !session.is_ready() {
                    return Err(CaptureError::NotReady);
                }
                let stream = session.stream().ok_or(CaptureError::NotReady)?;
                let frame = stream
                    .grab_frame()
                    .map_err(|e| CaptureError::FrameUnavailable(e.to_string()))?;

                let raster = stream
                    .dimensions()
                    .filter(|(w, h)| *w > 0 && *h > 0)
                    .unwrap_or(self.settings.default_frame);

                // Only a front camera preview is mirrored
                let mirror = self.settings.mirror && stream.facing() == Some(FacingMode::User);

                debug!(
                    device = stream.label(),
                    facing = ?stream.facing(),
                    frame = ?(frame.width, frame.height),
                    raster = ?raster,
                    mirror,
                    "Frame grabbed"
                );

                Ok(CaptureJob::Frame {
                    frame,
                    raster,
                    mirror,
                })
            }
            CaptureSource::File(bytes) => {
                if bytes.is_empty() {
                    return Err(CaptureError::DecodeFailed("empty file".to_string()));
                }
                Ok(CaptureJob::File {
                    bytes: bytes.to_vec(),
                })
            }
        }
    }

    /// Normalize and encode a prepared job
    pub async fn run(&self, job: CaptureJob) -> Result<CapturedPhoto, CaptureError> {
        let settings = self.settings;
        let origin = match job {
            CaptureJob::Frame { .. } => PhotoOrigin::Camera,
            CaptureJob::File { .. } => PhotoOrigin::File,
        };

        // CPU-bound: decode, scale, encode
        let encoded = tokio::task::spawn_blocking(move || -> Result<EncodedImage, CaptureError> {
            let raster: RgbImage = match job {
                CaptureJob::Frame {
                    frame,
                    raster,
                    mirror,
                } => processing::frame_to_raster(&frame, raster, mirror)?,
                CaptureJob::File { bytes } => processing::decode(&bytes)?.to_rgb8(),
            };
            let bounded = processing::fit_within(raster, settings.max_edge);
            PhotoEncoder::new(settings.jpeg_quality).encode_jpeg(&bounded)
        })
        .await
        .map_err(|e| CaptureError::EncodeFailed(format!("Encoding task error: {}", e)))??;

        let bytes: Arc<[u8]> = Arc::from(encoded.data);
        let display = self.registry.create(&bytes);
        let sequence_index = self.next_index.fetch_add(1, Ordering::Relaxed);

        info!(
            sequence_index,
            origin = ?origin,
            width = encoded.width,
            height = encoded.height,
            size = bytes.len(),
            "Photo captured"
        );

        Ok(CapturedPhoto {
            bytes,
            display,
            sequence_index,
            width: encoded.width,
            height: encoded.height,
            origin,
        })
    }
}
