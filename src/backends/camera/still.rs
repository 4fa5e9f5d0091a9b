// SPDX-License-Identifier: GPL-3.0-only

//! Still image camera source
//!
//! Serves a single image file as if it were a live camera. The file is read
//! when the stream is requested and decoded in a background task; the stream
//! becomes ready once decoding finishes, and its readiness channel closes if
//! decoding fails. Useful on desktops without a camera
//! and for scripted runs.

use super::types::*;
use super::{MediaCapabilityProvider, MediaStream};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Camera provider backed by an image file
pub struct StillImageCamera {
    path: PathBuf,
    facing: FacingMode,
}

impl StillImageCamera {
    /// Create a source that reports the given facing mode
    pub fn new(path: impl Into<PathBuf>, facing: FacingMode) -> Self {
        Self {
            path: path.into(),
            facing,
        }
    }
}

#[async_trait]
impl MediaCapabilityProvider for StillImageCamera {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> BackendResult<Box<dyn MediaStream>> {
        if let Some(required) = constraints.facing {
            if required != self.facing {
                return Err(BackendError::ConstraintUnsatisfiable(format!(
                    "source faces {}, {} required",
                    self.facing, required
                )));
            }
        }

        let bytes = tokio::fs::read(&self.path).await?;
        info!(path = %self.path.display(), size = bytes.len(), "Still image source opened");

        let label = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "still image".to_string());

        Ok(Box::new(StillImageStream::start(label, self.facing, bytes)))
    }
}

/// Stream over a decoded still image
struct StillImageStream {
    label: String,
    facing: FacingMode,
    frame: Arc<Mutex<Option<CameraFrame>>>,
    stopped: Arc<AtomicBool>,
    ready: watch::Receiver<bool>,
}

impl StillImageStream {
    /// Spawn the decode and return immediately, not yet ready
    fn start(label: String, facing: FacingMode, bytes: Vec<u8>) -> Self {
        let frame = Arc::new(Mutex::new(None));
        let stopped = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready) = watch::channel(false);

        // The sender lives in the task; a failed or stopped decode drops it unsent
        let slot = Arc::clone(&frame);
        let task_stopped = Arc::clone(&stopped);
        tokio::task::spawn_blocking(move || match decode_frame(&bytes) {
            Ok(decoded) => {
                // Checked under the slot lock so stop_tracks cannot interleave
                let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if task_stopped.load(Ordering::SeqCst) {
                    debug!("Still image decoded after stop, discarding");
                    return;
                }
                debug!(width = decoded.width, height = decoded.height, "Still image decoded");
                *slot = Some(decoded);
                drop(slot);
                ready_tx.send_replace(true);
            }
            Err(e) => {
                warn!(error = %e, "Still image could not be decoded");
            }
        });

        Self {
            label,
            facing,
            frame,
            stopped,
            ready,
        }
    }

    fn current(&self) -> Option<CameraFrame> {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn decode_frame(bytes: &[u8]) -> BackendResult<CameraFrame> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| BackendError::FrameUnavailable(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    CameraFrame::from_rgba(width, height, rgba.into_raw())
}

impl MediaStream for StillImageStream {
    fn label(&self) -> &str {
        &self.label
    }

    fn facing(&self) -> Option<FacingMode> {
        Some(self.facing)
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.current().map(|f| (f.width, f.height))
    }

    fn readiness(&self) -> watch::Receiver<bool> {
        self.ready.clone()
    }

    fn grab_frame(&self) -> BackendResult<CameraFrame> {
        self.current()
            .map(|mut frame| {
                frame.captured_at = std::time::Instant::now();
                frame
            })
            .ok_or_else(|| BackendError::FrameUnavailable("no frame decoded".to_string()))
    }

    fn stop_tracks(&mut self) {
        debug!(device = %self.label, "Still image stream stopped");
        self.stopped.store(true, Ordering::SeqCst);
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::path::Path;

    fn write_png(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("still.png");
        RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn test_stream_becomes_ready_after_decode() {
        let dir = tempfile::tempdir().unwrap();
        let camera = StillImageCamera::new(write_png(dir.path(), 8, 6), FacingMode::Environment);

        let stream = camera
            .request_stream(&StreamConstraints::exact(FacingMode::Environment, None))
            .await
            .unwrap();
        stream.readiness().wait_for(|r| *r).await.unwrap();

        assert_eq!(stream.dimensions(), Some((8, 6)));
        let frame = stream.grab_frame().unwrap();
        assert_eq!(frame.data.len(), 8 * 6 * 4);
    }

    #[tokio::test]
    async fn test_wrong_facing_is_unsatisfiable() {
        let dir = tempfile::tempdir().unwrap();
        let camera = StillImageCamera::new(write_png(dir.path(), 2, 2), FacingMode::User);

        let result = camera
            .request_stream(&StreamConstraints::exact(FacingMode::Environment, None))
            .await;

        assert!(matches!(
            result.err(),
            Some(BackendError::ConstraintUnsatisfiable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_device_not_found() {
        let camera = StillImageCamera::new("/nonexistent/still.png", FacingMode::User);
        let result = camera.request_stream(&StreamConstraints::any(None)).await;
        assert!(matches!(result.err(), Some(BackendError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_undecodable_image_closes_readiness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        let camera = StillImageCamera::new(path, FacingMode::Environment);

        let stream = camera
            .request_stream(&StreamConstraints::any(None))
            .await
            .unwrap();

        assert!(stream.readiness().wait_for(|r| *r).await.is_err());
        assert!(stream.grab_frame().is_err());
    }

    #[tokio::test]
    async fn test_stop_tracks_drops_frame() {
        let dir = tempfile::tempdir().unwrap();
        let camera = StillImageCamera::new(write_png(dir.path(), 2, 2), FacingMode::User);
        let mut stream = camera
            .request_stream(&StreamConstraints::any(None))
            .await
            .unwrap();
        stream.readiness().wait_for(|r| *r).await.unwrap();

        stream.stop_tracks();

        assert!(stream.grab_frame().is_err());
    }

    #[tokio::test]
    async fn test_stop_before_decode_finishes_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let camera = StillImageCamera::new(write_png(dir.path(), 1600, 1200), FacingMode::User);
        let mut stream = camera
            .request_stream(&StreamConstraints::any(None))
            .await
            .unwrap();

        stream.stop_tracks();
        // Resolves once the decode task is done, whichever way it ended
        let _ = stream.readiness().wait_for(|r| *r).await;

        assert!(stream.grab_frame().is_err());
        assert_eq!(stream.dimensions(), None);
    }

    #[tokio::test]
    async fn test_stream_reports_source_facing() {
        let dir = tempfile::tempdir().unwrap();
        let camera = StillImageCamera::new(write_png(dir.path(), 2, 2), FacingMode::Environment);
        let stream = camera
            .request_stream(&StreamConstraints::any(None))
            .await
            .unwrap();
        assert_eq!(stream.facing(), Some(FacingMode::Environment));
    }
}
