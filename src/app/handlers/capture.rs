// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Handles camera capture, file import and photo removal.
//!
//! A camera capture is split so the encode can run off the screen:
//! [`ShareScreen::begin_capture`] sets the busy flag and returns an owned
//! [`PendingCapture`], and [`ShareScreen::complete_capture`] clears the flag
//! and stores the result.

use crate::app::state::ShareScreen;
use crate::errors::{AppError, AppResult};
use crate::pipelines::photo::{CaptureJob, CaptureSource, CapturedPhoto, FrameCapture};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// A camera capture detached from the screen
#[derive(Debug)]
pub struct PendingCapture {
    job: CaptureJob,
    capture: FrameCapture,
    torn_down: Arc<AtomicBool>,
}

impl PendingCapture {
    /// Encode the frame
    ///
    /// If the screen was torn down meanwhile, the photo is discarded and its
    /// display handle revoked.
    pub async fn run(self) -> AppResult<CapturedPhoto> {
        let photo = self.capture.run(self.job).await?;
        if self.torn_down.load(Ordering::SeqCst) {
            debug!(
                sequence_index = photo.sequence_index(),
                "Discarding capture finished after teardown"
            );
            self.capture.registry().revoke(photo.display_handle());
            return Err(AppError::TornDown);
        }
        Ok(photo)
    }
}

impl ShareScreen {
    // =========================================================================
    // Capture Handlers
    // =========================================================================

    /// Grab the current frame and mark a capture as in flight
    pub fn begin_capture(&mut self) -> AppResult<PendingCapture> {
        if self.is_torn_down() {
            return Err(AppError::TornDown);
        }
        if self.capturing {
            debug!("Capture already in progress, ignoring");
            return Err(AppError::Busy);
        }

        let job = self.capture.prepare(CaptureSource::Stream(&self.session))?;
        self.capturing = true;

        Ok(PendingCapture {
            job,
            capture: self.capture.clone(),
            torn_down: Arc::clone(&self.torn_down),
        })
    }

    /// Store the result of a [`PendingCapture`] and clear the busy flag
    pub fn complete_capture(&mut self, result: AppResult<CapturedPhoto>) -> AppResult<()> {
        self.capturing = false;

        let photo = result?;
        if self.is_torn_down() {
            self.registry.revoke(photo.display_handle());
            return Err(AppError::TornDown);
        }
        info!(count = self.photos.len() + 1, "Capture added");
        self.photos.add(photo);
        Ok(())
    }

    /// Capture from the camera in one step
    pub(crate) async fn capture_from_camera(&mut self) -> AppResult<()> {
        let pending = self.begin_capture()?;
        let result = pending.run().await;
        self.complete_capture(result)
    }

    /// Compress picked files and append them in selection order
    ///
    /// A file that cannot be decoded is skipped; the rest still go in.
    /// Returns how many photos were added.
    pub(crate) async fn import_files(&mut self, files: Vec<Vec<u8>>) -> AppResult<usize> {
        if self.is_torn_down() {
            return Err(AppError::TornDown);
        }

        let total = files.len();
        let mut added = 0;
        let mut first_error = None;
        for bytes in files {
            match self.capture.capture(CaptureSource::File(&bytes)).await {
                Ok(photo) => {
                    self.photos.add(photo);
                    added += 1;
                }
                Err(e) => {
                    warn!(error = %e, "Skipping picked file");
                    first_error.get_or_insert(e);
                }
            }
        }

        info!(added, total, "Files imported");
        match first_error {
            Some(e) if added == 0 => Err(e.into()),
            Some(e) => {
                // Partial import still reports the failure
                self.report(&e.into());
                Ok(added)
            }
            None => Ok(added),
        }
    }

    pub(crate) fn remove_photo(&mut self, index: usize) -> AppResult<()> {
        self.photos.remove_at(index)?;
        Ok(())
    }
}
