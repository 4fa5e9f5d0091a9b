// SPDX-License-Identifier: GPL-3.0-only

//! Camera lifecycle handlers
//!
//! Handles opening, readiness and shutdown of the camera session.

use crate::app::state::ShareScreen;
use crate::errors::{AppError, AppResult};
use tracing::{debug, info};

impl ShareScreen {
    // =========================================================================
    // Camera Lifecycle Handlers
    // =========================================================================

    /// Open the camera, leaving the file picker as the only source on failure
    pub(crate) async fn open_camera(&mut self) -> AppResult<()> {
        if self.is_torn_down() {
            return Err(AppError::TornDown);
        }
        self.session.open().await?;
        info!(state = ?self.session.state(), "Camera opened");
        Ok(())
    }

    /// The preview reported its first rendered frame
    pub(crate) fn camera_ready(&mut self) -> AppResult<()> {
        if !self.session.mark_ready() {
            debug!(state = ?self.session.state(), "Ready event ignored");
        }
        Ok(())
    }

    /// Wait until the stream signals its first decodable frame
    pub(crate) async fn await_camera_ready(&mut self) -> AppResult<()> {
        self.session.wait_until_ready().await?;
        Ok(())
    }

    pub(crate) fn close_camera(&mut self) -> AppResult<()> {
        self.session.close();
        Ok(())
    }
}
