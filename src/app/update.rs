// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all screen messages by routing them to focused handler methods.
//! The main `update()` function acts as a dispatcher, while specific handlers are implemented
//! in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::camera`: Camera open, readiness, close
//! - `handlers::capture`: Camera capture, file import, photo removal
//! - `handlers::share`: Dispatch and teardown

use crate::app::state::{Message, ShareScreen};
use crate::errors::AppResult;
use tracing::debug;

impl ShareScreen {
    /// Main message handler - routes messages to appropriate handler methods.
    ///
    /// Errors are queued as notices before being returned, so the caller may
    /// ignore them.
    pub async fn update(&mut self, message: Message) -> AppResult<()> {
        let result = match message {
            // ===== Form =====
            Message::FieldChanged(field, value) => {
                debug!(field = field.key(), "Form field changed");
                self.form.set(field, value);
                Ok(())
            }
            Message::RecipientChanged(recipient) => {
                self.recipient = recipient;
                Ok(())
            }

            // ===== Camera =====
            Message::OpenCamera => self.open_camera().await,
            Message::CameraReady => self.camera_ready(),
            Message::AwaitCameraReady => self.await_camera_ready().await,
            Message::CloseCamera => self.close_camera(),

            // ===== Photos =====
            Message::Capture => self.capture_from_camera().await,
            Message::ImportFiles(files) => self.import_files(files).await.map(|_| ()),
            Message::RemovePhoto(index) => self.remove_photo(index),

            // ===== Share =====
            Message::Share => self.dispatch().await.map(|_| ()),

            // ===== Lifecycle =====
            Message::Teardown => {
                self.teardown();
                Ok(())
            }
        };

        if let Err(ref err) = result {
            self.report(err);
        }
        result
    }
}
