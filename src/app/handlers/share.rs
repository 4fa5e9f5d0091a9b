// SPDX-License-Identifier: GPL-3.0-only

//! Share handlers
//!
//! Handles dispatch of the form text and photos, and screen teardown.

use crate::app::state::{Notice, ShareScreen};
use crate::errors::{AppError, AppResult, DispatchError};
use crate::share::{DispatchOutcome, SharePayload, ShareDispatcher};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

/// A dispatch detached from the screen, over a snapshot of the photos
#[derive(Debug)]
pub struct PendingDispatch {
    dispatcher: Arc<ShareDispatcher>,
    payload: SharePayload,
    photos: Vec<Arc<[u8]>>,
    recipient: Option<String>,
}

impl PendingDispatch {
    pub async fn run(self) -> Result<DispatchOutcome, DispatchError> {
        self.dispatcher
            .dispatch_shared(&self.payload, &self.photos, self.recipient.as_deref())
            .await
    }
}

impl ShareScreen {
    // =========================================================================
    // Share Handlers
    // =========================================================================

    /// Snapshot the form and photos and mark a dispatch as in flight
    pub fn begin_dispatch(&mut self) -> AppResult<PendingDispatch> {
        if self.is_torn_down() {
            return Err(AppError::TornDown);
        }
        if self.dispatching {
            debug!("Dispatch already in progress, ignoring");
            return Err(AppError::Busy);
        }
        if self.photos.is_empty() {
            return Err(AppError::NothingToShare);
        }

        self.dispatching = true;
        let recipient = Some(self.recipient.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(PendingDispatch {
            dispatcher: Arc::clone(&self.dispatcher),
            payload: self.payload(),
            photos: self.photos.list().iter().map(|p| p.shared_bytes()).collect(),
            recipient,
        })
    }

    /// Record the result of a [`PendingDispatch`] and clear the busy flag
    ///
    /// The form and the photos are kept whatever the outcome.
    pub fn complete_dispatch(
        &mut self,
        result: Result<DispatchOutcome, DispatchError>,
    ) -> AppResult<DispatchOutcome> {
        self.dispatching = false;
        let outcome = result?;

        // Success is silent; only failed downloads are worth a notice
        if let DispatchOutcome::Handoff {
            failed_downloads, ..
        } = &outcome
            && *failed_downloads > 0
        {
            self.push_notice(Notice::new(format!(
                "{} foto(s) não puderam ser baixadas.",
                failed_downloads
            )));
        }
        info!(outcome = ?outcome, "Dispatch finished");
        Ok(outcome)
    }

    /// Dispatch in one step
    pub(crate) async fn dispatch(&mut self) -> AppResult<DispatchOutcome> {
        let pending = self.begin_dispatch()?;
        let result = pending.run().await;
        self.complete_dispatch(result)
    }

    /// Stop the camera and release every photo
    ///
    /// Idempotent. Captures still in flight will discard their result.
    pub fn teardown(&mut self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.session.close();
        self.photos.clear();
        info!("Share screen torn down");
    }
}
