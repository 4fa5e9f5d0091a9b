// SPDX-License-Identifier: GPL-3.0-only

//! Share dispatch
//!
//! Channels are tried strictly in order, moving on whenever one returns an
//! error:
//!
//! ```text
//! Native share (text + files) ──ok──→ done
//!        │ err
//!        ▼
//! Direct link (recipient digits) / Compose link ──ok──┐
//!        │ err                                         │
//!        ▼                                             │
//! Intent link ──ok─────────────────────────────────────┤
//!        │ err                                         ▼
//!        ▼                                  delay → download every photo
//! DispatchError::NoChannelAvailable
//! ```

pub mod links;
pub mod payload;

pub use payload::SharePayload;

use crate::backends::share::{ShareCapabilityProvider, ShareError, ShareFile, ShareRequest};
use crate::constants::{PHOTO_MIME, download_file_name};
use crate::errors::DispatchError;
use crate::pipelines::photo::{CapturedPhoto, DisplayRegistry};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delivery channels, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareChannel {
    /// Text and files together through the native share sheet
    Native,
    /// Conversation with a specific phone number, text only
    DirectLink,
    /// Generic compose screen, text only
    ComposeLink,
    /// OS intent variant of the compose link, text only
    IntentLink,
}

impl std::fmt::Display for ShareChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareChannel::Native => write!(f, "native share"),
            ShareChannel::DirectLink => write!(f, "direct link"),
            ShareChannel::ComposeLink => write!(f, "compose link"),
            ShareChannel::IntentLink => write!(f, "intent link"),
        }
    }
}

/// What a successful dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Text and photos went out in one native share action
    Native,
    /// Text went out over a link; photos were downloaded for manual attachment
    Handoff {
        channel: ShareChannel,
        downloaded: usize,
        failed_downloads: usize,
    },
}

type Attempt<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Result<(), ShareError>> + Send + 'a>;

/// Delivers the form text and photos to the messaging app
pub struct ShareDispatcher {
    provider: Arc<dyn ShareCapabilityProvider>,
    registry: DisplayRegistry,
    download_delay: Duration,
}

impl ShareDispatcher {
    pub fn new(
        provider: Arc<dyn ShareCapabilityProvider>,
        registry: DisplayRegistry,
        download_delay: Duration,
    ) -> Self {
        Self {
            provider,
            registry,
            download_delay,
        }
    }

    /// Native share request carrying the text and every photo
    fn native_request(payload: &SharePayload, photos: &[Arc<[u8]>]) -> ShareRequest {
        ShareRequest {
            text: payload.text().to_string(),
            files: photos
                .iter()
                .enumerate()
                .map(|(i, bytes)| ShareFile {
                    name: download_file_name(i),
                    mime: PHOTO_MIME,
                    bytes: Arc::clone(bytes),
                })
                .collect(),
        }
    }

    /// Ordered channel attempts for this payload
    fn attempts<'a>(
        &'a self,
        request: &'a ShareRequest,
        recipient: Option<&str>,
    ) -> Vec<(ShareChannel, Attempt<'a>)> {
        let provider = &self.provider;

        let native: Attempt<'a> = Box::new(move || {
            async move {
                if !provider.can_share(request) {
                    return Err(ShareError::Unsupported);
                }
                provider.share(request).await
            }
            .boxed()
        });
        let mut attempts = vec![(ShareChannel::Native, native)];

        for (channel, url) in links::handoff_links(&request.text, recipient) {
            let open: Attempt<'a> =
                Box::new(move || async move { provider.open_link(&url) }.boxed());
            attempts.push((channel, open));
        }

        attempts
    }

    /// Deliver `payload` and `photos`
    ///
    /// Callers must not dispatch an empty collection; doing so fails with
    /// `NothingToShare` without attempting any channel.
    pub async fn dispatch(
        &self,
        payload: &SharePayload,
        photos: &[CapturedPhoto],
        recipient: Option<&str>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let photos: Vec<Arc<[u8]>> = photos.iter().map(CapturedPhoto::shared_bytes).collect();
        self.dispatch_shared(payload, &photos, recipient).await
    }

    /// Same as [`dispatch`](Self::dispatch), on a snapshot of encoded photo bytes
    pub async fn dispatch_shared(
        &self,
        payload: &SharePayload,
        photos: &[Arc<[u8]>],
        recipient: Option<&str>,
    ) -> Result<DispatchOutcome, DispatchError> {
        if photos.is_empty() {
            return Err(DispatchError::NothingToShare);
        }

        let request = Self::native_request(payload, photos);
        let mut tried = Vec::new();
        let mut last_error = None;
        let mut opened = None;

        for (channel, attempt) in self.attempts(&request, recipient) {
            tried.push(channel);
            match attempt().await {
                Ok(()) => {
                    info!(channel = %channel, photos = photos.len(), "Share channel opened");
                    opened = Some(channel);
                    break;
                }
                Err(e) if channel == ShareChannel::Native => {
                    // Expected on most platforms, not a fault
                    debug!(error = %e, "Native share unavailable, falling back to links");
                    last_error = Some(e);
                }
                Err(e) => {
                    warn!(channel = %channel, error = %e, "Share channel failed");
                    last_error = Some(e);
                }
            }
        }

        match opened {
            Some(ShareChannel::Native) => Ok(DispatchOutcome::Native),
            Some(channel) => {
                let (downloaded, failed_downloads) = self.download_all(photos).await;
                Ok(DispatchOutcome::Handoff {
                    channel,
                    downloaded,
                    failed_downloads,
                })
            }
            None => Err(DispatchError::NoChannelAvailable {
                tried,
                last_error: last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no channel".to_string()),
            }),
        }
    }

    /// Download every photo, one after the other, after the focus delay
    ///
    /// Each download gets its own transient handle, revoked right after.
    /// Returns `(downloaded, failed)`.
    async fn download_all(&self, photos: &[Arc<[u8]>]) -> (usize, usize) {
        if !self.download_delay.is_zero() {
            tokio::time::sleep(self.download_delay).await;
        }

        let mut downloaded = 0;
        let mut failed = 0;
        for (index, bytes) in photos.iter().enumerate() {
            let file_name = download_file_name(index);
            let bytes = Arc::clone(bytes);
            let link = self.registry.create(&bytes);

            let result = self.provider.download(&file_name, &link, bytes).await;
            self.registry.revoke(&link);

            match result {
                Ok(()) => downloaded += 1,
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Photo download failed");
                    failed += 1;
                }
            }
        }

        info!(downloaded, failed, "Download fallback finished");
        (downloaded, failed)
    }
}

impl std::fmt::Debug for ShareDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareDispatcher")
            .field("download_delay", &self.download_delay)
            .finish()
    }
}
