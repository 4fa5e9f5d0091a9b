// SPDX-License-Identifier: GPL-3.0-only

//! Screen state types
//!
//! This module contains the screen model and the messages that drive it.

use crate::backends::camera::{
    CameraSession, MediaCapabilityProvider, SessionState, SessionStatus,
};
use crate::backends::share::ShareCapabilityProvider;
use crate::config::Config;
use crate::errors::AppError;
use crate::form::{FormField, FormRecord};
use crate::gallery::CaptureCollection;
use crate::pipelines::photo::{CaptureSettings, DisplayRegistry, FrameCapture};
use crate::share::{ShareDispatcher, SharePayload};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Non-blocking failure message for the user
///
/// Successful operations never queue one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// How the capture button should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureControl {
    /// Camera closed; nothing to capture from
    Hidden,
    /// Camera starting, or a capture is in flight
    Disabled,
    Enabled,
    /// Camera could not be opened; only the file picker is offered
    FilePickerOnly,
}

/// Messages that drive the screen
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Form =====
    /// A form field was edited
    FieldChanged(FormField, String),
    /// Phone number for the direct conversation link was edited
    RecipientChanged(String),

    // ===== Camera =====
    /// Open the camera (rear first, then any)
    OpenCamera,
    /// The preview rendered its first frame
    CameraReady,
    /// Wait for the stream's own readiness signal
    AwaitCameraReady,
    /// Stop the camera
    CloseCamera,

    // ===== Photos =====
    /// Capture the current frame
    Capture,
    /// Encoded contents of files picked by the user
    ImportFiles(Vec<Vec<u8>>),
    /// Remove the photo at this position
    RemovePhoto(usize),

    // ===== Share =====
    /// Send the form text and photos
    Share,

    // ===== Lifecycle =====
    /// The screen is going away
    Teardown,
}

/// The share screen model
///
/// Owns the form, the camera session, the captured photos and the share
/// dispatcher, and is the only place where component errors turn into
/// user-visible notices.
pub struct ShareScreen {
    pub(crate) config: Config,
    pub(crate) form: FormRecord,
    pub(crate) recipient: String,
    pub(crate) session: CameraSession,
    pub(crate) capture: FrameCapture,
    pub(crate) photos: CaptureCollection,
    pub(crate) dispatcher: Arc<ShareDispatcher>,
    pub(crate) registry: DisplayRegistry,
    /// A capture is in flight
    pub(crate) capturing: bool,
    /// A dispatch is in flight
    pub(crate) dispatching: bool,
    /// Shared with in-flight captures so late results can be discarded
    pub(crate) torn_down: Arc<AtomicBool>,
    pub(crate) notices: VecDeque<Notice>,
}

impl ShareScreen {
    /// Create a screen with an empty form, a closed camera and no photos
    pub fn new(
        config: Config,
        media: Arc<dyn MediaCapabilityProvider>,
        share: Arc<dyn ShareCapabilityProvider>,
    ) -> Self {
        let registry = DisplayRegistry::new();
        let session = CameraSession::new(media, config.facing_preference).with_ideal_resolution(
            config.ideal_resolution.width,
            config.ideal_resolution.height,
        );
        let capture = FrameCapture::new(CaptureSettings::from(&config), registry.clone());
        let dispatcher = Arc::new(ShareDispatcher::new(
            share,
            registry.clone(),
            config.download_delay(),
        ));

        info!(
            facing = ?config.facing_preference,
            ideal = %config.ideal_resolution,
            max_edge = config.max_edge,
            "Share screen created"
        );

        Self {
            photos: CaptureCollection::new(registry.clone()),
            config,
            form: FormRecord::default(),
            recipient: String::new(),
            session,
            capture,
            dispatcher,
            registry,
            capturing: false,
            dispatching: false,
            torn_down: Arc::new(AtomicBool::new(false)),
            notices: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn session(&self) -> &CameraSession {
        &self.session
    }

    pub fn camera_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn photos(&self) -> &CaptureCollection {
        &self.photos
    }

    pub fn registry(&self) -> &DisplayRegistry {
        &self.registry
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Message text for the current form contents
    pub fn payload(&self) -> SharePayload {
        SharePayload::from_form(&self.form)
    }

    /// Presentation of the capture button
    pub fn capture_control(&self) -> CaptureControl {
        let state = self.session.state();
        match state.status {
            SessionStatus::Closed => CaptureControl::Hidden,
            SessionStatus::Failed => CaptureControl::FilePickerOnly,
            SessionStatus::Requesting => CaptureControl::Disabled,
            SessionStatus::Live if !state.ready || self.capturing => CaptureControl::Disabled,
            SessionStatus::Live => CaptureControl::Enabled,
        }
    }

    /// Whether the share button is active
    pub fn can_dispatch(&self) -> bool {
        !self.photos.is_empty() && !self.dispatching && !self.is_torn_down()
    }

    /// Queue a notice for the view
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Queue the notice for an error, if it has one
    pub fn report(&mut self, err: &AppError) {
        match err.notice_text() {
            Some(text) => {
                warn!(error = %err, "Operation failed");
                self.push_notice(Notice::new(text));
            }
            None => info!(error = %err, "Operation skipped"),
        }
    }

    /// Take every pending notice, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

impl Drop for ShareScreen {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ShareScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareScreen")
            .field("session", &self.session)
            .field("photos", &self.photos.len())
            .field("capturing", &self.capturing)
            .field("dispatching", &self.dispatching)
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
