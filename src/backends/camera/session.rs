// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle
//!
//! The session provides:
//! - Stream acquisition with rear-camera preference and generic fallback
//! - Readiness tracking, published to subscribers
//! - Idempotent shutdown, also run on drop
//!
//! ```text
//! Closed → Requesting → Live(not ready) → Live(ready) → Closed
//!               │
//!               └──────→ Failed
//! ```

use super::types::*;
use super::{MediaCapabilityProvider, MediaStream};
use crate::errors::AcquireError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle status of a camera session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Closed,
    Requesting,
    Live,
    Failed,
}

/// Snapshot published to subscribers on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub status: SessionStatus,
    /// First frame decodable; only ever true while `Live`
    pub ready: bool,
}

impl SessionState {
    const CLOSED: Self = Self {
        status: SessionStatus::Closed,
        ready: false,
    };
}

/// Camera session owning at most one device stream
pub struct CameraSession {
    provider: Arc<dyn MediaCapabilityProvider>,
    preference: FacingPreference,
    ideal_resolution: Option<(u32, u32)>,
    stream: Option<Box<dyn MediaStream>>,
    state: watch::Sender<SessionState>,
}

impl CameraSession {
    /// Create a closed session
    pub fn new(provider: Arc<dyn MediaCapabilityProvider>, preference: FacingPreference) -> Self {
        let (state, _) = watch::channel(SessionState::CLOSED);
        Self {
            provider,
            preference,
            ideal_resolution: None,
            stream: None,
            state,
        }
    }

    /// Resolution hint sent with each request
    pub fn with_ideal_resolution(mut self, width: u32, height: u32) -> Self {
        self.ideal_resolution = Some((width, height));
        self
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn status(&self) -> SessionStatus {
        self.state().status
    }

    pub fn is_ready(&self) -> bool {
        self.state().ready
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The live stream, read-only for everyone but the session
    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    fn publish(&self, status: SessionStatus, ready: bool) {
        let next = SessionState { status, ready };
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// Ordered constraint attempts for the configured preference
    fn attempts(&self) -> Vec<StreamConstraints> {
        match self.preference {
            FacingPreference::Environment => vec![
                StreamConstraints::exact(FacingMode::Environment, self.ideal_resolution),
                StreamConstraints::any(self.ideal_resolution),
            ],
            FacingPreference::Any => vec![StreamConstraints::any(self.ideal_resolution)],
        }
    }

    /// Open the camera
    ///
    /// Tries the rear camera first, then any camera. An already open stream is
    /// closed before the new request. On total failure the session is left
    /// `Failed` and the last provider error is returned.
    pub async fn open(&mut self) -> Result<(), AcquireError> {
        if self.stream.is_some() {
            debug!("Closing existing stream before reopening");
            self.close();
        }

        self.publish(SessionStatus::Requesting, false);

        let mut last_error = None;
        for (attempt, constraints) in self.attempts().into_iter().enumerate() {
            info!(attempt = attempt + 1, constraints = %constraints, "Requesting camera stream");
            match self.provider.request_stream(&constraints).await {
                Ok(stream) => {
                    info!(
                        device = stream.label(),
                        dimensions = ?stream.dimensions(),
                        "Camera stream granted"
                    );
                    self.stream = Some(stream);
                    self.publish(SessionStatus::Live, false);
                    return Ok(());
                }
                Err(e) => {
                    warn!(attempt = attempt + 1, error = %e, "Camera request failed");
                    last_error = Some(e);
                }
            }
        }

        self.publish(SessionStatus::Failed, false);
        let err = last_error
            .map(AcquireError::from)
            .unwrap_or_else(|| AcquireError::Unavailable("no request attempted".to_string()));
        warn!(reason = err.reason(), "Camera unavailable, file picker only");
        Err(err)
    }

    /// Readiness event: the first frame is renderable
    ///
    /// Returns `true` if this call made the session ready. Ignored unless the
    /// session is `Live`.
    pub fn mark_ready(&mut self) -> bool {
        let state = self.state();
        if state.status != SessionStatus::Live || state.ready {
            return false;
        }
        debug!("Camera stream ready");
        self.publish(SessionStatus::Live, true);
        true
    }

    /// Wait for the stream's readiness signal and mark the session ready
    pub async fn wait_until_ready(&mut self) -> Result<(), AcquireError> {
        let mut readiness = match (&self.stream, self.status()) {
            (Some(stream), SessionStatus::Live) => stream.readiness(),
            _ => return Err(AcquireError::NotOpen),
        };

        if readiness.wait_for(|ready| *ready).await.is_err() {
            warn!("Camera stream ended before first frame");
            return Err(AcquireError::StreamEnded);
        }

        self.mark_ready();
        Ok(())
    }

    /// Stop all tracks and release the stream
    ///
    /// Idempotent: closing a closed session does nothing.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            info!(device = stream.label(), "Stopping camera stream");
            stream.stop_tracks();
        }
        self.publish(SessionStatus::Closed, false);
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("preference", &self.preference)
            .field("state", &self.state())
            .field("stream", &self.stream.as_ref().map(|s| s.label().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeStream {
        ready: watch::Receiver<bool>,
        stops: Arc<AtomicUsize>,
    }

    impl MediaStream for FakeStream {
        fn label(&self) -> &str {
            "fake"
        }
        fn facing(&self) -> Option<FacingMode> {
            None
        }
        fn dimensions(&self) -> Option<(u32, u32)> {
            Some((4, 4))
        }
        fn readiness(&self) -> watch::Receiver<bool> {
            self.ready.clone()
        }
        fn grab_frame(&self) -> BackendResult<CameraFrame> {
            CameraFrame::from_rgba(4, 4, vec![0u8; 64])
        }
        fn stop_tracks(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Rejects exact environment requests when `has_rear` is false
    struct FakeProvider {
        has_rear: bool,
        any_error: Option<BackendError>,
        requests: Mutex<Vec<StreamConstraints>>,
        stops: Arc<AtomicUsize>,
        ready_tx: watch::Sender<bool>,
    }

    impl FakeProvider {
        fn new(has_rear: bool, any_error: Option<BackendError>) -> Arc<Self> {
            Arc::new(Self {
                has_rear,
                any_error,
                requests: Mutex::new(Vec::new()),
                stops: Arc::new(AtomicUsize::new(0)),
                ready_tx: watch::channel(false).0,
            })
        }
    }

    #[async_trait]
    impl MediaCapabilityProvider for FakeProvider {
        async fn request_stream(
            &self,
            constraints: &StreamConstraints,
        ) -> BackendResult<Box<dyn MediaStream>> {
            self.requests.lock().unwrap().push(*constraints);
            match constraints.facing {
                Some(FacingMode::Environment) if !self.has_rear => Err(
                    BackendError::ConstraintUnsatisfiable("no rear camera".into()),
                ),
                None if self.any_error.is_some() => Err(self.any_error.clone().unwrap()),
                _ => Ok(Box::new(FakeStream {
                    ready: self.ready_tx.subscribe(),
                    stops: Arc::clone(&self.stops),
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_rear_camera_granted_first_try() {
        let provider = FakeProvider::new(true, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment);

        session.open().await.unwrap();

        assert_eq!(session.status(), SessionStatus::Live);
        assert!(!session.is_ready());
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_any_camera() {
        let provider = FakeProvider::new(false, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment)
            .with_ideal_resolution(1280, 720);

        session.open().await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].facing, Some(FacingMode::Environment));
        assert_eq!(requests[1].facing, None);
        assert_eq!(requests[1].ideal_resolution, Some((1280, 720)));
    }

    #[tokio::test]
    async fn test_both_attempts_fail() {
        let provider = FakeProvider::new(
            false,
            Some(BackendError::PermissionDenied("denied".into())),
        );
        let mut session = CameraSession::new(provider, FacingPreference::Environment);

        let err = session.open().await.unwrap_err();

        assert_eq!(err, AcquireError::PermissionDenied("denied".into()));
        assert_eq!(session.status(), SessionStatus::Failed);
        assert!(session.stream().is_none());
    }

    #[tokio::test]
    async fn test_any_preference_makes_single_request() {
        let provider = FakeProvider::new(false, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Any);

        session.open().await.unwrap();

        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_readiness_is_event_driven() {
        let provider = FakeProvider::new(true, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment);
        let mut states = session.subscribe();

        session.open().await.unwrap();
        assert!(!session.is_ready());

        provider.ready_tx.send_replace(true);
        session.wait_until_ready().await.unwrap();

        assert!(session.is_ready());
        assert!(states.has_changed().unwrap());
        assert_eq!(
            *states.borrow_and_update(),
            SessionState {
                status: SessionStatus::Live,
                ready: true
            }
        );
    }

    #[tokio::test]
    async fn test_mark_ready_ignored_when_closed() {
        let provider = FakeProvider::new(true, None);
        let mut session = CameraSession::new(provider, FacingPreference::Environment);

        assert!(!session.mark_ready());
        assert!(!session.is_ready());
        assert_eq!(
            session.wait_until_ready().await.unwrap_err(),
            AcquireError::NotOpen
        );
    }

    #[tokio::test]
    async fn test_close_twice_stops_once() {
        let provider = FakeProvider::new(true, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment);
        session.open().await.unwrap();
        session.mark_ready();

        session.close();
        session.close();

        assert_eq!(provider.stops.load(Ordering::SeqCst), 1);
        assert_eq!(session.status(), SessionStatus::Closed);
        assert!(!session.is_ready());
    }

    #[tokio::test]
    async fn test_reopen_stops_previous_stream() {
        let provider = FakeProvider::new(true, None);
        let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment);

        session.open().await.unwrap();
        session.open().await.unwrap();

        assert_eq!(provider.stops.load(Ordering::SeqCst), 1);
        assert_eq!(session.status(), SessionStatus::Live);
    }

    #[tokio::test]
    async fn test_drop_stops_stream() {
        let provider = FakeProvider::new(true, None);
        {
            let mut session = CameraSession::new(provider.clone(), FacingPreference::Environment);
            session.open().await.unwrap();
        }
        assert_eq!(provider.stops.load(Ordering::SeqCst), 1);
    }
}
