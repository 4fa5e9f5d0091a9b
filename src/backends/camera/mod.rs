// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! The camera is reached only through an injected [`MediaCapabilityProvider`],
//! so the session logic runs the same against a real device, a still image
//! or a test fake.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Screen (App)      │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   CameraSession     │  ← Lifecycle, facing fallback, readiness
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌──────────────────────────┐
//! │ MediaCapabilityProvider  │  ← Common interface
//! └──────────┬───────────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │ Still image  │  ← Concrete implementation
//!     └──────────────┘
//! ```

pub mod session;
pub mod still;
pub mod types;

pub use session::{CameraSession, SessionState, SessionStatus};
pub use still::StillImageCamera;
pub use types::*;

use async_trait::async_trait;
use tokio::sync::watch;

/// Access to the device camera
#[async_trait]
pub trait MediaCapabilityProvider: Send + Sync {
    /// Request a live stream matching the constraints
    ///
    /// A granted stream is not necessarily decodable yet; see
    /// [`MediaStream::readiness`].
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> BackendResult<Box<dyn MediaStream>>;
}

/// A granted device stream
pub trait MediaStream: Send {
    /// Device label for logging
    fn label(&self) -> &str;

    /// Direction the granted camera faces, if the device reports it
    fn facing(&self) -> Option<FacingMode>;

    /// Native frame size, if the device reports one
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Flips to `true` once the first frame is guaranteed renderable
    fn readiness(&self) -> watch::Receiver<bool>;

    /// Copy the current frame
    fn grab_frame(&self) -> BackendResult<CameraFrame>;

    /// Stop every track of the stream
    fn stop_tracks(&mut self);
}
