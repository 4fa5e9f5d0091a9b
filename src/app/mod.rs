// SPDX-License-Identifier: MPL-2.0

//! Share screen module
//!
//! This module contains the screen state, message handling and the rules
//! that tie the camera, the photo collection and the share dispatcher
//! together.
//!
//! # Architecture
//!
//! - `state`: Screen state types (ShareScreen, Message, Notice, CaptureControl)
//! - `update`: Message handling
//! - `handlers`: Handlers grouped by domain (camera, capture, share)
//! - `utils`: Argument parsing helpers
//!
//! # Main Types
//!
//! - `ShareScreen`: Screen model owning the form, camera, photos and dispatcher
//! - `Message`: All possible user interactions and system events
//! - `Notice`: Non-blocking message queued for the user

pub mod handlers;
mod state;
mod update;
pub mod utils;

pub use handlers::{PendingCapture, PendingDispatch};
pub use state::{CaptureControl, Message, Notice, ShareScreen};
