// SPDX-License-Identifier: MPL-2.0

//! Photo Share - capture photos and send them with form data to WhatsApp
//!
//! This library provides the core functionality for the photo share screen:
//! camera session lifecycle, photo capture and compression, the capture
//! collection, and dispatch of the form text and photos to the messaging app.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Screen state and message handling
//! - [`backends`]: Camera and share capability abstraction
//! - [`pipelines`]: Photo capture and compression pipeline
//! - [`gallery`]: Ordered collection of captured photos
//! - [`share`]: Message formatting, deep links and dispatch fallback chain
//! - [`form`]: Personal-data form state
//! - [`config`]: Runtime configuration
//! - [`storage`]: Picked and downloaded files
//!
//! # Example
//!
//! ```ignore
//! photo-share share --nome Ana --cpf 123 --photo doc.jpg --phone "+55 11 98765-4321"
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod form;
pub mod gallery;
pub mod pipelines;
pub mod share;
pub mod storage;

// Re-export commonly used types
pub use app::{CaptureControl, Message, Notice, ShareScreen};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use form::{FormField, FormRecord};
pub use gallery::CaptureCollection;
pub use share::{DispatchOutcome, ShareChannel, ShareDispatcher, SharePayload};
