// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo capture
//!
//! Heavy work runs in blocking tasks so the screen never waits on a decode
//! or an encode.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │  JPEG bytes  │
//! │ Picked file  │     │  - Raster/Decode  │     │  + display   │
//! │              │     │  - Fit long edge  │     │    handle    │
//! │              │     │  - Encoding       │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Async photo capture and JPEG encoding

pub mod photo;
