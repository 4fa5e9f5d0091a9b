// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for platform capabilities
//!
//! This module keeps every outside-world effect behind a trait:
//! - Camera streams via [`camera::MediaCapabilityProvider`]
//! - Native share, deep links and downloads via [`share::ShareCapabilityProvider`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Screen Layer                 │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │   Camera    │    │      Share       │   │
//! │  │ (injected)  │    │    (injected)    │   │
//! │  └─────────────┘    └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera session and stream providers
//! - [`share`]: Share channels and the desktop implementation

pub mod camera;
pub mod share;
