// SPDX-License-Identifier: GPL-3.0-only

//! Share capability abstraction
//!
//! Everything the dispatcher does to the outside world goes through a
//! [`ShareCapabilityProvider`]: the unified native share sheet, opening deep
//! links, and per-file downloads.

pub mod desktop;

pub use desktop::DesktopShare;

use crate::pipelines::photo::DisplayHandle;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// A file offered to the native share sheet
#[derive(Debug, Clone)]
pub struct ShareFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Arc<[u8]>,
}

/// Text and files offered together to the native share sheet
#[derive(Debug, Clone)]
pub struct ShareRequest {
    pub text: String,
    pub files: Vec<ShareFile>,
}

/// Errors reported by a share capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The platform cannot take this payload
    #[error("share not supported for this payload")]
    Unsupported,

    /// The user or the platform rejected the share
    #[error("share rejected: {0}")]
    Rejected(String),

    #[error("failed to open link: {0}")]
    OpenFailed(String),

    #[error("download failed: {0}")]
    DownloadFailed(String),
}

/// Platform share channels
#[async_trait]
pub trait ShareCapabilityProvider: Send + Sync {
    /// Whether the native share sheet accepts exactly this payload
    fn can_share(&self, request: &ShareRequest) -> bool;

    /// Hand text and files to the native share sheet in one action
    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;

    /// Open a deep link in the external application
    fn open_link(&self, url: &str) -> Result<(), ShareError>;

    /// Save one file through a transient reference
    ///
    /// The caller revokes `link` as soon as this returns.
    async fn download(
        &self,
        file_name: &str,
        link: &DisplayHandle,
        bytes: Arc<[u8]>,
    ) -> Result<(), ShareError>;
}
