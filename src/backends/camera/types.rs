// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Physical direction a camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacingMode {
    /// Rear camera, pointing away from the user
    Environment,
    /// Front camera, pointing at the user
    User,
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::Environment => write!(f, "environment"),
            FacingMode::User => write!(f, "user"),
        }
    }
}

/// Which camera a session asks for first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacingPreference {
    /// Rear camera first, any camera as fallback
    #[default]
    Environment,
    /// Any camera, single attempt
    Any,
}

/// Constraints for a single stream request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamConstraints {
    /// Exact facing mode; `None` accepts any camera
    pub facing: Option<FacingMode>,
    /// Preferred resolution; the device may ignore it
    pub ideal_resolution: Option<(u32, u32)>,
}

impl StreamConstraints {
    /// Require a specific facing mode
    pub fn exact(facing: FacingMode, ideal_resolution: Option<(u32, u32)>) -> Self {
        Self {
            facing: Some(facing),
            ideal_resolution,
        }
    }

    /// Accept whatever camera is available
    pub fn any(ideal_resolution: Option<(u32, u32)>) -> Self {
        Self {
            facing: None,
            ideal_resolution,
        }
    }
}

impl std::fmt::Display for StreamConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.facing {
            Some(facing) => write!(f, "facingMode=exact({})", facing)?,
            None => write!(f, "facingMode=any")?,
        }
        if let Some((w, h)) = self.ideal_resolution {
            write!(f, " ideal={}x{}", w, h)?;
        }
        Ok(())
    }
}

/// A single decoded frame in RGBA format (4 bytes per pixel, tightly packed)
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap RGBA data, checking that it covers the full frame
    pub fn from_rgba(width: u32, height: u32, data: impl Into<Arc<[u8]>>) -> BackendResult<Self> {
        let data = data.into();
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() < expected {
            return Err(BackendError::FrameUnavailable(format!(
                "RGBA frame {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            captured_at: Instant::now(),
        })
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a media capability provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Constraint not satisfiable: {0}")]
    ConstraintUnsatisfiable(String),

    #[error("Frame unavailable: {0}")]
    FrameUnavailable(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Error: {0}")]
    Other(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => BackendError::DeviceNotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => BackendError::PermissionDenied(err.to_string()),
            _ => BackendError::IoError(err.to_string()),
        }
    }
}
