// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::FacingPreference;
use crate::constants;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Runtime settings
///
/// Nothing is ever written back; a JSON file can override the defaults for a
/// single run.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which camera to ask for first
    pub facing_preference: FacingPreference,
    /// Resolution hint for the camera request
    pub ideal_resolution: Resolution,
    /// Raster size used when the stream reports no native size
    pub default_frame: Resolution,
    /// Longest edge allowed for a saved photo
    pub max_edge: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Mirror the front camera preview (selfie mode); its captures follow it
    pub mirror_preview: bool,
    /// Delay before the download fallback starts, in milliseconds
    pub download_delay_ms: u64,
    /// Where the download fallback writes photos (system download dir if unset)
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facing_preference: FacingPreference::default(),
            ideal_resolution: Resolution::new(
                constants::IDEAL_FRAME_WIDTH,
                constants::IDEAL_FRAME_HEIGHT,
            ),
            default_frame: Resolution::new(
                constants::DEFAULT_FRAME_WIDTH,
                constants::DEFAULT_FRAME_HEIGHT,
            ),
            max_edge: constants::MAX_PHOTO_EDGE,
            jpeg_quality: constants::JPEG_QUALITY,
            mirror_preview: true, // Default to mirrored (selfie mode)
            download_delay_ms: constants::DOWNLOAD_DELAY.as_millis() as u64,
            download_dir: None,
        }
    }
}

impl Config {
    /// Load settings from a JSON file
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(AppError::Config(format!("{}: {}", path.display(), e))),
        };

        let config: Config = serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config.sanitized())
    }

    /// Clamp values that would make capture or encoding impossible
    pub fn sanitized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.max_edge = self.max_edge.max(1);
        if self.default_frame.width == 0 || self.default_frame.height == 0 {
            self.default_frame = Resolution::new(
                constants::DEFAULT_FRAME_WIDTH,
                constants::DEFAULT_FRAME_HEIGHT,
            );
        }
        self
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    /// Directory the download fallback writes into
    pub fn download_directory(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
