// SPDX-License-Identifier: MPL-2.0

//! In-memory capability providers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use photo_share::backends::camera::{
    BackendError, BackendResult, CameraFrame, FacingMode, MediaCapabilityProvider, MediaStream,
    StreamConstraints,
};
use photo_share::backends::share::{ShareCapabilityProvider, ShareError, ShareRequest};
use photo_share::pipelines::photo::DisplayHandle;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Encoded PNG of a flat color
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

/// Encoded PNG with a red band over the left quarter, black elsewhere
pub fn left_banded_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 4 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 0])
        }
    })
    .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
    .unwrap();
    out
}

/// Camera whose streams become ready when the test says so
pub struct FakeCamera {
    pub has_rear: bool,
    pub denied: bool,
    pub frame_size: (u32, u32),
    pub requests: Mutex<Vec<StreamConstraints>>,
    pub stops: Arc<AtomicUsize>,
    ready: watch::Sender<bool>,
}

impl FakeCamera {
    pub fn new() -> Arc<Self> {
        Self::build(true, false)
    }

    pub fn front_only() -> Arc<Self> {
        Self::build(false, false)
    }

    pub fn denied() -> Arc<Self> {
        Self::build(false, true)
    }

    fn build(has_rear: bool, denied: bool) -> Arc<Self> {
        let (ready, _) = watch::channel(false);
        Arc::new(Self {
            has_rear,
            denied,
            frame_size: (1920, 1080),
            requests: Mutex::new(Vec::new()),
            stops: Arc::new(AtomicUsize::new(0)),
            ready,
        })
    }

    /// Signal the first decodable frame on every open stream
    pub fn signal_ready(&self) {
        self.ready.send_replace(true);
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

struct FakeStream {
    facing: FacingMode,
    size: (u32, u32),
    ready: watch::Receiver<bool>,
    stops: Arc<AtomicUsize>,
}

impl MediaStream for FakeStream {
    fn label(&self) -> &str {
        "fake camera"
    }

    fn facing(&self) -> Option<FacingMode> {
        Some(self.facing)
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        Some(self.size)
    }

    fn readiness(&self) -> watch::Receiver<bool> {
        self.ready.clone()
    }

    fn grab_frame(&self) -> BackendResult<CameraFrame> {
        // Small source frame; the capture draws it into the reported size
        CameraFrame::from_rgba(16, 9, vec![127u8; 16 * 9 * 4])
    }

    fn stop_tracks(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaCapabilityProvider for FakeCamera {
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> BackendResult<Box<dyn MediaStream>> {
        self.requests.lock().unwrap().push(*constraints);
        if self.denied {
            return Err(BackendError::PermissionDenied("NotAllowedError".into()));
        }
        if constraints.facing.is_some() && !self.has_rear {
            return Err(BackendError::ConstraintUnsatisfiable("no rear camera".into()));
        }
        let facing = if self.has_rear {
            FacingMode::Environment
        } else {
            FacingMode::User
        };
        Ok(Box::new(FakeStream {
            facing,
            size: self.frame_size,
            ready: self.ready.subscribe(),
            stops: Arc::clone(&self.stops),
        }))
    }
}

/// Share provider recording every effect
#[derive(Default)]
pub struct FakeShare {
    pub native: bool,
    pub native_rejects: bool,
    pub links_fail: bool,
    pub shared: Mutex<Vec<ShareRequest>>,
    pub opened: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
}

impl FakeShare {
    pub fn links_only() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn native() -> Arc<Self> {
        Arc::new(Self {
            native: true,
            ..Default::default()
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            links_fail: true,
            ..Default::default()
        })
    }
}

#[async_trait]
impl ShareCapabilityProvider for FakeShare {
    fn can_share(&self, _request: &ShareRequest) -> bool {
        self.native
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        if self.native_rejects {
            return Err(ShareError::Rejected("AbortError".into()));
        }
        self.shared.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn open_link(&self, url: &str) -> Result<(), ShareError> {
        if self.links_fail {
            return Err(ShareError::OpenFailed("no handler".into()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn download(
        &self,
        file_name: &str,
        _link: &DisplayHandle,
        _bytes: Arc<[u8]>,
    ) -> Result<(), ShareError> {
        self.downloads.lock().unwrap().push(file_name.to_string());
        Ok(())
    }
}
