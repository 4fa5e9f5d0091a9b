// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the share flow
//!
//! This module provides command-line functionality for:
//! - Sending form data and photos
//! - Compressing a single image
//! - Printing the share message

use async_trait::async_trait;
use photo_share::backends::camera::{
    BackendError, BackendResult, FacingMode, MediaCapabilityProvider, MediaStream,
    StillImageCamera, StreamConstraints,
};
use photo_share::app::utils::has_phone_digits;
use photo_share::backends::share::DesktopShare;
use photo_share::pipelines::photo::{CaptureSettings, CaptureSource, DisplayRegistry, FrameCapture};
use photo_share::{
    Config, DispatchOutcome, FormField, FormRecord, Message, ShareScreen, SharePayload, storage,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Options of the `share` command
pub struct ShareOptions {
    pub form: FormRecord,
    pub phone: Option<String>,
    pub photos: Vec<PathBuf>,
    pub pick: bool,
    pub camera: Option<PathBuf>,
    pub front: bool,
}

/// Camera provider used when no camera source was given
struct NoCamera;

#[async_trait]
impl MediaCapabilityProvider for NoCamera {
    async fn request_stream(
        &self,
        _constraints: &StreamConstraints,
    ) -> BackendResult<Box<dyn MediaStream>> {
        Err(BackendError::DeviceNotFound("no camera source".to_string()))
    }
}

/// Print the message text for the given form
pub fn print_message(form: &FormRecord) {
    println!("{}", SharePayload::from_form(form));
}

/// Compress `input` into a bounded JPEG at `output`
pub fn compress(
    config: &Config,
    input: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let capture = FrameCapture::new(CaptureSettings::from(config), DisplayRegistry::new());

    let rt = tokio::runtime::Runtime::new()?;
    let photo = rt.block_on(capture.capture(CaptureSource::File(&bytes)))?;

    std::fs::write(output, photo.source_bytes())?;
    println!(
        "Saved {}x{} JPEG ({} bytes) to {}",
        photo.width(),
        photo.height(),
        photo.source_bytes().len(),
        output.display()
    );
    Ok(())
}

/// Run the whole share flow once: fill the form, collect photos, dispatch
pub fn share(config: Config, options: ShareOptions) -> Result<(), Box<dyn std::error::Error>> {
    let ShareOptions {
        form,
        phone,
        photos,
        pick,
        camera,
        front,
    } = options;

    if let Some(phone) = phone.as_deref() {
        if !has_phone_digits(phone) {
            warn!(phone = %phone, "Phone number has no digits, using the generic compose link");
        }
    }

    let media: Arc<dyn MediaCapabilityProvider> = match &camera {
        Some(path) => {
            let facing = if front {
                FacingMode::User
            } else {
                FacingMode::Environment
            };
            Arc::new(StillImageCamera::new(path.clone(), facing))
        }
        None => Arc::new(NoCamera),
    };
    let download_dir = config.download_directory();
    let share = Arc::new(DesktopShare::new(download_dir.clone()));

    let mut paths = photos;
    if pick {
        paths.extend(storage::pick_images());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(async move {
        let mut screen = ShareScreen::new(config, media, share);

        for field in FormField::ALL {
            let value = form.get(field).to_string();
            let _ = screen.update(Message::FieldChanged(field, value)).await;
        }
        if let Some(phone) = phone {
            let _ = screen.update(Message::RecipientChanged(phone)).await;
        }

        if camera.is_some() {
            let opened = screen.update(Message::OpenCamera).await.is_ok()
                && screen.update(Message::AwaitCameraReady).await.is_ok();
            if opened {
                let _ = screen.update(Message::Capture).await;
            }
            let _ = screen.update(Message::CloseCamera).await;
        }

        let mut files = Vec::new();
        for (path, result) in storage::read_images(&paths).await {
            match result {
                Ok(bytes) => files.push(bytes),
                Err(e) => warn!(path = %path.display(), error = %e, "Cannot read photo"),
            }
        }
        if !files.is_empty() {
            let _ = screen.update(Message::ImportFiles(files)).await;
        }

        info!(photos = screen.photos().len(), "Dispatching");
        let result = match screen.begin_dispatch() {
            Ok(pending) => {
                let result = pending.run().await;
                screen.complete_dispatch(result)
            }
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            screen.report(e);
        }

        for notice in screen.take_notices() {
            eprintln!("{}", notice.text);
        }
        result
    })?;

    match outcome {
        DispatchOutcome::Native => println!("Shared through the native share sheet"),
        DispatchOutcome::Handoff {
            channel,
            downloaded,
            failed_downloads,
        } => println!(
            "Opened {}; {} photo(s) saved to {} ({} failed)",
            channel,
            downloaded,
            download_dir.display(),
            failed_downloads
        ),
    }
    Ok(())
}
