// SPDX-License-Identifier: MPL-2.0

//! Frame normalization for photos
//!
//! This module turns captured pixels into the image that gets encoded:
//! - Drawing a camera frame into a raster of the stream's size
//! - Mirroring to match a mirrored preview
//! - Decoding picked files
//! - Capping the longest edge while keeping the aspect ratio

use crate::backends::camera::CameraFrame;
use crate::errors::CaptureError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use tracing::debug;

/// Draw a camera frame into an RGB raster of the given size
///
/// The frame is scaled if the raster differs from the frame size, and
/// flipped horizontally when `mirror` is set so the photo matches the preview.
pub fn frame_to_raster(
    frame: &CameraFrame,
    raster: (u32, u32),
    mirror: bool,
) -> Result<RgbImage, CaptureError> {
    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec()).ok_or_else(
        || {
            CaptureError::FrameUnavailable(format!(
                "RGBA data too small for {}x{}",
                frame.width, frame.height
            ))
        },
    )?;

    let (raster_w, raster_h) = raster;
    let mut rgba = if (frame.width, frame.height) != (raster_w, raster_h) {
        debug!(
            from = ?(frame.width, frame.height),
            to = ?raster,
            "Scaling frame into raster"
        );
        imageops::resize(&rgba, raster_w, raster_h, FilterType::Triangle)
    } else {
        rgba
    };

    if mirror {
        imageops::flip_horizontal_in_place(&mut rgba);
    }

    Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
}

/// Decode a picked image file
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CaptureError> {
    image::load_from_memory(bytes).map_err(|e| CaptureError::DecodeFailed(e.to_string()))
}

/// Size that fits within `max_edge` on both axes, keeping the aspect ratio
///
/// Sizes already within bounds are returned unchanged.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled = (height as f64 * max_edge as f64 / width as f64).round() as u32;
        (max_edge, scaled.clamp(1, max_edge))
    } else {
        let scaled = (width as f64 * max_edge as f64 / height as f64).round() as u32;
        (scaled.clamp(1, max_edge), max_edge)
    }
}

/// Downscale so that neither edge exceeds `max_edge`
pub fn fit_within(image: RgbImage, max_edge: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let (target_w, target_h) = fit_dimensions(width, height, max_edge);
    if (target_w, target_h) == (width, height) {
        return image;
    }

    debug!(
        from = ?(width, height),
        to = ?(target_w, target_h),
        "Downscaling photo"
    );
    imageops::resize(&image, target_w, target_h, FilterType::Triangle)
}
