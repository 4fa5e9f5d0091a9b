// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Header line of the shared message (bold in WhatsApp markup)
pub const MESSAGE_HEADER: &str = "*Dados do Formulário:*";

/// Frame size used when the stream cannot report its native resolution
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Resolution hint sent with every camera request
pub const IDEAL_FRAME_WIDTH: u32 = 1280;
pub const IDEAL_FRAME_HEIGHT: u32 = 720;

/// Longest edge allowed for a compressed photo
pub const MAX_PHOTO_EDGE: u32 = 1024;

/// JPEG quality (0-100) used for every saved photo
pub const JPEG_QUALITY: u8 = 80;

/// Delay before the download fallback starts, so the messaging app can take focus first
pub const DOWNLOAD_DELAY: Duration = Duration::from_millis(1000);

/// MIME type of every photo handed to a share channel
pub const PHOTO_MIME: &str = "image/jpeg";

/// Prefix of transient preview handles
pub const DISPLAY_HANDLE_SCHEME: &str = "blob:photo-share";

/// Extensions accepted by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Deep link bases
pub mod links {
    /// Direct conversation with a phone number: `<base><digits>?text=...`
    pub const DIRECT_BASE: &str = "https://wa.me/";
    /// Generic compose screen, recipient chosen inside the app
    pub const COMPOSE_BASE: &str = "whatsapp://send";
    /// Android intent form, only tried when the primary link fails to open
    pub const INTENT_BASE: &str = "intent://send";
    pub const INTENT_SUFFIX: &str = "#Intent;scheme=whatsapp;package=com.whatsapp;end";
}

/// File name used by the download fallback (`index` is 0-based)
pub fn download_file_name(index: usize) -> String {
    format!("foto_{}.jpg", index + 1)
}

/// Check whether a file extension is one the picker accepts
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}
