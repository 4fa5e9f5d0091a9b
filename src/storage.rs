// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for picked and downloaded photo files

use crate::constants::{IMAGE_EXTENSIONS, is_image_extension};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Write a downloaded photo into `dir`, creating it if needed
///
/// An existing file with the same name is overwritten.
pub async fn write_download(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    debug!(path = %path.display(), size = bytes.len(), "Download written");
    Ok(path)
}

/// Open the native multi-select picker filtered to image files
///
/// Returns an empty list when the dialog is cancelled.
pub fn pick_images() -> Vec<PathBuf> {
    let picked = rfd::FileDialog::new()
        .set_title("Escolher Fotos")
        .add_filter("Imagens", IMAGE_EXTENSIONS)
        .pick_files()
        .unwrap_or_default();
    info!(count = picked.len(), "Files picked");
    picked
}

/// Read picked files, skipping anything that is not an image by extension
///
/// Each entry keeps its path so read failures can be reported per file.
pub async fn read_images(paths: &[PathBuf]) -> Vec<(PathBuf, std::io::Result<Vec<u8>>)> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_image_extension(&ext) {
            warn!(path = %path.display(), "Skipping non-image file");
            continue;
        }
        let result = tokio::fs::read(path).await;
        files.push((path.clone(), result));
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_download_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = write_download(&nested, "foto_1.jpg", b"jpeg").await.unwrap();

        assert_eq!(path, nested.join("foto_1.jpg"));
        assert_eq!(std::fs::read(path).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_read_images_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("a.JPG");
        let text = dir.path().join("notes.txt");
        std::fs::write(&photo, b"x").unwrap();
        std::fs::write(&text, b"y").unwrap();

        let files = read_images(&[photo.clone(), text]).await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, photo);
        assert_eq!(files[0].1.as_ref().unwrap(), b"x");
    }
}
