// SPDX-License-Identifier: GPL-3.0-only

//! Desktop share channels
//!
//! Desktops have no unified share sheet that carries text and files together,
//! so `can_share` is always false. Deep links go to the system URL handler and
//! downloads land in the download directory.

use super::{ShareCapabilityProvider, ShareError, ShareRequest};
use crate::pipelines::photo::DisplayHandle;
use crate::storage;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Share provider for desktop systems
#[derive(Debug, Clone)]
pub struct DesktopShare {
    download_dir: PathBuf,
}

impl DesktopShare {
    pub fn new(download_dir: PathBuf) -> Self {
        Self { download_dir }
    }
}

#[async_trait]
impl ShareCapabilityProvider for DesktopShare {
    fn can_share(&self, _request: &ShareRequest) -> bool {
        false
    }

    async fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }

    fn open_link(&self, url: &str) -> Result<(), ShareError> {
        match open::that_detached(url) {
            Ok(()) => {
                info!(url = %url, "Opened share link");
                Ok(())
            }
            Err(err) => {
                debug!(url = %url, error = %err, "No handler for share link");
                Err(ShareError::OpenFailed(err.to_string()))
            }
        }
    }

    async fn download(
        &self,
        file_name: &str,
        link: &DisplayHandle,
        bytes: Arc<[u8]>,
    ) -> Result<(), ShareError> {
        let path = storage::write_download(&self.download_dir, file_name, &bytes)
            .await
            .map_err(|e| ShareError::DownloadFailed(e.to_string()))?;
        info!(path = %path.display(), link = %link, "Photo downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::DisplayRegistry;

    #[tokio::test]
    async fn test_native_share_unavailable() {
        let share = DesktopShare::new(PathBuf::from("."));
        let request = ShareRequest {
            text: "x".into(),
            files: Vec::new(),
        };
        assert!(!share.can_share(&request));
        assert_eq!(share.share(&request).await, Err(ShareError::Unsupported));
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let share = DesktopShare::new(dir.path().to_path_buf());
        let bytes: Arc<[u8]> = Arc::from(vec![0xFF, 0xD8, 0xFF]);
        let link = DisplayRegistry::new().create(&bytes);

        share
            .download("foto_1.jpg", &link, Arc::clone(&bytes))
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("foto_1.jpg")).unwrap();
        assert_eq!(written, vec![0xFF, 0xD8, 0xFF]);
    }
}
