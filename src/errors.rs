// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo share application
//!
//! Every error here is recoverable. Component errors are converted into a
//! single user-visible notice at the screen boundary (see [`AppError::notice_text`]);
//! the form and the collected photos are never discarded because of them.

use crate::backends::camera::BackendError;
use crate::share::ShareChannel;
use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Camera error: {0}")]
    Acquire(#[from] AcquireError),

    #[error("Photo error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Gallery error: {0}")]
    Index(#[from] IndexError),

    #[error("Share error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The same operation is still pending (double activation)
    #[error("Operation already in progress")]
    Busy,

    /// Dispatch requested with an empty photo collection
    #[error("No photos to share")]
    NothingToShare,

    /// A capture finished after the screen was torn down
    #[error("Screen was torn down")]
    TornDown,
}

impl AppError {
    /// Text of the non-blocking notice shown to the user, if any
    ///
    /// `Busy` and `TornDown` are silent: the first is a duplicate activation,
    /// the second has no screen left to show anything on.
    pub fn notice_text(&self) -> Option<String> {
        let text = match self {
            AppError::Acquire(_) => {
                "Não foi possível acessar a câmera. Use \"Escolher Fotos\" para enviar imagens."
            }
            AppError::Capture(CaptureError::NotReady) => {
                "A câmera ainda está iniciando. Aguarde um momento."
            }
            AppError::Capture(CaptureError::DecodeFailed(_)) => {
                "Não foi possível ler a imagem selecionada."
            }
            AppError::Capture(_) => "Erro ao processar a foto. Tente novamente.",
            AppError::Index(_) => "Foto não encontrada.",
            AppError::Dispatch(_) => "Erro ao compartilhar. Por favor, tente novamente.",
            AppError::NothingToShare => "Adicione pelo menos uma foto antes de compartilhar.",
            AppError::Config(_) => "Erro inesperado. Tente novamente.",
            AppError::Busy | AppError::TornDown => return None,
        };
        Some(text.to_string())
    }
}

/// Camera acquisition errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("no camera device: {0}")]
    NoDevice(String),

    #[error("constraints cannot be satisfied: {0}")]
    ConstraintUnsatisfiable(String),

    #[error("camera unavailable: {0}")]
    Unavailable(String),

    /// Readiness awaited on a session without a live stream
    #[error("camera session is not open")]
    NotOpen,

    /// The device stopped producing frames before the first one was decodable
    #[error("camera stream ended before it became ready")]
    StreamEnded,
}

impl AcquireError {
    /// Human-readable reason attached to the failure
    pub fn reason(&self) -> &str {
        match self {
            AcquireError::PermissionDenied(reason)
            | AcquireError::NoDevice(reason)
            | AcquireError::ConstraintUnsatisfiable(reason)
            | AcquireError::Unavailable(reason) => reason,
            AcquireError::NotOpen => "session not open",
            AcquireError::StreamEnded => "stream ended",
        }
    }
}

impl From<BackendError> for AcquireError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::PermissionDenied(msg) => AcquireError::PermissionDenied(msg),
            BackendError::DeviceNotFound(msg) => AcquireError::NoDevice(msg),
            BackendError::ConstraintUnsatisfiable(msg) => AcquireError::ConstraintUnsatisfiable(msg),
            other => AcquireError::Unavailable(other.to_string()),
        }
    }
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// Stream not open or first frame not decodable yet
    #[error("camera is not ready")]
    NotReady,

    #[error("no frame available: {0}")]
    FrameUnavailable(String),

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Out-of-range removal from the capture collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("photo index {index} out of range (collection has {len})")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Share dispatch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Every channel was attempted and none could be opened
    #[error("no share channel available (tried {tried:?}): {last_error}")]
    NoChannelAvailable {
        tried: Vec<ShareChannel>,
        last_error: String,
    },

    #[error("nothing to share")]
    NothingToShare,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_maps_to_acquire_error() {
        let err: AcquireError = BackendError::PermissionDenied("user said no".into()).into();
        assert_eq!(err, AcquireError::PermissionDenied("user said no".into()));
        assert_eq!(err.reason(), "user said no");

        let err: AcquireError = BackendError::Other("boom".into()).into();
        assert!(matches!(err, AcquireError::Unavailable(_)));
    }

    #[test]
    fn test_busy_and_torn_down_are_silent() {
        assert!(AppError::Busy.notice_text().is_none());
        assert!(AppError::TornDown.notice_text().is_none());
        assert!(AppError::NothingToShare.notice_text().is_some());
    }

    #[test]
    fn test_dispatch_notice_text() {
        let err = AppError::from(DispatchError::NothingToShare);
        assert_eq!(
            err.notice_text().as_deref(),
            Some("Erro ao compartilhar. Por favor, tente novamente.")
        );
    }
}
