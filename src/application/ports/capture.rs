//! Media capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::{Modality, RecordedArtifact};
use crate::domain::session::ErrorState;

/// Capture acquisition and recording errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Device access denied: {0}")]
    PermissionDenied(String),

    #[error("No capture device found")]
    DeviceNotFound,

    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("A capture session is already active")]
    AlreadyActive,

    #[error("No capture session is active")]
    NotActive,

    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

impl CaptureError {
    /// Map to the dismissible message/detail pair shown to the user
    pub fn to_error_state(&self) -> ErrorState {
        match self {
            Self::PermissionDenied(_) => ErrorState::new(
                "Camera or microphone access was denied.",
                "Grant the device permission in your system settings, then try again.",
            ),
            Self::DeviceNotFound => ErrorState::new(
                "No camera or microphone was found.",
                "Check that a capture device is connected and recognized.",
            ),
            Self::DeviceUnavailable(_) => ErrorState::new(
                "The capture device is busy.",
                "Close other applications that may be using the camera or microphone.",
            ),
            Self::AlreadyActive => ErrorState::new(
                "A recording is already in progress.",
                "Stop or cancel the current recording before starting a new one.",
            ),
            Self::NotActive | Self::CaptureFailed(_) => ErrorState::new(
                "Recording failed.",
                "Something went wrong while capturing. Please try again.",
            ),
        }
    }
}

/// Port for exclusive device capture.
///
/// Implementations own the device stream while active and must release it
/// exactly once on every exit path (stop, cancel, error, drop).
#[async_trait]
pub trait MediaCapture: Send + Sync {
    /// Acquire devices for the modality and begin buffering encoded data.
    /// On failure no session is considered active.
    async fn start(&self, modality: Modality) -> Result<(), CaptureError>;

    /// Finalize buffered chunks into one artifact and release the device.
    async fn stop(&self) -> Result<RecordedArtifact, CaptureError>;

    /// Release the device and discard buffered data without an artifact.
    async fn cancel(&self) -> Result<(), CaptureError>;

    /// Whether a capture session is currently active
    fn is_active(&self) -> bool;

    /// Elapsed recording time in whole seconds, ticking while active
    fn elapsed_seconds(&self) -> u64;
}
