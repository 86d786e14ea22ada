//! Speech recognition port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::RecognitionEvent;

/// Recognition errors
#[derive(Debug, Clone, Error)]
pub enum RecognizerError {
    #[error("Speech recognition failed: {0}")]
    RecognitionFailed(String),
}

/// Port for continuous speech-to-text.
///
/// `start`/`stop` are idempotent: starting an already-started recognizer
/// or stopping an already-stopped one is logged by the adapter and
/// swallowed, never surfaced to the caller.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform exposes continuous recognition at all.
    /// When false, the recognizer is inert and produces no events.
    fn is_available(&self) -> bool;

    /// Begin continuous, interim-enabled recognition in the given
    /// BCP-47 language (e.g. "ja-JP")
    async fn start(&self, language: &str) -> Result<(), RecognizerError>;

    /// Stop recognition
    async fn stop(&self) -> Result<(), RecognizerError>;

    /// Drain events accumulated since the last call, in arrival order
    fn drain_events(&self) -> Vec<RecognitionEvent>;
}
