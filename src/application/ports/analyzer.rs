//! Analysis client port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::{MediaEvaluation, TranscriptEvaluation};
use crate::domain::capture::RecordedArtifact;
use crate::domain::scenario::ScenarioProfile;
use crate::domain::session::ErrorState;

/// Analysis errors
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Analysis request failed with HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Could not reach the analysis service: {0}")]
    Transport(String),

    #[error("The analysis service returned no text")]
    EmptyResponse,

    #[error("Failed to parse the analysis response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Map to the dismissible message/detail pair shown to the user
    pub fn to_error_state(&self) -> ErrorState {
        match self {
            Self::InvalidApiKey => ErrorState::new(
                "The analysis service rejected the API key.",
                "Check GEMINI_API_KEY or run 'talk-advisor config set api_key <key>'.",
            ),
            Self::RateLimited => ErrorState::new(
                "The analysis service is rate limiting requests.",
                "Wait a moment before recording again.",
            ),
            Self::RequestFailed { .. } | Self::Transport(_) => ErrorState::new(
                "The analysis request failed.",
                "Communication with the AI service failed. Record again to retry.",
            ),
            Self::EmptyResponse | Self::MalformedResponse(_) => ErrorState::new(
                "The analysis response could not be read.",
                "The AI service returned an unusable answer. Record again to retry.",
            ),
        }
    }
}

/// Port for the remote evaluation service.
///
/// No retry/backoff lives here: one failed attempt surfaces immediately
/// and the session returns to a re-recordable state.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Evaluate an uploaded recording against a scenario
    async fn evaluate_media(
        &self,
        artifact: &RecordedArtifact,
        scenario: &ScenarioProfile,
    ) -> Result<MediaEvaluation, AnalysisError>;

    /// Evaluate a live transcript against a scenario and its criteria
    async fn evaluate_transcript(
        &self,
        transcript: &str,
        scenario: &ScenarioProfile,
    ) -> Result<TranscriptEvaluation, AnalysisError>;
}
