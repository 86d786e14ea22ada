//! Speech evaluation session use case
//!
//! Orchestrates the capture, recognition, and analysis ports around the
//! session state machine. All device and network failures are caught here
//! and folded into the dismissible error overlay; the session never ends
//! up in an unrecoverable state.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::analysis::{AnalysisReport, EvaluationMode};
use crate::domain::capture::Modality;
use crate::domain::scenario::{ScenarioId, ScenarioProfile};
use crate::domain::session::{
    ErrorState, InvalidPhaseTransition, SessionCore, SessionCoreError, SessionPhase,
};

use super::ports::{
    AnalysisClient, AnalysisError, CaptureError, MediaCapture, SpeechRecognizer,
};

/// Errors from the evaluation session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Not enough speech was captured for analysis")]
    InsufficientInput,

    #[error(transparent)]
    InvalidTransition(#[from] InvalidPhaseTransition),
}

impl From<SessionCoreError> for SessionError {
    fn from(err: SessionCoreError) -> Self {
        match err {
            SessionCoreError::InvalidTransition(e) => Self::InvalidTransition(e),
            SessionCoreError::InsufficientTranscript => Self::InsufficientInput,
        }
    }
}

fn insufficient_input_error_state() -> ErrorState {
    ErrorState::new(
        "The recording was too short.",
        "Speak a little longer; analysis needs more content to work with.",
    )
}

/// One user-visible evaluation session, from scenario selection through
/// the rendered report.
pub struct EvaluationSessionUseCase<C, R, A>
where
    C: MediaCapture,
    R: SpeechRecognizer,
    A: AnalysisClient,
{
    capture: C,
    recognizer: R,
    analyzer: A,
    language: String,
    core: Arc<Mutex<SessionCore>>,
}

impl<C, R, A> EvaluationSessionUseCase<C, R, A>
where
    C: MediaCapture,
    R: SpeechRecognizer,
    A: AnalysisClient,
{
    /// Create a new session in the scenario-selection phase
    pub fn new(capture: C, recognizer: R, analyzer: A, mode: EvaluationMode) -> Self {
        Self {
            capture,
            recognizer,
            analyzer,
            language: "ja-JP".to_string(),
            core: Arc::new(Mutex::new(SessionCore::new(mode))),
        }
    }

    /// Set the BCP-47 recognition language (defaults to "ja-JP")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Get the current phase
    pub async fn phase(&self) -> SessionPhase {
        self.core.lock().await.phase()
    }

    /// Get the current error overlay, if any
    pub async fn error_state(&self) -> Option<ErrorState> {
        self.core.lock().await.error().cloned()
    }

    /// Get the parsed report while in the result phase
    pub async fn report(&self) -> Option<AnalysisReport> {
        self.core.lock().await.report().cloned()
    }

    /// Get the bound scenario profile, if one has been selected
    pub async fn scenario(&self) -> Option<&'static ScenarioProfile> {
        self.core.lock().await.scenario()
    }

    /// Get the accumulated live transcript text
    pub async fn transcript_text(&self) -> String {
        self.core.lock().await.transcript().text().to_string()
    }

    /// Whether a capture session is currently active
    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    /// Elapsed recording time in seconds
    pub fn elapsed_seconds(&self) -> u64 {
        self.capture.elapsed_seconds()
    }

    /// Dismiss the error overlay
    pub async fn dismiss_error(&self) {
        self.core.lock().await.clear_error();
    }

    /// Bind a scenario and move to the recording phase
    pub async fn select_scenario(&self, id: ScenarioId) -> Result<(), SessionError> {
        let mut core = self.core.lock().await;
        core.select_scenario(id)?;
        Ok(())
    }

    /// Return to scenario selection from the recording phase, releasing
    /// any active capture on the way out.
    pub async fn back_to_selection(&self) -> Result<(), SessionError> {
        if self.capture.is_active() {
            self.capture.cancel().await?;
            let _ = self.recognizer.stop().await;
        }
        let mut core = self.core.lock().await;
        core.back_to_selection()?;
        Ok(())
    }

    /// Acquire devices and begin capture plus live recognition.
    /// On failure no session is active and the error overlay is set.
    pub async fn start_capture(&self, modality: Modality) -> Result<(), SessionError> {
        {
            let mut core = self.core.lock().await;

            // Reject before touching core state: the running session's
            // transcript must survive a rejected start.
            if self.capture.is_active() {
                let err = CaptureError::AlreadyActive;
                core.set_error(err.to_error_state());
                return Err(err.into());
            }

            core.begin_capture()?;
        }

        if let Err(err) = self.capture.start(modality).await {
            let mut core = self.core.lock().await;
            core.set_error(err.to_error_state());
            return Err(err.into());
        }

        // Degrades gracefully: without recognition the transcript simply
        // stays empty.
        if self.recognizer.is_available() {
            if let Err(e) = self.recognizer.start(&self.language).await {
                eprintln!("Warning: speech recognition unavailable: {}", e);
            }
        }

        Ok(())
    }

    /// Fold pending recognizer events into the live transcript. Called
    /// periodically by the UI loop while capture is active.
    pub async fn pump_recognition(&self) {
        let events = self.recognizer.drain_events();
        if events.is_empty() {
            return;
        }
        let mut core = self.core.lock().await;
        for event in &events {
            core.apply_recognition(event);
        }
    }

    /// Stop capture, validate, and run analysis.
    ///
    /// No-op when no capture is active. On validation failure the session
    /// stays in `Recording` with an error overlay and no request is sent.
    /// On analysis failure the session returns to `Recording` with an
    /// error overlay; the artifact and transcript are discarded and the
    /// user re-captures to retry.
    pub async fn stop_and_analyze(&self) -> Result<(), SessionError> {
        if !self.capture.is_active() {
            return Ok(());
        }

        let _ = self.recognizer.stop().await;
        self.pump_recognition().await;

        let artifact = match self.capture.stop().await {
            Ok(artifact) => artifact,
            Err(err) => {
                let mut core = self.core.lock().await;
                core.set_error(err.to_error_state());
                return Err(err.into());
            }
        };
        eprintln!("Recording complete ({})", artifact.human_readable_size());

        // Validate and enter the analyzing phase.
        let (mode, scenario, transcript) = {
            let mut core = self.core.lock().await;
            if let Err(err) = core.begin_analysis() {
                if matches!(err, SessionCoreError::InsufficientTranscript) {
                    core.set_error(insufficient_input_error_state());
                }
                return Err(err.into());
            }
            let scenario = match core.scenario() {
                Some(scenario) => scenario,
                None => {
                    // Unreachable through the public API: a scenario is
                    // always bound before the recording phase.
                    return Err(InvalidPhaseTransition {
                        current_phase: core.phase(),
                        action: "analyze without a scenario",
                    }
                    .into());
                }
            };
            (core.mode(), scenario, core.transcript().text().to_string())
        };

        let outcome = match mode {
            EvaluationMode::Media => self
                .analyzer
                .evaluate_media(&artifact, scenario)
                .await
                .map(AnalysisReport::Media),
            EvaluationMode::Transcript => self
                .analyzer
                .evaluate_transcript(&transcript, scenario)
                .await
                .map(AnalysisReport::Transcript),
        };

        let mut core = self.core.lock().await;
        match outcome {
            Ok(report) => {
                core.complete_analysis(report)?;
                Ok(())
            }
            Err(err) => {
                core.fail_analysis(err.to_error_state())?;
                Err(err.into())
            }
        }
    }

    /// Cancel an active capture: releases the device and discards buffered
    /// data, staying in the recording phase.
    pub async fn cancel_capture(&self) -> Result<(), SessionError> {
        if !self.capture.is_active() {
            return Ok(());
        }
        self.capture.cancel().await?;
        let _ = self.recognizer.stop().await;

        let mut core = self.core.lock().await;
        core.cancel_capture()?;
        Ok(())
    }

    /// Full reset to scenario selection from any phase
    pub async fn reset(&self) -> Result<(), SessionError> {
        if self.capture.is_active() {
            self.capture.cancel().await?;
            let _ = self.recognizer.stop().await;
        }
        self.core.lock().await.reset();
        Ok(())
    }
}
