//! Session state machine core
//!
//! Pure state: no device or network access happens here. The application
//! layer drives the transitions and maps port failures onto the error
//! overlay.

use thiserror::Error;

use crate::domain::analysis::{AnalysisReport, EvaluationMode};
use crate::domain::capture::{LiveTranscript, RecognitionEvent};
use crate::domain::scenario::{ScenarioId, ScenarioProfile};

use super::state::{ErrorState, InvalidPhaseTransition, SessionPhase};

/// Transition failures of the session core
#[derive(Debug, Clone, Error)]
pub enum SessionCoreError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidPhaseTransition),

    /// Transcript-mode validation refused the move to analysis
    #[error("Transcript too short for analysis")]
    InsufficientTranscript,
}

/// One evaluation session from scenario selection to result display.
///
/// Phase machine:
///   SELECTING-SCENARIO -> RECORDING   (select_scenario)
///   RECORDING -> SELECTING-SCENARIO   (back_to_selection)
///   RECORDING -> ANALYZING            (begin_analysis, gated on validation)
///   ANALYZING -> RESULT               (complete_analysis)
///   ANALYZING -> RECORDING            (fail_analysis)
///   any       -> SELECTING-SCENARIO   (reset)
#[derive(Debug, Default)]
pub struct SessionCore {
    phase: SessionPhase,
    mode: EvaluationMode,
    scenario: Option<&'static ScenarioProfile>,
    transcript: LiveTranscript,
    report: Option<AnalysisReport>,
    error: Option<ErrorState>,
}

impl SessionCore {
    pub fn new(mode: EvaluationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    pub fn scenario(&self) -> Option<&'static ScenarioProfile> {
        self.scenario
    }

    pub fn transcript(&self) -> &LiveTranscript {
        &self.transcript
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    /// Overlay an error without changing the phase
    pub fn set_error(&mut self, error: ErrorState) {
        self.error = Some(error);
    }

    /// Dismiss the error overlay
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Bind a scenario and move to the recording phase
    pub fn select_scenario(&mut self, id: ScenarioId) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::SelectingScenario {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "select a scenario",
            }
            .into());
        }
        self.scenario = Some(id.profile());
        self.error = None;
        self.phase = SessionPhase::Recording;
        Ok(())
    }

    /// Leave the recording phase without analyzing
    pub fn back_to_selection(&mut self) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Recording {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "go back to scenario selection",
            }
            .into());
        }
        self.reset();
        Ok(())
    }

    /// Clear per-capture state at the start of a new recording attempt
    pub fn begin_capture(&mut self) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Recording {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "start capture",
            }
            .into());
        }
        self.transcript.clear();
        self.error = None;
        Ok(())
    }

    /// Fold a recognizer event into the live transcript
    pub fn apply_recognition(&mut self, event: &RecognitionEvent) {
        self.transcript.apply(event);
    }

    /// Discard buffered transcript after a cancelled capture. The phase
    /// stays `Recording`; the session is idle and re-recordable.
    pub fn cancel_capture(&mut self) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Recording {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "cancel capture",
            }
            .into());
        }
        self.transcript.clear();
        Ok(())
    }

    /// Gate and perform the move to the analyzing phase.
    ///
    /// In transcript mode a transcript below the significance threshold
    /// refuses the transition and the session stays recordable.
    pub fn begin_analysis(&mut self) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Recording {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "begin analysis",
            }
            .into());
        }
        if self.mode == EvaluationMode::Transcript && !self.transcript.is_sufficient() {
            return Err(SessionCoreError::InsufficientTranscript);
        }
        self.error = None;
        self.phase = SessionPhase::Analyzing;
        Ok(())
    }

    /// Store the parsed report and move to the result phase
    pub fn complete_analysis(&mut self, report: AnalysisReport) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Analyzing {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "complete analysis",
            }
            .into());
        }
        self.report = Some(report);
        self.phase = SessionPhase::Result;
        Ok(())
    }

    /// Return to a re-recordable state after an analysis failure. The
    /// prior transcript is discarded; the user must re-capture.
    pub fn fail_analysis(&mut self, error: ErrorState) -> Result<(), SessionCoreError> {
        if self.phase != SessionPhase::Analyzing {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "fail analysis",
            }
            .into());
        }
        self.transcript.clear();
        self.error = Some(error);
        self.phase = SessionPhase::Recording;
        Ok(())
    }

    /// Full reset from any phase: scenario, transcript, report, and error
    /// are all cleared.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::SelectingScenario;
        self.scenario = None;
        self.transcript.clear();
        self.report = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        EvaluationMetrics, MediaEvaluation, TranscriptEvaluation,
    };
    use crate::domain::capture::SpeechSegment;

    fn media_report(total_score: f64) -> AnalysisReport {
        AnalysisReport::Media(MediaEvaluation {
            total_score,
            metrics: EvaluationMetrics {
                clarity: 8.0,
                confidence: 7.0,
                empathy: 9.0,
                logic: 8.0,
            },
            feedback: "feedback".into(),
            strengths: vec!["s".into()],
            improvements: vec!["i".into()],
            transcription: "t".into(),
        })
    }

    fn finalized(text: &str) -> RecognitionEvent {
        RecognitionEvent {
            result_index: 0,
            results: vec![SpeechSegment::finalized(text)],
        }
    }

    #[test]
    fn new_session_is_selecting() {
        let core = SessionCore::new(EvaluationMode::Media);
        assert_eq!(core.phase(), SessionPhase::SelectingScenario);
        assert!(core.scenario().is_none());
        assert!(core.report().is_none());
        assert!(core.error().is_none());
    }

    #[test]
    fn select_scenario_binds_profile() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Interview).unwrap();
        assert_eq!(core.phase(), SessionPhase::Recording);
        assert_eq!(core.scenario().unwrap().id, ScenarioId::Interview);
    }

    #[test]
    fn select_scenario_outside_selection_fails() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Daily).unwrap();
        assert!(matches!(
            core.select_scenario(ScenarioId::Sales),
            Err(SessionCoreError::InvalidTransition(_))
        ));
    }

    #[test]
    fn transcript_mode_refuses_short_transcript() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("はい"));

        assert!(matches!(
            core.begin_analysis(),
            Err(SessionCoreError::InsufficientTranscript)
        ));
        assert_eq!(core.phase(), SessionPhase::Recording);
    }

    #[test]
    fn transcript_mode_accepts_sufficient_transcript() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("こんにちは、本日はよろしくお願いします"));

        core.begin_analysis().unwrap();
        assert_eq!(core.phase(), SessionPhase::Analyzing);
    }

    #[test]
    fn media_mode_does_not_gate_on_transcript() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();

        core.begin_analysis().unwrap();
        assert_eq!(core.phase(), SessionPhase::Analyzing);
    }

    #[test]
    fn complete_analysis_stores_report() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();
        core.begin_analysis().unwrap();
        core.complete_analysis(media_report(82.0)).unwrap();

        assert_eq!(core.phase(), SessionPhase::Result);
        assert_eq!(core.report().unwrap().total_score(), Some(82.0));
    }

    #[test]
    fn fail_analysis_returns_to_recording_and_discards() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("こんにちは、本日はよろしくお願いします"));
        core.begin_analysis().unwrap();

        core.fail_analysis(ErrorState::new("analysis failed", "try again"))
            .unwrap();
        assert_eq!(core.phase(), SessionPhase::Recording);
        assert!(core.transcript().is_empty());
        assert_eq!(core.error().unwrap().message, "analysis failed");
    }

    #[test]
    fn error_overlay_does_not_change_phase() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.set_error(ErrorState::new("device busy", "close other apps"));
        assert_eq!(core.phase(), SessionPhase::Recording);
        core.clear_error();
        assert!(core.error().is_none());
    }

    #[test]
    fn reset_from_every_phase_clears_everything() {
        // From result
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Interview).unwrap();
        core.begin_capture().unwrap();
        core.begin_analysis().unwrap();
        core.complete_analysis(media_report(50.0)).unwrap();
        core.reset();
        assert_eq!(core.phase(), SessionPhase::SelectingScenario);
        assert!(core.scenario().is_none());
        assert!(core.report().is_none());
        assert!(core.transcript().is_empty());
        assert!(core.error().is_none());

        // From analyzing, with an error overlay set
        let mut core = SessionCore::new(EvaluationMode::Media);
        core.select_scenario(ScenarioId::Sales).unwrap();
        core.begin_capture().unwrap();
        core.begin_analysis().unwrap();
        core.set_error(ErrorState::new("m", "d"));
        core.reset();
        assert_eq!(core.phase(), SessionPhase::SelectingScenario);
        assert!(core.error().is_none());

        // Reset is idempotent
        core.reset();
        assert_eq!(core.phase(), SessionPhase::SelectingScenario);
    }

    #[test]
    fn back_to_selection_only_from_recording() {
        let mut core = SessionCore::new(EvaluationMode::Media);
        assert!(core.back_to_selection().is_err());

        core.select_scenario(ScenarioId::Debate).unwrap();
        core.back_to_selection().unwrap();
        assert_eq!(core.phase(), SessionPhase::SelectingScenario);
        assert!(core.scenario().is_none());
    }

    #[test]
    fn begin_capture_clears_previous_transcript() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Daily).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("前回の発言です"));
        assert!(!core.transcript().is_empty());

        core.begin_capture().unwrap();
        assert!(core.transcript().is_empty());
    }

    #[test]
    fn cancel_capture_discards_transcript_without_leaving_recording() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Trouble).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("途中までの発言"));

        core.cancel_capture().unwrap();
        assert_eq!(core.phase(), SessionPhase::Recording);
        assert!(core.transcript().is_empty());
    }

    #[test]
    fn transcript_report_round_trip() {
        let mut core = SessionCore::new(EvaluationMode::Transcript);
        core.select_scenario(ScenarioId::Daily).unwrap();
        core.begin_capture().unwrap();
        core.apply_recognition(&finalized("こんにちは、今日もいい天気ですね"));
        core.begin_analysis().unwrap();

        let report = AnalysisReport::Transcript(TranscriptEvaluation {
            scores: vec![],
            summary: "要約".into(),
            advice: "アドバイス".into(),
            before_after: vec![],
        });
        core.complete_analysis(report).unwrap();
        assert_eq!(
            core.report().unwrap().as_transcript().unwrap().summary,
            "要約"
        );
    }
}
