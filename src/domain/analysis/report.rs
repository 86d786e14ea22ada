//! Analysis report value objects
//!
//! These types mirror the JSON the analysis service is asked to emit, so
//! they derive `Deserialize` directly. A report is immutable once parsed
//! and lives only until the session resets.

use serde::{Deserialize, Serialize};

/// The four named metrics of a media-mode evaluation, each 0-10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub clarity: f64,
    pub confidence: f64,
    pub empathy: f64,
    pub logic: f64,
}

/// Media-mode report: the service scores the uploaded recording directly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEvaluation {
    /// Aggregate score, 0-100
    pub total_score: f64,
    pub metrics: EvaluationMetrics,
    /// Free-text overall feedback
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// The service's own transcription of the recording
    pub transcription: String,
}

/// One scored criterion of a transcript-mode evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub label: String,
    /// 0-10
    pub value: f64,
}

/// One rewrite suggestion with its rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    pub before: String,
    pub after: String,
    pub reason: String,
}

/// Transcript-mode report: the service scores the live transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEvaluation {
    pub scores: Vec<CriterionScore>,
    pub summary: String,
    pub advice: String,
    pub before_after: Vec<RewriteSuggestion>,
}

/// The parsed outcome of one analysis call, whichever mode produced it
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Media(MediaEvaluation),
    Transcript(TranscriptEvaluation),
}

impl AnalysisReport {
    /// Aggregate score when the report carries one (media mode only)
    pub fn total_score(&self) -> Option<f64> {
        match self {
            Self::Media(report) => Some(report.total_score),
            Self::Transcript(_) => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaEvaluation> {
        match self {
            Self::Media(report) => Some(report),
            Self::Transcript(_) => None,
        }
    }

    pub fn as_transcript(&self) -> Option<&TranscriptEvaluation> {
        match self {
            Self::Transcript(report) => Some(report),
            Self::Media(_) => None,
        }
    }
}
