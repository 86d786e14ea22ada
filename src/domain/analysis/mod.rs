//! Analysis domain module

mod mode;
mod prompt;
mod report;

pub use mode::EvaluationMode;
pub use prompt::AnalysisPrompt;
pub use report::{
    AnalysisReport, CriterionScore, EvaluationMetrics, MediaEvaluation, RewriteSuggestion,
    TranscriptEvaluation,
};
