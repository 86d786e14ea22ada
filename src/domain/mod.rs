//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod scenario;
pub mod session;

// Re-export common types
pub use analysis::{AnalysisPrompt, AnalysisReport, EvaluationMode};
pub use capture::{LiveTranscript, MediaMimeType, Modality, RecordedArtifact};
pub use config::AppConfig;
pub use error::*;
pub use scenario::{ScenarioId, ScenarioProfile};
pub use session::{ErrorState, SessionCore, SessionPhase};
