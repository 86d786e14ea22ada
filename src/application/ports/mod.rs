//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod analyzer;
pub mod capture;
pub mod config;
pub mod recognizer;

// Re-export common types
pub use analyzer::{AnalysisClient, AnalysisError};
pub use capture::{CaptureError, MediaCapture};
pub use config::ConfigStore;
pub use recognizer::{RecognizerError, SpeechRecognizer};
