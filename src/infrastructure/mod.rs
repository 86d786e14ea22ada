//! Infrastructure layer - Adapters for external systems
//!
//! Implements the port interfaces defined in the application layer.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod recognition;

// Re-export adapters
pub use analysis::GeminiClient;
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use recognition::InertRecognizer;
