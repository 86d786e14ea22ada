//! Analysis infrastructure module

mod gemini;

pub use gemini::{GeminiClient, DEFAULT_MODEL};
