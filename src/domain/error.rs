//! Domain error types

use thiserror::Error;

/// Error when an invalid scenario ID is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid scenario: \"{input}\". Valid scenarios are: interview, presentation, daily, trouble, sales, debate")]
pub struct InvalidScenarioError {
    pub input: String,
}

/// Error when an invalid evaluation mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid mode: \"{input}\". Valid modes are: media, transcript")]
pub struct InvalidModeError {
    pub input: String,
}

/// Error when an invalid capture modality is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid modality: \"{input}\". Valid modalities are: audio, video")]
pub struct InvalidModalityError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
