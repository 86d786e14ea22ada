//! Evaluation mode value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidModeError;

/// Which input the analysis service evaluates.
///
/// `Media` uploads the recorded artifact inline and asks for a
/// schema-constrained response; `Transcript` embeds the live transcript in
/// the prompt and parses free-form JSON out of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluationMode {
    #[default]
    Media,
    Transcript,
}

impl EvaluationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Transcript => "transcript",
        }
    }
}

impl FromStr for EvaluationMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "media" => Ok(Self::Media),
            "transcript" => Ok(Self::Transcript),
            _ => Err(InvalidModeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
