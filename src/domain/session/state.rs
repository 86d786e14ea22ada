//! Session phases and error overlay

use std::fmt;
use thiserror::Error;

/// User-visible phases of an evaluation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    SelectingScenario,
    Recording,
    Analyzing,
    Result,
}

impl SessionPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelectingScenario => "selecting-scenario",
            Self::Recording => "recording",
            Self::Analyzing => "analyzing",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dismissible error overlay. It never changes the underlying phase; it is
/// cleared explicitly or by the next user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
    pub detail: String,
}

impl ErrorState {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid session transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: SessionPhase,
    pub action: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_display() {
        assert_eq!(SessionPhase::SelectingScenario.to_string(), "selecting-scenario");
        assert_eq!(SessionPhase::Analyzing.to_string(), "analyzing");
    }

    #[test]
    fn transition_error_names_phase_and_action() {
        let err = InvalidPhaseTransition {
            current_phase: SessionPhase::Result,
            action: "start capture",
        };
        let msg = err.to_string();
        assert!(msg.contains("start capture"));
        assert!(msg.contains("result"));
    }
}
