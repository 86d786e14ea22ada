//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::analysis::EvaluationMode;
use crate::domain::capture::Modality;
use crate::domain::scenario::ScenarioId;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub mode: Option<String>,
    pub modality: Option<String>,
    pub scenario: Option<String>,
    pub language: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: None,
            mode: Some("media".to_string()),
            modality: Some("audio".to_string()),
            scenario: None,
            language: Some("ja-JP".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            mode: other.mode.or(self.mode),
            modality: other.modality.or(self.modality),
            scenario: other.scenario.or(self.scenario),
            language: other.language.or(self.language),
        }
    }

    /// Get mode as parsed EvaluationMode, or default if not set/invalid
    pub fn mode_or_default(&self) -> EvaluationMode {
        self.mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get modality as parsed Modality, or default if not set/invalid
    pub fn modality_or_default(&self) -> Modality {
        self.modality
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get scenario as parsed ScenarioId, if set and valid
    pub fn scenario_id(&self) -> Option<ScenarioId> {
        self.scenario.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get recognition language, or "ja-JP" if not set
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or("ja-JP")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.mode, Some("media".to_string()));
        assert_eq!(config.modality, Some("audio".to_string()));
        assert_eq!(config.language, Some("ja-JP".to_string()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.mode.is_none());
        assert!(config.modality.is_none());
        assert!(config.scenario.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            mode: Some("media".to_string()),
            ..Default::default()
        };
        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            mode: None,
            scenario: Some("sales".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.mode, Some("media".to_string()));
        assert_eq!(merged.scenario, Some("sales".to_string()));
    }

    #[test]
    fn parsed_accessors_fall_back_on_invalid_values() {
        let config = AppConfig {
            mode: Some("nonsense".to_string()),
            modality: Some("hologram".to_string()),
            scenario: Some("unknown".to_string()),
            ..Default::default()
        };
        assert_eq!(config.mode_or_default(), EvaluationMode::Media);
        assert_eq!(config.modality_or_default(), Modality::Audio);
        assert!(config.scenario_id().is_none());
    }

    #[test]
    fn parsed_accessors_read_valid_values() {
        let config = AppConfig {
            mode: Some("transcript".to_string()),
            modality: Some("video".to_string()),
            scenario: Some("interview".to_string()),
            ..Default::default()
        };
        assert_eq!(config.mode_or_default(), EvaluationMode::Transcript);
        assert_eq!(config.modality_or_default(), Modality::AudioVideo);
        assert_eq!(config.scenario_id(), Some(ScenarioId::Interview));
    }
}
