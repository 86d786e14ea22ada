//! Scenario profile value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidScenarioError;

/// All available scenario IDs
pub const ALL_SCENARIOS: &[ScenarioId] = &[
    ScenarioId::Interview,
    ScenarioId::Presentation,
    ScenarioId::Daily,
    ScenarioId::Trouble,
    ScenarioId::Sales,
    ScenarioId::Debate,
];

/// Scenario identifiers for practice sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenarioId {
    #[default]
    Interview,
    Presentation,
    Daily,
    Trouble,
    Sales,
    Debate,
}

impl ScenarioId {
    /// Get the string identifier for this scenario
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interview => "interview",
            Self::Presentation => "presentation",
            Self::Daily => "daily",
            Self::Trouble => "trouble",
            Self::Sales => "sales",
            Self::Debate => "debate",
        }
    }

    /// Get the immutable profile for this scenario
    pub fn profile(&self) -> &'static ScenarioProfile {
        &SCENARIO_CATALOG[*self as usize]
    }
}

impl FromStr for ScenarioId {
    type Err = InvalidScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interview" => Ok(Self::Interview),
            "presentation" => Ok(Self::Presentation),
            "daily" => Ok(Self::Daily),
            "trouble" => Ok(Self::Trouble),
            "sales" => Ok(Self::Sales),
            "debate" => Ok(Self::Debate),
            _ => Err(InvalidScenarioError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of one practice scenario: what the user rehearses
/// and which criteria the evaluation is framed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioProfile {
    pub id: ScenarioId,
    /// Display title shown to the user
    pub title: &'static str,
    /// One-line description of what this scenario trains
    pub description: &'static str,
    /// Ordered evaluation criteria sent to the analysis service
    pub criteria: [&'static str; 5],
}

/// The scenario catalog. Index order must match the `ScenarioId` discriminants.
static SCENARIO_CATALOG: [ScenarioProfile; 6] = [
    ScenarioProfile {
        id: ScenarioId::Interview,
        title: "面接",
        description: "信頼感と結論先行の話し方を磨く",
        criteria: ["信頼感", "結論先行", "論理性", "敬語", "誠実さ"],
    },
    ScenarioProfile {
        id: ScenarioId::Presentation,
        title: "発表",
        description: "聞き取りやすさと抑揚を意識する",
        criteria: ["聞き取りやすさ", "抑揚", "自信", "構成", "視線"],
    },
    ScenarioProfile {
        id: ScenarioId::Daily,
        title: "日常会話",
        description: "共感力と親しみやすさを高める",
        criteria: ["共感力", "親しみやすさ", "返報性", "表現力", "傾聴"],
    },
    ScenarioProfile {
        id: ScenarioId::Trouble,
        title: "トラブル対応",
        description: "誠実さと正確な語彙で対応する",
        criteria: ["誠実さ", "正確な語彙", "解決志向", "冷静さ", "共感"],
    },
    ScenarioProfile {
        id: ScenarioId::Sales,
        title: "セールス",
        description: "熱意とベネフィットを提示する",
        criteria: ["熱意", "ベネフィット提示", "訴求力", "信頼構築", "ヒアリング"],
    },
    ScenarioProfile {
        id: ScenarioId::Debate,
        title: "議論",
        description: "論理構成と客観性を重視する",
        criteria: ["論理構成", "客観性", "反論力", "根拠", "簡潔さ"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_scenarios() {
        assert_eq!(
            "interview".parse::<ScenarioId>().unwrap(),
            ScenarioId::Interview
        );
        assert_eq!(
            "presentation".parse::<ScenarioId>().unwrap(),
            ScenarioId::Presentation
        );
        assert_eq!("daily".parse::<ScenarioId>().unwrap(), ScenarioId::Daily);
        assert_eq!(
            "trouble".parse::<ScenarioId>().unwrap(),
            ScenarioId::Trouble
        );
        assert_eq!("sales".parse::<ScenarioId>().unwrap(), ScenarioId::Sales);
        assert_eq!("debate".parse::<ScenarioId>().unwrap(), ScenarioId::Debate);
    }

    #[test]
    fn parse_case_insensitive_with_whitespace() {
        assert_eq!(
            " INTERVIEW ".parse::<ScenarioId>().unwrap(),
            ScenarioId::Interview
        );
    }

    #[test]
    fn parse_invalid() {
        assert!("meeting".parse::<ScenarioId>().is_err());
        assert!("".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn profile_lookup_matches_id() {
        for id in ALL_SCENARIOS {
            assert_eq!(id.profile().id, *id);
        }
    }

    #[test]
    fn every_profile_has_five_criteria() {
        for id in ALL_SCENARIOS {
            let profile = id.profile();
            assert_eq!(profile.criteria.len(), 5);
            assert!(profile.criteria.iter().all(|c| !c.is_empty()));
            assert!(!profile.title.is_empty());
            assert!(!profile.description.is_empty());
        }
    }

    #[test]
    fn display() {
        assert_eq!(ScenarioId::Interview.to_string(), "interview");
        assert_eq!(ScenarioId::Debate.to_string(), "debate");
    }

    #[test]
    fn default_is_interview() {
        assert_eq!(ScenarioId::default(), ScenarioId::Interview);
    }
}
