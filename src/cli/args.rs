//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::analysis::EvaluationMode;
use crate::domain::capture::Modality;
use crate::domain::scenario::ScenarioId;

/// TalkAdvisor - AI-powered speech practice and evaluation
#[derive(Parser, Debug)]
#[command(name = "talk-advisor")]
#[command(version = "0.1.0")]
#[command(about = "Practice speaking and get AI-scored feedback using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// Practice scenario (skips the interactive picker)
    #[arg(short = 's', long, value_name = "SCENARIO")]
    pub scenario: Option<ScenarioArg>,

    /// Evaluation mode: upload the recording, or score the live transcript
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Capture modality
    #[arg(short = 'M', long, value_name = "MODALITY")]
    pub modality: Option<ModalityArg>,

    /// Gemini model to use for evaluation
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List available practice scenarios
    Scenarios,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Scenario argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    Interview,
    Presentation,
    Daily,
    Trouble,
    Sales,
    Debate,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Interview => ScenarioId::Interview,
            ScenarioArg::Presentation => ScenarioId::Presentation,
            ScenarioArg::Daily => ScenarioId::Daily,
            ScenarioArg::Trouble => ScenarioId::Trouble,
            ScenarioArg::Sales => ScenarioId::Sales,
            ScenarioArg::Debate => ScenarioId::Debate,
        }
    }
}

/// Evaluation mode argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Media,
    Transcript,
}

impl From<ModeArg> for EvaluationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Media => EvaluationMode::Media,
            ModeArg::Transcript => EvaluationMode::Transcript,
        }
    }
}

/// Capture modality argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModalityArg {
    Audio,
    Video,
}

impl From<ModalityArg> for Modality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Audio => Modality::Audio,
            ModalityArg::Video => Modality::AudioVideo,
        }
    }
}

/// Parsed session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub scenario: Option<ScenarioId>,
    pub mode: EvaluationMode,
    pub modality: Modality,
    pub model: Option<String>,
    pub language: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "model",
    "mode",
    "modality",
    "scenario",
    "language",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["talk-advisor"]);
        assert!(cli.scenario.is_none());
        assert!(cli.mode.is_none());
        assert!(cli.modality.is_none());
        assert!(cli.model.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_scenario() {
        let cli = Cli::parse_from(["talk-advisor", "-s", "sales"]);
        assert_eq!(cli.scenario, Some(ScenarioArg::Sales));
    }

    #[test]
    fn cli_parses_mode_and_modality() {
        let cli = Cli::parse_from(["talk-advisor", "-m", "transcript", "-M", "video"]);
        assert_eq!(cli.mode, Some(ModeArg::Transcript));
        assert_eq!(cli.modality, Some(ModalityArg::Video));
    }

    #[test]
    fn cli_parses_model() {
        let cli = Cli::parse_from(["talk-advisor", "--model", "gemini-2.0-flash"]);
        assert_eq!(cli.model, Some("gemini-2.0-flash".to_string()));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["talk-advisor", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["talk-advisor", "config", "set", "scenario", "debate"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "scenario");
            assert_eq!(value, "debate");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_scenarios_listing() {
        let cli = Cli::parse_from(["talk-advisor", "scenarios"]);
        assert!(matches!(cli.command, Some(Commands::Scenarios)));
    }

    #[test]
    fn scenario_arg_converts_to_scenario_id() {
        assert_eq!(ScenarioId::from(ScenarioArg::Interview), ScenarioId::Interview);
        assert_eq!(ScenarioId::from(ScenarioArg::Debate), ScenarioId::Debate);
    }

    #[test]
    fn mode_and_modality_args_convert() {
        assert_eq!(EvaluationMode::from(ModeArg::Media), EvaluationMode::Media);
        assert_eq!(Modality::from(ModalityArg::Video), Modality::AudioVideo);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("api_key"));
        assert!(is_valid_config_key("mode"));
        assert!(is_valid_config_key("scenario"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
