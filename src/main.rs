//! TalkAdvisor CLI entry point

use std::process::ExitCode;

use clap::Parser;

use talk_advisor::cli::{
    app::{list_scenarios, load_merged_config, run_session, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    SessionOptions,
};
use talk_advisor::domain::analysis::EvaluationMode;
use talk_advisor::domain::capture::Modality;
use talk_advisor::domain::config::AppConfig;
use talk_advisor::domain::scenario::ScenarioId;
use talk_advisor::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Scenarios) => {
            list_scenarios(&presenter);
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        model: cli.model.clone(),
        mode: cli.mode.map(|m| EvaluationMode::from(m).to_string()),
        modality: cli.modality.map(|m| Modality::from(m).to_string()),
        scenario: cli.scenario.map(|s| ScenarioId::from(s).to_string()),
        language: None,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = SessionOptions {
        scenario: config.scenario_id(),
        mode: config.mode_or_default(),
        modality: config.modality_or_default(),
        model: config.model.clone(),
        language: config.language_or_default().to_string(),
    };

    run_session(options).await
}
