//! Main app runner for an interactive practice session

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use crate::application::ports::ConfigStore;
use crate::application::EvaluationSessionUseCase;
use crate::domain::analysis::AnalysisReport;
use crate::domain::capture::Modality;
use crate::domain::config::AppConfig;
use crate::domain::scenario::{ScenarioId, ALL_SCENARIOS};
use crate::infrastructure::{CpalCapture, GeminiClient, InertRecognizer, XdgConfigStore};

use super::args::SessionOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Speaking tips, one shown per take
const PRACTICE_TIPS: &[&str] = &[
    "結論から話し始めると伝わりやすくなります",
    "ゆっくり、間を取って話しましょう",
    "語尾まではっきり発音しましょう",
    "「えっと」「あの」を減らすと自信が伝わります",
    "具体例を一つ入れると説得力が上がります",
];

fn practice_tip(take: usize) -> &'static str {
    PRACTICE_TIPS[take % PRACTICE_TIPS.len()]
}

/// Run an interactive practice session: pick a scenario, record, analyze,
/// and render the report. Failed analyses surface an error and offer a
/// fresh take instead of aborting.
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Load API key from config or environment
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // The local capture backend records audio only
    let modality = if options.modality.has_video() {
        presenter.warn("Video capture is not available on this platform, recording audio only");
        Modality::Audio
    } else {
        options.modality
    };

    // Create adapters
    let capture = CpalCapture::new();
    let recognizer = InertRecognizer::new();
    let analyzer = match options.model.as_deref() {
        Some(model) => GeminiClient::with_model(api_key, model),
        None => GeminiClient::new(api_key),
    };

    let session = EvaluationSessionUseCase::new(capture, recognizer, analyzer, options.mode)
        .with_language(options.language.as_str());

    // Bind a scenario, interactively when none was given
    let scenario_id = match options.scenario {
        Some(id) => id,
        None => match pick_scenario(&presenter).await {
            Some(id) => id,
            None => {
                presenter.info("No scenario selected");
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
    };

    if let Err(e) = session.select_scenario(scenario_id).await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let profile = scenario_id.profile();
    presenter.info(&format!("{} - {}", profile.title, profile.description));

    let mut take = 0usize;
    loop {
        // Record one take
        presenter.info(&format!("ヒント: {}", practice_tip(take)));
        take += 1;
        if let Err(e) = session.start_capture(modality).await {
            presenter.error(&e.to_string());
            if let Some(overlay) = session.error_state().await {
                presenter.info(&overlay.detail);
            }
            return ExitCode::from(EXIT_ERROR);
        }

        presenter.start_spinner("Recording... press Enter to stop");
        wait_for_enter_with_ticker(&session, &presenter).await;

        presenter.update_spinner("Analyzing...");
        let result = session.stop_and_analyze().await;
        match result {
            Ok(()) => {
                presenter.spinner_success("Analysis complete");
                break;
            }
            Err(e) => {
                presenter.spinner_fail(&e.to_string());
                if let Some(overlay) = session.error_state().await {
                    presenter.info(&overlay.detail);
                    session.dismiss_error().await;
                }
                if !prompt_retry(&presenter).await {
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
    }

    // Render the report
    match session.report().await {
        Some(AnalysisReport::Media(report)) => {
            presenter.render_media_report(profile, &report);
        }
        Some(AnalysisReport::Transcript(report)) => {
            presenter.render_transcript_report(profile, &report);
        }
        None => {
            presenter.error("Analysis finished without a report");
            return ExitCode::from(EXIT_ERROR);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Print the scenario listing
pub fn list_scenarios(presenter: &Presenter) {
    for id in ALL_SCENARIOS {
        presenter.scenario_entry(id.profile());
    }
}

/// Interactive scenario picker on stdin. Returns `None` on EOF or an
/// unrecognized choice.
async fn pick_scenario(presenter: &Presenter) -> Option<ScenarioId> {
    presenter.info("Select a scenario:");
    for (index, id) in ALL_SCENARIOS.iter().enumerate() {
        let profile = id.profile();
        eprintln!(
            "  {}. {} ({}) - {}",
            index + 1,
            profile.title,
            id.as_str(),
            profile.description
        );
    }
    presenter.output_inline("> ");

    let line = read_stdin_line().await?;
    let choice = line.trim();
    if choice.is_empty() {
        return None;
    }

    // Accept either the listed number or the scenario name
    if let Ok(number) = choice.parse::<usize>() {
        return ALL_SCENARIOS.get(number.checked_sub(1)?).copied();
    }
    choice.parse::<ScenarioId>().ok()
}

/// Wait for Enter while ticking the spinner with elapsed time and folding
/// in any pending recognition events.
async fn wait_for_enter_with_ticker<C, R, A>(
    session: &EvaluationSessionUseCase<C, R, A>,
    presenter: &Presenter,
) where
    C: crate::application::ports::MediaCapture,
    R: crate::application::ports::SpeechRecognizer,
    A: crate::application::ports::AnalysisClient,
{
    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    let stdin = tokio::spawn(read_stdin_line());
    tokio::pin!(stdin);

    loop {
        tokio::select! {
            _ = &mut stdin => break,
            _ = ticker.tick() => {
                session.pump_recognition().await;
                presenter.update_spinner(&format!(
                    "Recording... {} (press Enter to stop)",
                    presenter.format_elapsed(session.elapsed_seconds())
                ));
            }
        }
    }
}

/// Ask whether to record another take after a failed analysis
async fn prompt_retry(presenter: &Presenter) -> bool {
    presenter.output_inline("Record again? [Y/n] ");
    match read_stdin_line().await {
        Some(line) => !matches!(line.trim().to_lowercase().as_str(), "n" | "no" | "q"),
        None => false,
    }
}

/// Read one line from stdin without blocking the runtime
async fn read_stdin_line() -> Option<String> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(_) => None,
        }
    })
    .await
    .ok()
    .flatten()
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.api_key.ok_or_else(|| {
        "Missing API key. Set GEMINI_API_KEY environment variable or run 'talk-advisor config set api_key <key>'".to_string()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        model: env::var("TALK_ADVISOR_MODEL").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
