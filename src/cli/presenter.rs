//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::analysis::{MediaEvaluation, TranscriptEvaluation};
use crate::domain::scenario::ScenarioProfile;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format elapsed recording time as m:ss
    pub fn format_elapsed(&self, seconds: u64) -> String {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    /// Format a 0-10 score as a filled bar
    pub fn format_score_bar(&self, value: f64) -> String {
        let clamped = value.clamp(0.0, 10.0);
        let filled = clamped.round() as usize;
        let empty = 10 - filled;
        format!(
            "[{}{}] {:.1}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            clamped
        )
    }

    /// Print one scenario entry (for the scenarios listing)
    pub fn scenario_entry(&self, profile: &ScenarioProfile) {
        println!(
            "{:<14} {} - {}",
            profile.id.as_str().cyan(),
            profile.title,
            profile.description
        );
    }

    /// Render a media-mode evaluation report
    pub fn render_media_report(&self, scenario: &ScenarioProfile, report: &MediaEvaluation) {
        println!();
        println!("{}", format!("=== {} の評価結果 ===", scenario.title).bold());
        println!();
        println!(
            "{} {}",
            "総合スコア:".bold(),
            format!("{:.0} / 100", report.total_score).green().bold()
        );
        println!();
        println!("明瞭さ   {}", self.format_score_bar(report.metrics.clarity));
        println!("自信     {}", self.format_score_bar(report.metrics.confidence));
        println!("共感力   {}", self.format_score_bar(report.metrics.empathy));
        println!("論理性   {}", self.format_score_bar(report.metrics.logic));
        println!();
        println!("{}", "フィードバック".bold());
        println!("{}", report.feedback);
        if !report.strengths.is_empty() {
            println!();
            println!("{}", "良かった点".green().bold());
            for item in &report.strengths {
                println!("  {} {}", "+".green(), item);
            }
        }
        if !report.improvements.is_empty() {
            println!();
            println!("{}", "改善点".yellow().bold());
            for item in &report.improvements {
                println!("  {} {}", "-".yellow(), item);
            }
        }
        if !report.transcription.is_empty() {
            println!();
            println!("{}", "書き起こし".bold());
            println!("{}", report.transcription.dimmed());
        }
    }

    /// Render a transcript-mode evaluation report
    pub fn render_transcript_report(
        &self,
        scenario: &ScenarioProfile,
        report: &TranscriptEvaluation,
    ) {
        println!();
        println!("{}", format!("=== {} の評価結果 ===", scenario.title).bold());
        println!();
        for score in &report.scores {
            println!("{:<12} {}", score.label, self.format_score_bar(score.value));
        }
        println!();
        println!("{}", "要約".bold());
        println!("{}", report.summary);
        println!();
        println!("{}", "アドバイス".bold());
        println!("{}", report.advice);
        if !report.before_after.is_empty() {
            println!();
            println!("{}", "言い換え提案".bold());
            for suggestion in &report.before_after {
                println!("  {} {}", "Before:".red(), suggestion.before);
                println!("  {} {}", "After: ".green(), suggestion.after);
                println!("  {} {}", "理由:  ".dimmed(), suggestion.reason);
                println!();
            }
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_minutes_and_seconds() {
        let presenter = Presenter::new();
        assert_eq!(presenter.format_elapsed(0), "0:00");
        assert_eq!(presenter.format_elapsed(6), "0:06");
        assert_eq!(presenter.format_elapsed(65), "1:05");
        assert_eq!(presenter.format_elapsed(600), "10:00");
    }

    #[test]
    fn score_bar_empty() {
        let presenter = Presenter::new();
        let bar = presenter.format_score_bar(0.0);
        assert!(bar.contains("0.0"));
        assert!(!bar.contains('█'));
    }

    #[test]
    fn score_bar_full() {
        let presenter = Presenter::new();
        let bar = presenter.format_score_bar(10.0);
        assert!(bar.contains("10.0"));
        assert!(!bar.contains('░'));
    }

    #[test]
    fn score_bar_clamps_out_of_range() {
        let presenter = Presenter::new();
        assert!(presenter.format_score_bar(15.0).contains("10.0"));
        assert!(presenter.format_score_bar(-3.0).contains("0.0"));
    }
}
