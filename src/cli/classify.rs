//! Classify command - profile every developer in a transcript

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::str::FromStr;
use stylecoach::config::StyleConfig;
use stylecoach::ingest::{parse_messages, read_messages, user_messages};
use stylecoach::models::Message;
use stylecoach::reporters::{render_classification, ClassificationReport, OutputFormat};
use tracing::info;

/// Create spinner progress style
fn create_spinner_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")?)
}

fn load_input(input: &Path) -> Result<Vec<Message>> {
    if input.as_os_str() == "-" {
        return read_messages(std::io::stdin().lock()).context("Failed to read transcript from stdin");
    }
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    parse_messages(&content).with_context(|| format!("Failed to parse {}", input.display()))
}

pub fn run(
    config: &StyleConfig,
    input: &Path,
    format: Option<&str>,
    output: Option<&Path>,
    subject: Option<&str>,
    all_roles: bool,
) -> Result<()> {
    let format = OutputFormat::from_str(format.unwrap_or(config.default_format()))?;
    let classifier = config.build_classifier()?;

    let mut messages = load_input(input)?;
    let total = messages.len();
    if !(all_roles || config.all_roles()) {
        messages = user_messages(messages);
    }
    if let Some(subject) = subject {
        messages.retain(|m| m.subject_id == subject);
    }
    info!(
        "Classifying {} of {} messages with lexicon {}",
        messages.len(),
        total,
        classifier.lexicon().version()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style()?);
    spinner.set_message(format!("Classifying {} messages...", messages.len()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let outcomes = classifier.classify_batch(messages);
    spinner.finish_and_clear();

    let report = ClassificationReport::from_outcomes(&classifier, outcomes);
    let rendered = render_classification(&report, format)?;

    match output {
        Some(path) => {
            // Files never carry terminal colors
            let plain = console::strip_ansi_codes(&rendered);
            std::fs::write(path, plain.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} profiles to {}",
                style("✓").green(),
                report.profiles.len(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }

    if report.profiles.is_empty() {
        anyhow::bail!(
            "No subject produced a profile ({} without enough signal)",
            report.skipped.len()
        );
    }
    Ok(())
}
