//! Output reporters for stylecoach results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON (input for `stylecoach report`)
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::classifier::{StyleClassifier, StyleThresholds, SubjectOutcome};
use crate::models::StyleProfile;
use crate::summary::DeveloperStyleSummary;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// A subject that produced no profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSubject {
    pub subject_id: String,
    pub message_count: usize,
    pub insufficient_data: bool,
    pub reason: String,
}

/// Result of one `classify` run across all subjects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub lexicon_version: String,
    pub thresholds: StyleThresholds,
    pub profiles: Vec<StyleProfile>,
    pub skipped: Vec<SkippedSubject>,
}

impl ClassificationReport {
    pub fn from_outcomes(classifier: &StyleClassifier, outcomes: Vec<SubjectOutcome>) -> Self {
        let mut profiles = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(profile) => profiles.push(profile),
                Err(e) => skipped.push(SkippedSubject {
                    subject_id: outcome.subject_id,
                    message_count: outcome.message_count,
                    insufficient_data: e.is_insufficient_data(),
                    reason: e.to_string(),
                }),
            }
        }
        Self {
            lexicon_version: classifier.lexicon().version().to_string(),
            thresholds: *classifier.thresholds(),
            profiles,
            skipped,
        }
    }
}

/// Render a classification report in the specified format
pub fn render_classification(report: &ClassificationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_classification(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render_classification(report),
    }
}

/// Render developer summaries in the specified format
pub fn render_summaries(summaries: &[DeveloperStyleSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_summaries(summaries),
        OutputFormat::Json => json::render(summaries),
        OutputFormat::Markdown => markdown::render_summaries(summaries),
    }
}

/// Percentage bar used by text and markdown output
fn bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
