//! Text (terminal) reporter with colors and formatting

use super::{bar, ClassificationReport};
use crate::models::{Classification, Priority, StyleProfile};
use crate::summary::DeveloperStyleSummary;
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Classification colors (ANSI escape codes)
fn classification_color(classification: Classification) -> &'static str {
    match classification {
        Classification::Pure => "\x1b[32m",     // Green
        Classification::Hybrid => "\x1b[36m",   // Cyan
        Classification::Balanced => "\x1b[33m", // Yellow
    }
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\x1b[91m[H]\x1b[0m",
        Priority::Medium => "\x1b[33m[M]\x1b[0m",
        Priority::Low => "\x1b[34m[L]\x1b[0m",
    }
}

fn render_profile(out: &mut String, profile: &StyleProfile) {
    let class_c = classification_color(profile.classification);
    out.push_str(&format!(
        "{BOLD}{}{RESET}  {class_c}{BOLD}{}{RESET}  {} ({}%)",
        profile.subject_id,
        profile.classification,
        profile.primary.label(),
        profile.confidence
    ));
    if let (Some(secondary), Some(pct)) = (profile.secondary, profile.secondary_score()) {
        out.push_str(&format!("{DIM}  + {} ({}%){RESET}", secondary.label(), pct));
    }
    out.push('\n');
    out.push_str(&format!(
        "{DIM}  {} messages · profile {}{RESET}\n",
        profile.message_count, profile.profile_id
    ));

    for (category, pct) in &profile.normalized_scores {
        out.push_str(&format!(
            "  {:<22} {} {:>3}%\n",
            category.label(),
            bar(*pct, 20),
            pct
        ));
    }

    for rec in &profile.recommendations {
        out.push_str(&format!("  {} {}\n", priority_tag(rec.priority), rec.text));
    }
    out.push('\n');
}

/// Render a classification run as formatted terminal output
pub fn render_classification(report: &ClassificationReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Interaction Style Profiles{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Lexicon: {}  Dominance: {}%  Hybrid: {}%  Subjects: {}\n\n",
        report.lexicon_version,
        report.thresholds.dominance,
        report.thresholds.hybrid,
        report.profiles.len() + report.skipped.len()
    ));

    for profile in &report.profiles {
        render_profile(&mut out, profile);
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!("{BOLD}NO PROFILE{RESET} ({})\n", report.skipped.len()));
        for s in &report.skipped {
            out.push_str(&format!(
                "  {DIM}{:<24}{RESET} {} messages  {}\n",
                s.subject_id, s.message_count, s.reason
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Render developer summaries as formatted terminal output
pub fn render_summaries(summaries: &[DeveloperStyleSummary]) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Developer Style Summary{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    if summaries.is_empty() {
        out.push_str("No profiles in the selected window.\n");
        return Ok(out);
    }

    for s in summaries {
        out.push_str(&format!(
            "{BOLD}{}{RESET}  {} ({} profiles, {:.0}% stable)\n",
            s.subject_id,
            s.most_frequent_primary.label(),
            s.profile_count,
            s.stability * 100.0
        ));
        out.push_str(&format!(
            "  {DIM}{} → {}{RESET}\n",
            s.first_profile_at.format("%Y-%m-%d"),
            s.last_profile_at.format("%Y-%m-%d")
        ));
        out.push_str(&format!(
            "  Pure: {:.0}%  Hybrid: {:.0}%  Balanced: {:.0}%  Avg confidence: {:.1}%\n",
            s.classification_rates.pure * 100.0,
            s.classification_rates.hybrid * 100.0,
            s.classification_rates.balanced * 100.0,
            s.average_confidence
        ));
        out.push_str(&format!("  Trend: {}\n\n", s.trend));
    }

    Ok(out)
}
