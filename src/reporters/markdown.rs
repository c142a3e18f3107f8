//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for pull request comments, team wikis and coaching notes.

use super::{bar, ClassificationReport};
use crate::models::StyleProfile;
use crate::summary::DeveloperStyleSummary;
use anyhow::Result;

fn render_profile(md: &mut String, profile: &StyleProfile) {
    md.push_str(&format!("## {}\n\n", profile.subject_id));
    md.push_str(&format!(
        "**{}** | Primary: **{}** ({}%)",
        profile.classification,
        profile.primary.label(),
        profile.confidence
    ));
    if let (Some(secondary), Some(pct)) = (profile.secondary, profile.secondary_score()) {
        md.push_str(&format!(" | Secondary: {} ({}%)", secondary.label(), pct));
    }
    md.push_str(&format!(
        "\n\n{} messages, profile `{}`\n\n",
        profile.message_count, profile.profile_id
    ));

    md.push_str("| Style | Share | |\n|-------|------:|---|\n");
    for (category, pct) in &profile.normalized_scores {
        md.push_str(&format!(
            "| {} | {}% | `{}` |\n",
            category.label(),
            pct,
            bar(*pct, 10)
        ));
    }
    md.push('\n');

    if !profile.recommendations.is_empty() {
        md.push_str("### Coaching\n\n");
        for rec in &profile.recommendations {
            md.push_str(&format!("- **{}**: {}\n", rec.priority, rec.text));
        }
        md.push('\n');
    }
}

/// Render a classification run as Markdown
pub fn render_classification(report: &ClassificationReport) -> Result<String> {
    let mut md = String::new();

    md.push_str("# Interaction Style Profiles\n\n");
    md.push_str(&format!(
        "Lexicon `{}` · dominance {}% · hybrid {}%\n\n",
        report.lexicon_version, report.thresholds.dominance, report.thresholds.hybrid
    ));

    for profile in &report.profiles {
        render_profile(&mut md, profile);
    }

    if !report.skipped.is_empty() {
        md.push_str("## No profile\n\n| Subject | Messages | Reason |\n|---------|---------:|--------|\n");
        for s in &report.skipped {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                s.subject_id,
                s.message_count,
                s.reason.replace('|', "\\|")
            ));
        }
        md.push('\n');
    }

    Ok(md)
}

/// Render developer summaries as a Markdown table
pub fn render_summaries(summaries: &[DeveloperStyleSummary]) -> Result<String> {
    let mut md = String::from("# Developer Style Summary\n\n");

    if summaries.is_empty() {
        md.push_str("_No profiles in the selected window._\n");
        return Ok(md);
    }

    md.push_str("| Subject | Profiles | Primary | Stability | Pure | Hybrid | Balanced | Trend |\n");
    md.push_str("|---------|---------:|---------|----------:|-----:|-------:|---------:|-------|\n");
    for s in summaries {
        md.push_str(&format!(
            "| {} | {} | {} | {:.0}% | {:.0}% | {:.0}% | {:.0}% | {} |\n",
            s.subject_id,
            s.profile_count,
            s.most_frequent_primary.label(),
            s.stability * 100.0,
            s.classification_rates.pure * 100.0,
            s.classification_rates.hybrid * 100.0,
            s.classification_rates.balanced * 100.0,
            s.trend
        ));
    }

    Ok(md)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_report, test_summaries};

    #[test]
    fn test_markdown_classification() {
        let md = render_classification(&test_report()).unwrap();
        assert!(md.starts_with("# Interaction Style Profiles"));
        assert!(md.contains("## alice"));
        assert!(md.contains("### Coaching"));
        assert!(md.contains("## No profile"));
        assert!(!md.contains("\x1b["));
    }

    #[test]
    fn test_markdown_summaries_table() {
        let md = render_summaries(&test_summaries()).unwrap();
        assert!(md.contains("| alice | 1 |"));
    }
}
