//! Report command - per-developer summaries over saved profiles

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::str::FromStr;
use stylecoach::ingest::parse_profiles;
use stylecoach::reporters::{render_summaries, OutputFormat};
use stylecoach::summary::{report, report_all, TimeWindow};

fn parse_time(flag: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("--{} expects an RFC 3339 timestamp, got '{}'", flag, value))
}

/// Build the reporting window from CLI flags
pub(crate) fn window_from_flags(
    days: Option<u32>,
    since: Option<&str>,
    until: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TimeWindow> {
    if let Some(days) = days {
        return Ok(TimeWindow::last_days(days, now));
    }
    let window = TimeWindow {
        start: since.map(|s| parse_time("since", s)).transpose()?,
        end: until.map(|s| parse_time("until", s)).transpose()?,
    };
    if let (Some(start), Some(end)) = (window.start, window.end) {
        if start >= end {
            anyhow::bail!("--since must be earlier than --until");
        }
    }
    Ok(window)
}

pub fn run(
    profiles_path: &Path,
    subject: Option<&str>,
    days: Option<u32>,
    since: Option<&str>,
    until: Option<&str>,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let window = window_from_flags(days, since, until, Utc::now())?;

    let content = std::fs::read_to_string(profiles_path)
        .with_context(|| format!("Failed to read {}", profiles_path.display()))?;
    let profiles = parse_profiles(&content)
        .with_context(|| format!("Failed to parse {}", profiles_path.display()))?;

    let summaries = match subject {
        Some(subject) => vec![report(subject, &profiles, window)?],
        None => report_all(&profiles, window),
    };

    print!("{}", render_summaries(&summaries, format)?);
    Ok(())
}
