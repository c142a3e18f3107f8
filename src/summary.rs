//! Aggregate Reporter: roll per-conversation profiles up into a
//! per-developer summary over a time window
//!
//! The reporter only reads finished [`StyleProfile`]s; it never touches raw
//! messages. Longitudinal state lives in the `window` argument and the
//! returned summary, never in the module.

use crate::error::{StyleError, StyleResult};
use crate::models::{Classification, StyleCategory, StyleProfile};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open time range `[start, end)`; a missing bound is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// The `days` days ending at `now` (exclusive of `now` itself).
    ///
    /// A span reaching past the earliest representable date leaves the
    /// start unbounded.
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Self {
        let start = Duration::try_days(i64::from(days)).and_then(|d| now.checked_sub_signed(d));
        Self { start, end: Some(now) }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| at >= s) && self.end.map_or(true, |e| at < e)
    }
}

/// Direction of a developer's primary style over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleTrend {
    /// Fewer than two profiles
    InsufficientHistory,
    /// Older and recent halves agree on the primary style
    Stable,
    /// The recent half's primary style differs from the older half's
    Shifting {
        from: StyleCategory,
        to: StyleCategory,
    },
}

impl std::fmt::Display for StyleTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleTrend::InsufficientHistory => write!(f, "insufficient history"),
            StyleTrend::Stable => write!(f, "stable"),
            StyleTrend::Shifting { from, to } => write!(f, "{} \u{2192} {}", from, to),
        }
    }
}

/// Share of profiles per classification, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationRates {
    pub pure: f64,
    pub hybrid: f64,
    pub balanced: f64,
}

/// Per-developer roll-up of the profiles inside a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperStyleSummary {
    pub subject_id: String,
    pub window: TimeWindow,
    pub profile_count: usize,
    pub most_frequent_primary: StyleCategory,
    pub primary_counts: BTreeMap<StyleCategory, usize>,
    /// Fraction of profiles whose primary equals `most_frequent_primary`
    pub stability: f64,
    pub classification_counts: BTreeMap<Classification, usize>,
    pub classification_rates: ClassificationRates,
    pub average_confidence: f64,
    pub trend: StyleTrend,
    pub first_profile_at: DateTime<Utc>,
    pub last_profile_at: DateTime<Utc>,
}

/// Most frequent primary; ties go to the category declared first
fn mode_primary<'a>(profiles: impl Iterator<Item = &'a StyleProfile>) -> Option<StyleCategory> {
    let mut counts: BTreeMap<StyleCategory, usize> = BTreeMap::new();
    for p in profiles {
        *counts.entry(p.primary).or_default() += 1;
    }
    let mut best: Option<(StyleCategory, usize)> = None;
    for (category, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((category, count));
        }
    }
    best.map(|(c, _)| c)
}

fn trend(ordered: &[&StyleProfile]) -> StyleTrend {
    if ordered.len() < 2 {
        return StyleTrend::InsufficientHistory;
    }
    let (older, recent) = ordered.split_at(ordered.len() / 2);
    match (
        mode_primary(older.iter().copied()),
        mode_primary(recent.iter().copied()),
    ) {
        (Some(from), Some(to)) if from != to => StyleTrend::Shifting { from, to },
        _ => StyleTrend::Stable,
    }
}

/// Summarize one developer's profiles generated inside `window`.
///
/// Profiles belonging to other subjects are ignored. No matching profile
/// fails with [`StyleError::InsufficientData`].
pub fn report(
    subject_id: &str,
    profiles: &[StyleProfile],
    window: TimeWindow,
) -> StyleResult<DeveloperStyleSummary> {
    let mut selected: Vec<&StyleProfile> = profiles
        .iter()
        .filter(|p| p.subject_id == subject_id && window.contains(p.generated_at))
        .collect();

    if selected.is_empty() {
        return Err(StyleError::InsufficientData {
            subject_id: subject_id.to_string(),
        });
    }

    // Oldest first; profile id keeps equal timestamps in a fixed order
    selected.sort_by(|a, b| {
        a.generated_at
            .cmp(&b.generated_at)
            .then_with(|| a.profile_id.cmp(&b.profile_id))
    });

    let total = selected.len();
    let most_frequent_primary = mode_primary(selected.iter().copied()).ok_or_else(|| {
        StyleError::InsufficientData {
            subject_id: subject_id.to_string(),
        }
    })?;

    let mut primary_counts: BTreeMap<StyleCategory, usize> = BTreeMap::new();
    let mut classification_counts: BTreeMap<Classification, usize> = Classification::all()
        .iter()
        .map(|c| (*c, 0))
        .collect();
    let mut confidence_sum = 0.0;
    for p in &selected {
        *primary_counts.entry(p.primary).or_default() += 1;
        *classification_counts.entry(p.classification).or_default() += 1;
        confidence_sum += f64::from(p.confidence);
    }

    let rate = |c: Classification| classification_counts[&c] as f64 / total as f64;
    let classification_rates = ClassificationRates {
        pure: rate(Classification::Pure),
        hybrid: rate(Classification::Hybrid),
        balanced: rate(Classification::Balanced),
    };

    Ok(DeveloperStyleSummary {
        subject_id: subject_id.to_string(),
        window,
        profile_count: total,
        stability: primary_counts[&most_frequent_primary] as f64 / total as f64,
        most_frequent_primary,
        primary_counts,
        classification_counts,
        classification_rates,
        average_confidence: confidence_sum / total as f64,
        trend: trend(&selected),
        first_profile_at: selected[0].generated_at,
        last_profile_at: selected[total - 1].generated_at,
    })
}

/// Summaries for every subject present in `profiles`, ordered by subject id.
///
/// Subjects without profiles in the window are skipped.
pub fn report_all(profiles: &[StyleProfile], window: TimeWindow) -> Vec<DeveloperStyleSummary> {
    let mut subjects: Vec<&str> = profiles.iter().map(|p| p.subject_id.as_str()).collect();
    subjects.sort_unstable();
    subjects.dedup();
    subjects
        .into_iter()
        .filter_map(|s| report(s, profiles, window).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, d, 12, 0, 0).unwrap()
    }

    fn profile(subject: &str, d: u32, primary: StyleCategory, classification: Classification, confidence: u32) -> StyleProfile {
        let mut normalized_scores: BTreeMap<StyleCategory, u32> =
            StyleCategory::all().iter().map(|c| (*c, 0)).collect();
        normalized_scores.insert(primary, confidence);
        StyleProfile {
            profile_id: format!("{}-{}", subject, d),
            subject_id: subject.into(),
            lexicon_version: "v1".into(),
            message_count: 1,
            normalized_scores,
            primary,
            secondary: None,
            confidence,
            classification,
            generated_at: day(d),
            recommendations: vec![],
        }
    }

    use Classification::{Balanced, Hybrid, Pure};
    use StyleCategory::{LearningExplorer, StrategicArchitect, TechnicalImplementer};

    #[test]
    fn test_window_bounds() {
        let w = TimeWindow::between(day(2), day(4));
        assert!(!w.contains(day(1)));
        assert!(w.contains(day(2)));
        assert!(w.contains(day(3)));
        assert!(!w.contains(day(4)));
        assert!(TimeWindow::all().contains(day(1)));
    }

    #[test]
    fn test_last_days() {
        let w = TimeWindow::last_days(7, day(10));
        assert_eq!(w.start, Some(day(3)));
        assert!(w.contains(day(3)));
        assert!(!w.contains(day(10)));
    }

    #[test]
    fn test_last_days_beyond_calendar_is_unbounded() {
        let w = TimeWindow::last_days(200_000_000, day(10));
        assert_eq!(w.start, None);
        assert_eq!(w.end, Some(day(10)));
        assert!(w.contains(day(1)));
    }

    #[test]
    fn test_report_counts_and_rates() {
        let profiles = vec![
            profile("dev", 1, TechnicalImplementer, Pure, 80),
            profile("dev", 2, TechnicalImplementer, Hybrid, 50),
            profile("dev", 3, StrategicArchitect, Pure, 60),
            profile("dev", 4, TechnicalImplementer, Balanced, 30),
            profile("other", 2, LearningExplorer, Pure, 90),
        ];
        let s = report("dev", &profiles, TimeWindow::all()).unwrap();
        assert_eq!(s.profile_count, 4);
        assert_eq!(s.most_frequent_primary, TechnicalImplementer);
        assert_eq!(s.stability, 0.75);
        assert_eq!(s.primary_counts[&StrategicArchitect], 1);
        assert_eq!(s.classification_counts[&Pure], 2);
        assert_eq!(s.classification_rates.pure, 0.5);
        assert_eq!(s.classification_rates.hybrid, 0.25);
        assert_eq!(s.average_confidence, 55.0);
        assert_eq!(s.first_profile_at, day(1));
        assert_eq!(s.last_profile_at, day(4));
    }

    #[test]
    fn test_window_filters_profiles() {
        let profiles = vec![
            profile("dev", 1, TechnicalImplementer, Pure, 80),
            profile("dev", 5, StrategicArchitect, Pure, 80),
        ];
        let s = report("dev", &profiles, TimeWindow::between(day(4), day(6))).unwrap();
        assert_eq!(s.profile_count, 1);
        assert_eq!(s.most_frequent_primary, StrategicArchitect);
        assert_eq!(s.trend, StyleTrend::InsufficientHistory);
    }

    #[test]
    fn test_empty_window_is_insufficient_data() {
        let profiles = vec![profile("dev", 1, TechnicalImplementer, Pure, 80)];
        let err = report("dev", &profiles, TimeWindow::between(day(10), day(20))).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(report("nobody", &profiles, TimeWindow::all()).is_err());
    }

    #[test]
    fn test_trend_shifting() {
        // Input order is irrelevant; profiles are sorted by time
        let profiles = vec![
            profile("dev", 4, StrategicArchitect, Pure, 70),
            profile("dev", 1, LearningExplorer, Pure, 70),
            profile("dev", 3, StrategicArchitect, Pure, 70),
            profile("dev", 2, LearningExplorer, Pure, 70),
        ];
        let s = report("dev", &profiles, TimeWindow::all()).unwrap();
        assert_eq!(
            s.trend,
            StyleTrend::Shifting {
                from: LearningExplorer,
                to: StrategicArchitect
            }
        );
        // Tie between the two: declaration order wins
        assert_eq!(s.most_frequent_primary, StrategicArchitect);
        assert_eq!(s.stability, 0.5);
    }

    #[test]
    fn test_trend_stable() {
        let profiles = vec![
            profile("dev", 1, TechnicalImplementer, Pure, 70),
            profile("dev", 2, TechnicalImplementer, Hybrid, 45),
            profile("dev", 3, TechnicalImplementer, Pure, 70),
        ];
        let s = report("dev", &profiles, TimeWindow::all()).unwrap();
        assert_eq!(s.trend, StyleTrend::Stable);
        assert_eq!(s.trend.to_string(), "stable");
        assert_eq!(s.stability, 1.0);
    }

    #[test]
    fn test_report_all() {
        let profiles = vec![
            profile("bob", 1, TechnicalImplementer, Pure, 80),
            profile("alice", 1, LearningExplorer, Pure, 80),
            profile("bob", 2, TechnicalImplementer, Pure, 80),
        ];
        let all = report_all(&profiles, TimeWindow::all());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].subject_id, "alice");
        assert_eq!(all[1].profile_count, 2);
    }
}
