//! Style Ranker: order a distribution and classify its shape

use super::normalize::{has_signal, NormalizedScores};
use super::thresholds::StyleThresholds;
use crate::error::{StyleError, StyleResult};
use crate::models::{Classification, StyleCategory};

/// Result of ranking a normalized distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Categories by percent descending, ties in declaration order
    pub ordered: Vec<(StyleCategory, u32)>,
    pub primary: StyleCategory,
    /// Runner-up, `None` when it holds 0%
    pub secondary: Option<StyleCategory>,
    pub classification: Classification,
    /// Primary percentage
    pub confidence: u32,
}

/// Rank a distribution.
///
/// Fails with [`StyleError::InsufficientData`] on an all-zero distribution
/// instead of reporting it as balanced.
pub fn rank(
    subject_id: &str,
    normalized: &NormalizedScores,
    thresholds: &StyleThresholds,
) -> StyleResult<Ranking> {
    if !has_signal(normalized) {
        return Err(StyleError::InsufficientData {
            subject_id: subject_id.to_string(),
        });
    }

    // BTreeMap iterates in declaration order; the stable sort keeps it on ties.
    let mut ordered: Vec<(StyleCategory, u32)> =
        normalized.iter().map(|(c, p)| (*c, *p)).collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let (primary, confidence) = ordered[0];
    let secondary = ordered.get(1).filter(|(_, p)| *p > 0).copied();

    let classification = match secondary {
        Some((_, pct)) if thresholds.is_hybrid(pct) => Classification::Hybrid,
        _ if thresholds.is_dominant(confidence) => Classification::Pure,
        _ => Classification::Balanced,
    };

    Ok(Ranking {
        ordered,
        primary,
        secondary: secondary.map(|(c, _)| c),
        classification,
        confidence,
    })
}
