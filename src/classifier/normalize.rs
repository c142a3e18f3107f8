//! Normalizer: raw score vector → whole-percent distribution

use super::aggregate::RawScoreVector;
use crate::models::StyleCategory;
use std::collections::BTreeMap;

/// Percent per category, every category present
pub type NormalizedScores = BTreeMap<StyleCategory, u32>;

/// `round(raw / total * 100)` per category.
///
/// Independent rounding can drift by more than one point when several shares
/// sit near `.5` (e.g. 20.5 × 4 + 18). In that case the categories with the
/// largest rounding error are nudged back one point at a time until the sum is
/// within 100 ± 1.
///
/// A zero total returns all zeros. That is the "insufficient data" boundary,
/// not a balanced profile; the ranker refuses to rank it.
pub fn normalize(raw: &RawScoreVector) -> NormalizedScores {
    let total = raw.total();
    if total <= 0.0 {
        return StyleCategory::all().iter().map(|c| (*c, 0)).collect();
    }

    let exact: Vec<f64> = StyleCategory::all()
        .iter()
        .map(|c| raw.get(*c) * 100.0 / total)
        .collect();
    let mut rounded: Vec<i64> = exact.iter().map(|p| p.round() as i64).collect();

    let mut drift: i64 = rounded.iter().sum::<i64>() - 100;
    while drift.abs() > 1 {
        let step = drift.signum();
        // Category whose rounding moved it furthest in the drift direction
        let mut pick = 0;
        let mut worst = f64::MIN;
        for (i, (r, e)) in rounded.iter().zip(&exact).enumerate() {
            let error = (*r as f64 - e) * step as f64;
            if error > worst {
                worst = error;
                pick = i;
            }
        }
        rounded[pick] -= step;
        drift -= step;
    }

    StyleCategory::all()
        .iter()
        .zip(rounded)
        .map(|(c, p)| (*c, p.max(0) as u32))
        .collect()
}

/// Whether a normalized map carries any signal at all
pub fn has_signal(normalized: &NormalizedScores) -> bool {
    normalized.values().any(|p| *p > 0)
}
