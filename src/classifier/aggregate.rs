//! Score Aggregator: sum per-message scores into one raw vector per subject

use super::extractor::{extract, zero_scores, CategoryScores};
use crate::error::{StyleError, StyleResult};
use crate::lexicon::Lexicon;
use crate::models::{Message, StyleCategory};
use rayon::prelude::*;
use serde::Serialize;

/// Unnormalized weighted scores for one subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawScoreVector {
    /// Empty when the vector was built from zero messages
    pub subject_id: String,
    pub scores: CategoryScores,
}

impl RawScoreVector {
    pub fn empty(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            scores: zero_scores(),
        }
    }

    pub fn get(&self, category: StyleCategory) -> f64 {
        self.scores.get(&category).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    fn add(&mut self, other: &CategoryScores) {
        for (category, value) in other {
            *self.scores.entry(*category).or_insert(0.0) += value;
        }
    }
}

/// Check that every message names the same non-empty subject and carries an id
pub fn common_subject(messages: &[Message]) -> StyleResult<Option<&str>> {
    let Some(first) = messages.first() else {
        return Ok(None);
    };

    for msg in messages {
        if msg.id.trim().is_empty() {
            return Err(StyleError::MalformedConversation(format!(
                "message without id in subject '{}'",
                msg.subject_id
            )));
        }
        if msg.subject_id.trim().is_empty() {
            return Err(StyleError::MalformedConversation(format!(
                "message '{}' has no subject id",
                msg.id
            )));
        }
        if msg.subject_id != first.subject_id {
            return Err(StyleError::MalformedConversation(format!(
                "messages mix subjects '{}' and '{}'",
                first.subject_id, msg.subject_id
            )));
        }
    }

    Ok(Some(first.subject_id.as_str()))
}

/// Aggregate all messages of one subject.
///
/// Extraction runs in parallel; the reduction walks results in input order,
/// so the floating-point sum is identical on every run.
pub fn aggregate(messages: &[Message], lexicon: &Lexicon) -> StyleResult<RawScoreVector> {
    let subject_id = common_subject(messages)?.unwrap_or_default().to_string();

    let per_message: Vec<CategoryScores> = messages
        .par_iter()
        .map(|msg| extract(msg, lexicon))
        .collect();

    let mut raw = RawScoreVector::empty(subject_id);
    for scores in &per_message {
        raw.add(scores);
    }
    Ok(raw)
}
