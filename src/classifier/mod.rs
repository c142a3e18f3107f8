//! Interaction style classifier
//!
//! Architecture: Lexicon → Extractor → Aggregator → Normalizer → Ranker → Coaching
//!
//! Every stage is a pure function over immutable inputs. The only shared
//! state is the lexicon, held behind an `Arc` and never mutated, so
//! independent subjects can be classified on any number of threads.

pub mod aggregate;
pub mod extractor;
pub mod normalize;
pub mod ranker;
pub mod thresholds;

pub use aggregate::{aggregate, RawScoreVector};
pub use extractor::{extract, extract_text, CategoryScores};
pub use normalize::{normalize, NormalizedScores};
pub use ranker::{rank, Ranking};
pub use thresholds::{StyleThresholds, DEFAULT_DOMINANCE_THRESHOLD, DEFAULT_HYBRID_THRESHOLD};

use crate::coaching::recommend;
use crate::error::{StyleError, StyleResult};
use crate::lexicon::{load_lexicon, Lexicon};
use crate::models::{deterministic_profile_id, Message, StyleProfile};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Classification engine bound to one lexicon and one set of thresholds
#[derive(Debug, Clone)]
pub struct StyleClassifier {
    lexicon: Arc<Lexicon>,
    thresholds: StyleThresholds,
}

/// Outcome of classifying one subject inside a batch
#[derive(Debug, Clone)]
pub struct SubjectOutcome {
    pub subject_id: String,
    pub message_count: usize,
    pub result: StyleResult<StyleProfile>,
}

impl StyleClassifier {
    pub fn new(lexicon: Arc<Lexicon>, thresholds: StyleThresholds) -> StyleResult<Self> {
        thresholds.validate()?;
        Ok(Self { lexicon, thresholds })
    }

    /// Built-in default lexicon with default thresholds
    pub fn with_defaults() -> StyleResult<Self> {
        Self::new(load_lexicon(None)?, StyleThresholds::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn thresholds(&self) -> &StyleThresholds {
        &self.thresholds
    }

    /// Classify the messages of a single subject.
    ///
    /// Empty input and input without any lexicon match fail with
    /// [`StyleError::InsufficientData`]; mixed subjects fail with
    /// [`StyleError::MalformedConversation`].
    pub fn classify(&self, messages: &[Message]) -> StyleResult<StyleProfile> {
        let raw = aggregate(messages, &self.lexicon)?;
        let normalized = normalize(&raw);
        let ranking = rank(&raw.subject_id, &normalized, &self.thresholds)?;

        let message_ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        let generated_at = messages
            .iter()
            .map(|m| m.timestamp)
            .max()
            .ok_or_else(|| StyleError::InsufficientData {
                subject_id: raw.subject_id.clone(),
            })?;

        let mut profile = StyleProfile {
            profile_id: deterministic_profile_id(
                self.lexicon.version(),
                &raw.subject_id,
                &message_ids,
            ),
            subject_id: raw.subject_id,
            lexicon_version: self.lexicon.version().to_string(),
            message_count: messages.len(),
            normalized_scores: normalized,
            primary: ranking.primary,
            secondary: ranking.secondary,
            confidence: ranking.confidence,
            classification: ranking.classification,
            generated_at,
            recommendations: Vec::new(),
        };
        profile.validate()?;
        profile.recommendations = recommend(&profile)?;

        debug!(
            "Classified '{}': {} {} ({}%) over {} messages",
            profile.subject_id,
            profile.classification,
            profile.primary,
            profile.confidence,
            profile.message_count
        );
        Ok(profile)
    }

    /// Classify a mixed stream of messages, one profile per subject.
    ///
    /// Messages keep their relative order inside each subject. Outcomes are
    /// ordered by subject id. A failing subject does not affect the others.
    pub fn classify_batch(&self, messages: Vec<Message>) -> Vec<SubjectOutcome> {
        let mut by_subject: BTreeMap<String, Vec<Message>> = BTreeMap::new();
        for msg in messages {
            by_subject.entry(msg.subject_id.clone()).or_default().push(msg);
        }

        let groups: Vec<(String, Vec<Message>)> = by_subject.into_iter().collect();
        groups
            .par_iter()
            .map(|(subject_id, msgs)| SubjectOutcome {
                subject_id: subject_id.clone(),
                message_count: msgs.len(),
                result: self.classify(msgs),
            })
            .collect()
    }
}

/// Classify one subject's messages with the built-in lexicon and default thresholds
pub fn classify(messages: &[Message]) -> StyleResult<StyleProfile> {
    StyleClassifier::with_defaults()?.classify(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, StyleCategory};
    use chrono::{TimeZone, Utc};

    fn msg(id: &str, subject: &str, text: &str, minute: u32) -> Message {
        Message::new(
            id,
            subject,
            text,
            Utc.with_ymd_and_hms(2026, 3, 1, 10, minute, 0).unwrap(),
        )
    }

    #[test]
    fn test_classify_profile_fields() {
        let messages = vec![
            msg("1", "dev", "How do I fix this bug, the function is broken and throwing an error", 0),
            msg("2", "dev", "", 5),
        ];
        let profile = classify(&messages).unwrap();
        assert_eq!(profile.subject_id, "dev");
        assert_eq!(profile.lexicon_version, "v1");
        assert_eq!(profile.message_count, 2);
        assert_eq!(profile.primary, StyleCategory::TechnicalImplementer);
        assert_eq!(profile.classification, Classification::Pure);
        assert_eq!(profile.generated_at, messages[1].timestamp);
        assert_eq!(profile.recommendations.len(), 1);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_classify_empty_is_insufficient() {
        assert!(classify(&[]).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_batch_isolates_subjects() {
        let classifier = StyleClassifier::with_defaults().unwrap();
        let outcomes = classifier.classify_batch(vec![
            msg("1", "bob", "nothing to see", 0),
            msg("2", "alice", "let's brainstorm some ideas together", 1),
            msg("3", "alice", "what if we imagine an alternative", 2),
        ]);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].subject_id, "alice");
        assert_eq!(outcomes[0].message_count, 2);
        let alice = outcomes[0].result.as_ref().unwrap();
        assert_eq!(alice.primary, StyleCategory::CreativeCollaborator);
        assert_eq!(outcomes[1].subject_id, "bob");
        assert!(outcomes[1].result.as_ref().unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let lexicon = load_lexicon(None).unwrap();
        let bad = StyleThresholds {
            dominance: 140.0,
            hybrid: 25.0,
        };
        assert!(matches!(
            StyleClassifier::new(lexicon, bad),
            Err(StyleError::InvalidConfig(_))
        ));
    }
}
