//! Signal Extractor: one message → weighted per-category match scores

use crate::lexicon::Lexicon;
use crate::models::{Message, StyleCategory};
use std::collections::BTreeMap;
use tracing::warn;

/// Weighted score per category; always holds every category
pub type CategoryScores = BTreeMap<StyleCategory, f64>;

/// All-zero score map
pub fn zero_scores() -> CategoryScores {
    StyleCategory::all().iter().map(|c| (*c, 0.0)).collect()
}

/// Score a single message against the lexicon.
///
/// Empty or whitespace-only text yields all zeros rather than an error, so one
/// bad message cannot abort a corpus run.
pub fn extract(message: &Message, lexicon: &Lexicon) -> CategoryScores {
    if message.text.trim().is_empty() {
        warn!("Message '{}' has no text, scoring as zero signal", message.id);
        return zero_scores();
    }
    extract_text(&message.text, lexicon)
}

/// Score raw text against the lexicon
pub fn extract_text(text: &str, lexicon: &Lexicon) -> CategoryScores {
    let mut scores = zero_scores();
    for (category, rules) in lexicon.iter() {
        let score: f64 = rules
            .iter()
            .map(|rule| rule.count_matches(text) as f64 * rule.weight)
            .sum();
        scores.insert(category, score);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::load_lexicon;
    use chrono::Utc;

    #[test]
    fn test_extract_weights_matches() {
        let lexicon = load_lexicon(None).unwrap();
        // "bug" (2.0) twice, "crash" (2.0) once
        let scores = extract_text("bug here, bug there, it crashed", &lexicon);
        assert_eq!(scores[&StyleCategory::TechnicalImplementer], 6.0);
        assert_eq!(scores[&StyleCategory::RapidPrototyper], 0.0);
    }

    #[test]
    fn test_extract_has_every_category() {
        let lexicon = load_lexicon(None).unwrap();
        let scores = extract_text("nothing relevant", &lexicon);
        assert_eq!(scores.len(), StyleCategory::all().len());
        assert!(scores.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_message_is_zero_signal() {
        let lexicon = load_lexicon(None).unwrap();
        let msg = Message::new("m1", "dev", "   ", Utc::now());
        assert_eq!(extract(&msg, &lexicon), zero_scores());
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let lexicon = load_lexicon(None).unwrap();
        assert_eq!(
            extract_text("BRAINSTORM some IDEAS", &lexicon),
            extract_text("brainstorm some ideas", &lexicon)
        );
    }
}
