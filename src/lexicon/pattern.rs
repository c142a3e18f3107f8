//! Pattern syntax → compiled matcher
//!
//! Lexicon patterns are literal words or phrases, not raw regexes, so a
//! lexicon file can never smuggle in catastrophic or surprising expressions.

use crate::error::{StyleError, StyleResult};
use regex::Regex;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Translate a lexicon pattern into a case-insensitive regex.
///
/// - tokens are escaped literally
/// - whitespace between tokens matches `\s+`
/// - a trailing `*` on a token matches `\w*`
/// - `\b` is added on an edge only when the edge character is a word character
pub fn compile_pattern(pattern: &str) -> StyleResult<Regex> {
    let tokens: Vec<&str> = pattern.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(StyleError::LexiconConfig("empty pattern".to_string()));
    }

    let mut parts = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let (stem, wildcard) = match token.strip_suffix('*') {
            Some(stem) => (stem, true),
            None => (*token, false),
        };
        if stem.is_empty() || stem.contains('*') {
            return Err(StyleError::LexiconConfig(format!(
                "pattern '{}': '*' is only allowed as a suffix of a non-empty token",
                pattern
            )));
        }
        let mut part = regex::escape(stem);
        if wildcard {
            part.push_str(r"\w*");
        }
        parts.push(part);
    }

    let first = tokens[0].chars().next();
    let last_token = tokens[tokens.len() - 1];
    let ends_with_wildcard = last_token.ends_with('*');
    let last = last_token.trim_end_matches('*').chars().last();

    let mut expr = String::from("(?i)");
    if first.is_some_and(is_word_char) {
        expr.push_str(r"\b");
    }
    expr.push_str(&parts.join(r"\s+"));
    if !ends_with_wildcard && last.is_some_and(is_word_char) {
        expr.push_str(r"\b");
    }

    Regex::new(&expr).map_err(|e| {
        StyleError::LexiconConfig(format!("pattern '{}' failed to compile: {}", pattern, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(pattern: &str, text: &str) -> usize {
        compile_pattern(pattern).unwrap().find_iter(text).count()
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(count("bug", "a bug and another Bug"), 2);
        assert_eq!(count("bug", "debugging the debugger"), 0);
        assert_eq!(count("fast", "breakfast is fast"), 1);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(count("mvp", "Ship the MVP, then the Mvp v2"), 2);
    }

    #[test]
    fn test_wildcard_suffix() {
        assert_eq!(count("architect*", "the architecture an architect architects"), 3);
        assert_eq!(count("architect*", "rearchitect"), 0);
    }

    #[test]
    fn test_phrase_spans_any_whitespace() {
        assert_eq!(count("how do i", "How   do\tI fix it? how do i"), 2);
        assert_eq!(count("how do i", "how do it"), 0);
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(count("la la", "la la la la"), 2);
    }

    #[test]
    fn test_non_word_edges() {
        assert_eq!(count("c++", "I write c++ and C++."), 2);
        assert_eq!(count("let's", "ok let's go, Let's see"), 2);
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(count("idea*", "Une idée? Ideas, IDEAS, ídea"), 2);
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(compile_pattern("").is_err());
        assert!(compile_pattern("   ").is_err());
        assert!(compile_pattern("*").is_err());
        assert!(compile_pattern("a*b").is_err());
    }
}
