//! Error taxonomy for the classification pipeline
//!
//! Per-message problems never surface here: the extractor degrades a bad
//! message to zero signal. Everything below is fatal for the call that
//! raised it and is returned to the caller as a typed result.

use thiserror::Error;

/// Errors raised by lexicon loading, classification and reporting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// Malformed static configuration. Aborts all classification.
    #[error("Invalid lexicon: {0}")]
    LexiconConfig(String),

    /// Input messages mix subjects or omit required fields
    #[error("Malformed conversation: {0}")]
    MalformedConversation(String),

    /// Zero aggregate signal; no profile can be produced
    #[error("Insufficient data for subject '{subject_id}': no lexicon pattern matched")]
    InsufficientData { subject_id: String },

    /// Internal invariant violation in the coaching rule table
    #[error("Unknown classification: {0}")]
    UnknownClassification(String),

    /// A pipeline stage produced output that breaks its own contract
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    /// Threshold or engine option out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type StyleResult<T> = Result<T, StyleError>;

impl StyleError {
    /// True when the error means "no evidence" rather than bad input
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, StyleError::InsufficientData { .. })
    }
}
