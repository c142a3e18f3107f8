//! Core data models for stylecoach
//!
//! These models flow through the whole pipeline: messages come in from the
//! ingestion layer, profiles and recommendations go out to reporters.

use crate::error::{StyleError, StyleResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Generate a deterministic profile ID from the classification inputs.
///
/// The same lexicon version, subject and message set always produce the
/// same 16-character hex ID, so profiles can be deduplicated across runs.
pub fn deterministic_profile_id(lexicon_version: &str, subject_id: &str, message_ids: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(lexicon_version.as_bytes());
    hasher.update(b"\n");
    hasher.update(subject_id.as_bytes());
    for id in message_ids {
        hasher.update(b"\n");
        hasher.update(id.as_bytes());
    }
    format!("{:x}", hasher.finalize())[..16].to_string()
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Assistant, system, tool output, anything that is not the developer
    #[serde(other)]
    Other,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One message of a developer conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(alias = "subjectId")]
    pub subject_id: String,
    /// Missing or null text is tolerated and scores as zero signal
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub role: Role,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            text: text.into(),
            timestamp,
            role: Role::User,
        }
    }
}

/// Interaction style categories.
///
/// Declaration order is the tie-break priority: when two categories hold the
/// same percentage, the one declared first ranks higher.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    /// System design, integration, long-term structure
    StrategicArchitect,
    /// Bugs, errors, concrete code changes
    TechnicalImplementer,
    /// Questions, explanations, concepts
    LearningExplorer,
    /// Speed, MVPs, "just make it work"
    RapidPrototyper,
    /// Ideas, brainstorming, alternatives
    CreativeCollaborator,
}

impl StyleCategory {
    pub fn all() -> &'static [StyleCategory] {
        &[
            StyleCategory::StrategicArchitect,
            StyleCategory::TechnicalImplementer,
            StyleCategory::LearningExplorer,
            StyleCategory::RapidPrototyper,
            StyleCategory::CreativeCollaborator,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleCategory::StrategicArchitect => "strategic_architect",
            StyleCategory::TechnicalImplementer => "technical_implementer",
            StyleCategory::LearningExplorer => "learning_explorer",
            StyleCategory::RapidPrototyper => "rapid_prototyper",
            StyleCategory::CreativeCollaborator => "creative_collaborator",
        }
    }

    /// Human-readable label used in coaching text
    pub fn label(&self) -> &'static str {
        match self {
            StyleCategory::StrategicArchitect => "Strategic Architect",
            StyleCategory::TechnicalImplementer => "Technical Implementer",
            StyleCategory::LearningExplorer => "Learning Explorer",
            StyleCategory::RapidPrototyper => "Rapid Prototyper",
            StyleCategory::CreativeCollaborator => "Creative Collaborator",
        }
    }
}

impl std::fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StyleCategory {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleCategory::all()
            .iter()
            .copied()
            .find(|c| c.name() == s.trim().to_lowercase())
            .ok_or_else(|| {
                StyleError::LexiconConfig(format!(
                    "unknown style category '{}'. Valid categories: {}",
                    s,
                    StyleCategory::all()
                        .iter()
                        .map(|c| c.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Shape of a style profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// One category clears the dominance threshold, no strong runner-up
    Pure,
    /// The runner-up clears the hybrid threshold
    Hybrid,
    /// Evidence exists but is spread evenly
    Balanced,
}

impl Classification {
    pub fn all() -> &'static [Classification] {
        &[Classification::Pure, Classification::Hybrid, Classification::Balanced]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Classification::Pure => "pure",
            Classification::Hybrid => "hybrid",
            Classification::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Classification {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pure" => Ok(Classification::Pure),
            "hybrid" => Ok(Classification::Hybrid),
            "balanced" | "adaptive" => Ok(Classification::Balanced),
            other => Err(StyleError::UnknownClassification(other.to_string())),
        }
    }
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Coaching guidance derived from a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingRecommendation {
    pub subject_id: String,
    /// `profile_id` of the profile this was generated from
    pub profile_ref: String,
    pub category: StyleCategory,
    pub text: String,
    pub priority: Priority,
}

/// Classified interaction style of one subject.
///
/// Never mutated after construction; reclassifying produces a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub profile_id: String,
    pub subject_id: String,
    pub lexicon_version: String,
    pub message_count: usize,
    /// Whole percentages per category, summing to 100 ± 1
    pub normalized_scores: BTreeMap<StyleCategory, u32>,
    pub primary: StyleCategory,
    pub secondary: Option<StyleCategory>,
    /// Percentage held by the primary category
    pub confidence: u32,
    pub classification: Classification,
    /// Timestamp of the latest message in the classified set
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub recommendations: Vec<CoachingRecommendation>,
}

impl StyleProfile {
    /// Percentage held by a category (0 when absent)
    pub fn score(&self, category: StyleCategory) -> u32 {
        self.normalized_scores.get(&category).copied().unwrap_or(0)
    }

    /// Percentage held by the secondary category, if any
    pub fn secondary_score(&self) -> Option<u32> {
        self.secondary.map(|c| self.score(c))
    }

    /// Check the normalization invariant
    pub fn validate(&self) -> StyleResult<()> {
        let sum: u32 = self.normalized_scores.values().sum();
        if !(99..=101).contains(&sum) {
            return Err(StyleError::Invariant(format!(
                "profile {} scores sum to {} (expected 100)",
                self.profile_id, sum
            )));
        }
        Ok(())
    }
}
