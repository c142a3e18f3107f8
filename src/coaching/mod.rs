//! Recommendation Generator
//!
//! Maps a ranked profile to coaching guidance through a static rule table
//! keyed by `(category, classification)`. Templates use `{label}`,
//! `{confidence}`, `{secondary}` and `{secondary_pct}` placeholders.

use crate::error::{StyleError, StyleResult};
use crate::models::{Classification, CoachingRecommendation, Priority, StyleCategory, StyleProfile};

/// Confidence at or above which the primary recommendation is high priority
pub const STRONG_CONFIDENCE: u32 = 70;
/// Confidence at or above which the primary recommendation is medium priority
pub const MODERATE_CONFIDENCE: u32 = 40;

struct GuidanceRule {
    category: StyleCategory,
    classification: Classification,
    template: &'static str,
}

use Classification::{Balanced, Hybrid, Pure};
use StyleCategory::{
    CreativeCollaborator, LearningExplorer, RapidPrototyper, StrategicArchitect,
    TechnicalImplementer,
};

const PRIMARY_RULES: &[GuidanceRule] = &[
    GuidanceRule {
        category: StrategicArchitect,
        classification: Pure,
        template: "{label} ({confidence}%): you frame work at the system level. Anchor each design \
discussion with one concrete acceptance test so the architecture gets validated in code early.",
    },
    GuidanceRule {
        category: StrategicArchitect,
        classification: Hybrid,
        template: "{label} ({confidence}%) with {secondary} ({secondary_pct}%): you move between design \
and delivery. State which mode a conversation is in up front so the assistant matches the depth you need.",
    },
    GuidanceRule {
        category: StrategicArchitect,
        classification: Balanced,
        template: "{label} leads at {confidence}% in an adaptive profile. Capture the design decisions \
you reach in short ADR-style notes so they survive past the conversation.",
    },
    GuidanceRule {
        category: TechnicalImplementer,
        classification: Pure,
        template: "{label} ({confidence}%): you drive conversations through concrete code and errors. \
Include the exact error output and a minimal reproduction up front to shorten fix cycles, and \
periodically step back to ask how a fix affects the wider design.",
    },
    GuidanceRule {
        category: TechnicalImplementer,
        classification: Hybrid,
        template: "{label} ({confidence}%) with {secondary} ({secondary_pct}%): pair each fix request \
with the context it belongs to, so solutions stay consistent with the direction you are exploring.",
    },
    GuidanceRule {
        category: TechnicalImplementer,
        classification: Balanced,
        template: "{label} leads at {confidence}% in an adaptive profile. Keep sharing stack traces \
and code snippets; they are the strongest signal you give.",
    },
    GuidanceRule {
        category: LearningExplorer,
        classification: Pure,
        template: "{label} ({confidence}%): you learn by asking. After an explanation, ask for a small \
exercise or a counter-example to check your understanding before moving on.",
    },
    GuidanceRule {
        category: LearningExplorer,
        classification: Hybrid,
        template: "{label} ({confidence}%) with {secondary} ({secondary_pct}%): turn the concepts you \
explore into a working snippet in the same session to lock them in.",
    },
    GuidanceRule {
        category: LearningExplorer,
        classification: Balanced,
        template: "{label} leads at {confidence}% in an adaptive profile. Ask \"why\" as well as \"how\" \
when a solution surprises you.",
    },
    GuidanceRule {
        category: RapidPrototyper,
        classification: Pure,
        template: "{label} ({confidence}%): you optimise for speed. Keep a running list of shortcuts \
taken so the prototype can be hardened deliberately rather than by accident.",
    },
    GuidanceRule {
        category: RapidPrototyper,
        classification: Hybrid,
        template: "{label} ({confidence}%) with {secondary} ({secondary_pct}%): timebox the prototype, \
then schedule a pass that applies your {secondary} strengths to what survived.",
    },
    GuidanceRule {
        category: RapidPrototyper,
        classification: Balanced,
        template: "{label} leads at {confidence}% in an adaptive profile. Say explicitly when \"good \
enough\" is the goal so the assistant does not over-engineer.",
    },
    GuidanceRule {
        category: CreativeCollaborator,
        classification: Pure,
        template: "{label} ({confidence}%): you generate options freely. Close brainstorming sessions \
by asking for a ranked shortlist with trade-offs so ideas turn into decisions.",
    },
    GuidanceRule {
        category: CreativeCollaborator,
        classification: Hybrid,
        template: "{label} ({confidence}%) with {secondary} ({secondary_pct}%): alternate divergent and \
convergent turns; ask for alternatives, then commit to one and build it.",
    },
    GuidanceRule {
        category: CreativeCollaborator,
        classification: Balanced,
        template: "{label} leads at {confidence}% in an adaptive profile. Share your rough ideas \
early; collaborative iteration is where you get the most leverage.",
    },
];

/// Guidance for the secondary style of a hybrid profile, one per category
const SECONDARY_RULES: &[(StyleCategory, &str)] = &[
    (
        StrategicArchitect,
        "Secondary {label} ({secondary_pct}%): your design instincts are a real asset. Sketch the \
component boundaries before large changes.",
    ),
    (
        TechnicalImplementer,
        "Secondary {label} ({secondary_pct}%): you follow through into code. Ask for tests alongside \
each implementation to keep momentum safe.",
    ),
    (
        LearningExplorer,
        "Secondary {label} ({secondary_pct}%): your curiosity surfaces gaps. Keep a short log of \
concepts to revisit.",
    ),
    (
        RapidPrototyper,
        "Secondary {label} ({secondary_pct}%): you know when to move fast. Flag throwaway code \
explicitly so it does not leak into production.",
    ),
    (
        CreativeCollaborator,
        "Secondary {label} ({secondary_pct}%): you bring options to the table. Ask for one unusual \
alternative when you feel stuck.",
    ),
];

/// Priority band for a primary recommendation
pub fn priority_for(confidence: u32) -> Priority {
    if confidence >= STRONG_CONFIDENCE {
        Priority::High
    } else if confidence >= MODERATE_CONFIDENCE {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn render(template: &str, profile: &StyleProfile, label: &str) -> String {
    let secondary = profile.secondary.map(|c| c.label()).unwrap_or("none");
    let secondary_pct = profile.secondary_score().unwrap_or(0);
    template
        .replace("{label}", label)
        .replace("{confidence}", &profile.confidence.to_string())
        .replace("{secondary_pct}", &secondary_pct.to_string())
        .replace("{secondary}", secondary)
}

/// Build coaching recommendations for a profile.
///
/// Returns one recommendation for the primary style and, for hybrid
/// profiles, one for the secondary style.
pub fn recommend(profile: &StyleProfile) -> StyleResult<Vec<CoachingRecommendation>> {
    let rule = PRIMARY_RULES
        .iter()
        .find(|r| r.category == profile.primary && r.classification == profile.classification)
        .ok_or_else(|| {
            StyleError::UnknownClassification(format!(
                "no guidance for {} / {}",
                profile.primary, profile.classification
            ))
        })?;

    let mut recommendations = vec![CoachingRecommendation {
        subject_id: profile.subject_id.clone(),
        profile_ref: profile.profile_id.clone(),
        category: profile.primary,
        text: render(rule.template, profile, profile.primary.label()),
        priority: priority_for(profile.confidence),
    }];

    if profile.classification == Classification::Hybrid {
        let secondary = profile.secondary.ok_or_else(|| {
            StyleError::UnknownClassification(format!(
                "hybrid profile {} has no secondary style",
                profile.profile_id
            ))
        })?;
        let template = SECONDARY_RULES
            .iter()
            .find(|(c, _)| *c == secondary)
            .map(|(_, t)| *t)
            .ok_or_else(|| {
                StyleError::UnknownClassification(format!("no secondary guidance for {}", secondary))
            })?;
        recommendations.push(CoachingRecommendation {
            subject_id: profile.subject_id.clone(),
            profile_ref: profile.profile_id.clone(),
            category: secondary,
            text: render(template, profile, secondary.label()),
            priority: Priority::Medium,
        });
    }

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn profile(
        primary: StyleCategory,
        secondary: Option<StyleCategory>,
        classification: Classification,
        scores: [u32; 5],
    ) -> StyleProfile {
        let normalized_scores: BTreeMap<StyleCategory, u32> =
            StyleCategory::all().iter().copied().zip(scores).collect();
        StyleProfile {
            profile_id: "abc123".into(),
            subject_id: "dev".into(),
            lexicon_version: "v1".into(),
            message_count: 3,
            confidence: normalized_scores[&primary],
            normalized_scores,
            primary,
            secondary,
            classification,
            generated_at: Utc::now(),
            recommendations: vec![],
        }
    }

    #[test]
    fn test_rule_table_is_complete() {
        for category in StyleCategory::all() {
            for classification in Classification::all() {
                assert!(
                    PRIMARY_RULES
                        .iter()
                        .any(|r| r.category == *category && r.classification == *classification),
                    "missing guidance for {} / {}",
                    category,
                    classification
                );
            }
            assert!(SECONDARY_RULES.iter().any(|(c, _)| c == category));
        }
    }

    #[test]
    fn test_pure_profile_gets_one_recommendation() {
        let p = profile(
            TechnicalImplementer,
            Some(LearningExplorer),
            Pure,
            [0, 85, 15, 0, 0],
        );
        let recs = recommend(&p).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, TechnicalImplementer);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].profile_ref, "abc123");
        assert!(recs[0].text.starts_with("Technical Implementer (85%)"));
    }

    #[test]
    fn test_hybrid_profile_gets_secondary_recommendation() {
        let p = profile(
            StrategicArchitect,
            Some(TechnicalImplementer),
            Hybrid,
            [42, 38, 10, 6, 4],
        );
        let recs = recommend(&p).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].text.contains("Technical Implementer (38%)"));
        assert_eq!(recs[1].category, TechnicalImplementer);
        assert!(recs[1].text.starts_with("Secondary Technical Implementer (38%)"));
    }

    #[test]
    fn test_balanced_priority_is_low() {
        let p = profile(
            StrategicArchitect,
            Some(TechnicalImplementer),
            Balanced,
            [20, 20, 20, 20, 20],
        );
        let recs = recommend(&p).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert!(!recs[0].text.contains('{'));
    }

    #[test]
    fn test_hybrid_without_secondary_is_invariant_violation() {
        let p = profile(StrategicArchitect, None, Hybrid, [100, 0, 0, 0, 0]);
        assert!(matches!(
            recommend(&p),
            Err(StyleError::UnknownClassification(_))
        ));
    }

    #[test]
    fn test_priority_bands() {
        assert_eq!(priority_for(100), Priority::High);
        assert_eq!(priority_for(70), Priority::High);
        assert_eq!(priority_for(69), Priority::Medium);
        assert_eq!(priority_for(40), Priority::Medium);
        assert_eq!(priority_for(39), Priority::Low);
    }
}
