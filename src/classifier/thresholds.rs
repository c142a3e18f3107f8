//! Classification thresholds
//!
//! Dominance decides whether a single style is "pure", hybrid decides
//! whether the runner-up is strong enough to co-classify the profile.

use crate::error::{StyleError, StyleResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOMINANCE_THRESHOLD: f64 = 40.0;
pub const DEFAULT_HYBRID_THRESHOLD: f64 = 25.0;

/// Percent thresholds (0-100) used by the ranker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleThresholds {
    /// Minimum primary percentage for a pure profile
    pub dominance: f64,
    /// Minimum secondary percentage for a hybrid profile
    pub hybrid: f64,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            dominance: DEFAULT_DOMINANCE_THRESHOLD,
            hybrid: DEFAULT_HYBRID_THRESHOLD,
        }
    }
}

impl StyleThresholds {
    /// Create validated thresholds
    pub fn new(dominance: f64, hybrid: f64) -> StyleResult<Self> {
        let thresholds = Self { dominance, hybrid };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> StyleResult<()> {
        for (name, value) in [("dominance", self.dominance), ("hybrid", self.hybrid)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(StyleError::InvalidConfig(format!(
                    "{} threshold must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        // A 0% runner-up is never a secondary style
        if self.hybrid == 0.0 {
            return Err(StyleError::InvalidConfig(
                "hybrid threshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Does a primary percentage clear the dominance threshold?
    pub fn is_dominant(&self, percent: u32) -> bool {
        f64::from(percent) >= self.dominance
    }

    /// Does a secondary percentage clear the hybrid threshold?
    pub fn is_hybrid(&self, percent: u32) -> bool {
        f64::from(percent) >= self.hybrid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = StyleThresholds::default();
        assert_eq!(t.dominance, 40.0);
        assert_eq!(t.hybrid, 25.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let t = StyleThresholds::default();
        assert!(t.is_dominant(40));
        assert!(!t.is_dominant(39));
        assert!(t.is_hybrid(25));
        assert!(!t.is_hybrid(24));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(StyleThresholds::new(101.0, 25.0).is_err());
        assert!(StyleThresholds::new(40.0, -1.0).is_err());
        assert!(StyleThresholds::new(f64::NAN, 25.0).is_err());
        assert!(matches!(
            StyleThresholds::new(40.0, 200.0),
            Err(StyleError::InvalidConfig(_))
        ));
        assert!(StyleThresholds::new(0.0, 100.0).is_ok());
    }

    #[test]
    fn test_zero_hybrid_rejected() {
        assert!(matches!(
            StyleThresholds::new(40.0, 0.0),
            Err(StyleError::InvalidConfig(_))
        ));
        assert!(StyleThresholds::new(40.0, 0.5).is_ok());
    }
}
