//! Fade-risk classification from a pacing deviation.

use serde::Serialize;
use std::fmt;

use crate::config::RiskConfig;

/// Ordered risk tiers, least risky first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    Conservative,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Conservative => "conservative",
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::VeryHigh => "very-high",
        }
    }

    /// Fixed advisory shown alongside the tier
    pub fn message(self) -> &'static str {
        match self {
            RiskTier::Conservative => {
                "Even or conservative start. Little fade risk; you may have time in reserve."
            }
            RiskTier::Low => "Slightly fast start. Expect a small late-race slowdown at most.",
            RiskTier::Moderate => {
                "Noticeably fast start. A measurable fade over the final miles is likely."
            }
            RiskTier::High => {
                "Aggressive start. Expect a significant fade that may cost the time you banked."
            }
            RiskTier::VeryHigh => {
                "Very aggressive start. A severe late-race slowdown is likely; consider easing off."
            }
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier with its advisory
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub message: &'static str,
}

impl RiskConfig {
    /// Classify a deviation (seconds per mile faster than sustainable)
    ///
    /// A value exactly on a threshold falls in the lower band.
    pub fn classify(&self, deviation: f64) -> RiskAssessment {
        let tier = if deviation <= 0.0 {
            RiskTier::Conservative
        } else if deviation <= self.low {
            RiskTier::Low
        } else if deviation <= self.moderate {
            RiskTier::Moderate
        } else if deviation <= self.high {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        };

        RiskAssessment {
            tier,
            message: tier.message(),
        }
    }
}

/// Classify with the canonical thresholds (5 / 15 / 25)
pub fn classify(deviation: f64) -> RiskAssessment {
    RiskConfig::default().classify(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_values() {
        assert_eq!(classify(-10.0).tier, RiskTier::Conservative);
        assert_eq!(classify(3.0).tier, RiskTier::Low);
        assert_eq!(classify(12.0).tier, RiskTier::Moderate);
        assert_eq!(classify(20.0).tier, RiskTier::High);
        assert_eq!(classify(30.0).tier, RiskTier::VeryHigh);
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(classify(0.0).tier, RiskTier::Conservative);
        assert_eq!(classify(5.0).tier, RiskTier::Low);
        assert_eq!(classify(15.0).tier, RiskTier::Moderate);
        assert_eq!(classify(25.0).tier, RiskTier::High);
        assert_eq!(classify(25.01).tier, RiskTier::VeryHigh);
        assert_eq!(classify(0.01).tier, RiskTier::Low);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskTier::Conservative < RiskTier::Low);
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
        assert!(RiskTier::High < RiskTier::VeryHigh);
    }

    #[test]
    fn test_message_is_fixed_per_tier() {
        let a = classify(16.0);
        let b = classify(24.0);
        assert_eq!(a.tier, b.tier);
        assert_eq!(a.message, b.message);
        assert_ne!(classify(3.0).message, classify(30.0).message);
    }

    #[test]
    fn test_tier_serializes_kebab_case() {
        let json = serde_json::to_string(&RiskTier::VeryHigh).unwrap();
        assert_eq!(json, "\"very-high\"");
        assert_eq!(RiskTier::VeryHigh.to_string(), "very-high");
    }
}
