use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Fixed confidence bands derived from the winning class percentage.
/// Thresholds are design constants, not configuration: inclusive lower
/// bounds at 90, 75 and 60 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl ConfidenceTier {
    /// Bands a percentage confidence value (0-100) into its tier.
    pub fn from_percent(confidence: f32) -> Self {
        if confidence >= 90.0 {
            ConfidenceTier::VeryHigh
        } else if confidence >= 75.0 {
            ConfidenceTier::High
        } else if confidence >= 60.0 {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Low
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfidenceTier::VeryHigh => "VERY_HIGH",
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Moderate => "MODERATE",
            ConfidenceTier::Low => "LOW",
        };
        write!(f, "{}", name)
    }
}

/// The pipeline's per-request output: one label, its confidence as a
/// percentage, the full class-to-percentage map and the confidence tier.
///
/// Created fresh by every inference call and immutable afterwards; the
/// system holds no state across requests.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: String,
    /// Winning class probability, 0-100.
    pub confidence: f32,
    /// Every class label mapped to its percentage probability; values sum
    /// to ~100.
    pub probabilities: HashMap<String, f32>,
    pub tier: ConfidenceTier,
}
