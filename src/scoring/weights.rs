//! Scoring weights
//!
//! The combined compatibility score is a fixed weighted average of four
//! sub-scores. The weights are configuration data, not runtime-derived:
//! re-scoring a roster under different weights needs only a different
//! [`ScoringWeights`] value, never a code change.

use serde::{Deserialize, Serialize};

/// Weights for the four compatibility sub-scores
///
/// Weights must be non-negative. They need not sum to 1: the scorer
/// normalizes by the weight sum, which keeps the combined score inside
/// [0,1] and monotonic in every sub-score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of pairwise project-preference similarity
    pub project_preference: f64,
    /// Weight of mutual teammate preference
    pub mutual_preference: f64,
    /// Weight of skills balance (shared foundation vs. coverage breadth)
    pub skills: f64,
    /// Weight of availability overlap
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            project_preference: 0.25,
            mutual_preference: 0.25,
            skills: 0.30,
            availability: 0.20,
        }
    }
}

impl ScoringWeights {
    /// Sum of all weights, the normalization denominator
    pub fn sum(&self) -> f64 {
        self.project_preference + self.mutual_preference + self.skills + self.availability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_serde_roundtrip() {
        let weights = ScoringWeights {
            project_preference: 0.4,
            mutual_preference: 0.3,
            skills: 0.2,
            availability: 0.1,
        };
        let json = serde_json::to_string(&weights).unwrap();
        let loaded: ScoringWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, loaded);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let loaded: ScoringWeights = serde_json::from_str(r#"{"skills": 0.5}"#).unwrap();
        assert_eq!(loaded.skills, 0.5);
        assert_eq!(loaded.availability, 0.20);
    }
}
