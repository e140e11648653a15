//! Matcher configuration
//!
//! Scoring weights and the warning threshold are external configuration,
//! not constants baked into the scorer: re-scoring a roster under
//! different weights is a data change. Configuration round-trips through
//! JSON so a course staff file can be versioned next to the survey.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::weights::ScoringWeights;

/// Default score below which a team is flagged for faculty review
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.45;

/// Default ballot depth for the project-preference sub-score
pub const DEFAULT_TOP_CHOICES: usize = 3;

/// Engine configuration
///
/// Every field has a default, so a partial JSON document is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Sub-score weights for the compatibility formula
    pub weights: ScoringWeights,
    /// Teams scoring below this are flagged by the warnings command
    pub warning_threshold: f64,
    /// How many top ballot entries the project-preference sub-score compares
    pub top_choices: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            top_choices: DEFAULT_TOP_CHOICES,
        }
    }
}

impl MatcherConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
