//! Config schema - tunable thresholds for the lifecycle engine
//!
//! The rating-delta, approval-gate and confidence numbers are business
//! placeholders, not settled values; they are configuration so deployments
//! can tune them without a code change.

use serde::{Deserialize, Serialize};

/// Main configuration for the lifecycle engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Rating change that counts as a "significant change" and forces a new
    /// version even when no new interview completed
    #[serde(default = "default_significant_rating_delta")]
    pub significant_rating_delta: f64,

    /// Minimum mean rating required to approve a draft
    #[serde(default = "default_min_approval_rating")]
    pub min_approval_rating: f64,

    /// Minimum completed/total interview ratio required to approve a draft
    #[serde(default = "default_approval_completion_ratio")]
    pub approval_completion_ratio: f64,

    /// Minimum trimmed length of a rejection justification
    #[serde(default = "default_min_rejection_reason_len")]
    pub min_rejection_reason_len: usize,

    /// Rating at or above which the recommendations confidence is high
    #[serde(default = "default_high_confidence_rating")]
    pub high_confidence_rating: f64,

    /// Recommendations progress factor when confidence is high
    #[serde(default = "default_high_confidence_factor")]
    pub high_confidence_factor: f64,

    /// Recommendations progress factor when confidence is low
    #[serde(default = "default_low_confidence_factor")]
    pub low_confidence_factor: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_significant_rating_delta() -> f64 {
    0.3
}

fn default_min_approval_rating() -> f64 {
    2.0
}

fn default_approval_completion_ratio() -> f64 {
    0.5
}

fn default_min_rejection_reason_len() -> usize {
    10
}

fn default_high_confidence_rating() -> f64 {
    4.0
}

fn default_high_confidence_factor() -> f64 {
    0.9
}

fn default_low_confidence_factor() -> f64 {
    0.7
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            schema_version: 1,
            significant_rating_delta: 0.3,
            min_approval_rating: 2.0,
            approval_completion_ratio: 0.5,
            min_rejection_reason_len: 10,
            high_confidence_rating: 4.0,
            high_confidence_factor: 0.9,
            low_confidence_factor: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.significant_rating_delta, 0.3);
        assert_eq!(config.min_approval_rating, 2.0);
        assert_eq!(config.approval_completion_ratio, 0.5);
        assert_eq!(config.min_rejection_reason_len, 10);
        assert_eq!(config.high_confidence_rating, 4.0);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_partial_json() {
        // Simulate a config file with only some fields set
        let json = r#"{"min_approval_rating": 3.5}"#;
        let parsed: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.min_approval_rating, 3.5);
        // Other fields should have defaults
        assert_eq!(parsed.significant_rating_delta, 0.3);
        assert_eq!(parsed.min_rejection_reason_len, 10);
    }
}
