//! Configuration for the analysis client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the analysis client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Character budget for text sent to the model; longer input is truncated
    pub max_prompt_chars: usize,

    /// Minimum milliseconds between the completion of one external call and
    /// the start of the next
    pub min_call_interval_ms: u64,

    /// Concept relations scoring below this similarity are dropped
    pub similarity_threshold: f64,

    /// At most this many concept relations are kept per scoring call
    pub max_relations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 4000,
            min_call_interval_ms: 1000,
            similarity_threshold: 0.3,
            max_relations: 10,
        }
    }
}

impl AnalysisConfig {
    /// Get the minimum call interval as a Duration.
    pub fn min_call_interval(&self) -> Duration {
        Duration::from_millis(self.min_call_interval_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err("similarity_threshold must be in [0, 1]".to_string());
        }
        if self.max_relations == 0 {
            return Err("max_relations must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
