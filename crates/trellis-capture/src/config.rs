//! Configuration for page capture

use serde::{Deserialize, Serialize};

/// Configuration for the capture stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Domains whose pages are never captured. Matched against the host and
    /// all of its subdomains.
    pub skip_domains: Vec<String>,

    /// Path extensions that mark a resource as non-text.
    pub blocked_extensions: Vec<String>,

    /// How many top-scoring paragraphs the fallback body extractor keeps.
    pub top_paragraph_count: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            skip_domains: [
                "facebook.com",
                "instagram.com",
                "twitter.com",
                "x.com",
                "tiktok.com",
                "youtube.com",
                "netflix.com",
                "twitch.tv",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            blocked_extensions: [
                ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".ico", ".pdf", ".zip",
                ".tar", ".gz", ".mp3", ".mp4", ".webm", ".avi", ".mov", ".exe", ".dmg",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            top_paragraph_count: 5,
        }
    }
}

impl CaptureConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_paragraph_count == 0 {
            return Err("top_paragraph_count must be greater than 0".to_string());
        }
        for ext in &self.blocked_extensions {
            if !ext.starts_with('.') {
                return Err(format!("extension '{}' must start with '.'", ext));
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CaptureConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let mut config = CaptureConfig::default();
        config.blocked_extensions.push("pdf".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_paragraph_count_rejected() {
        let mut config = CaptureConfig::default();
        config.top_paragraph_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CaptureConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = CaptureConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config.skip_domains, parsed.skip_domains);
        assert_eq!(config.top_paragraph_count, parsed.top_paragraph_count);
    }
}
