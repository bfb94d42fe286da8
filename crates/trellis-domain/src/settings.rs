//! Process-wide configuration with a read-modify-write lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Required prefix of a valid analysis-service API key.
pub const API_KEY_PREFIX: &str = "AIza";

/// Minimum length of a valid analysis-service API key.
pub const API_KEY_MIN_LEN: usize = 20;

/// Settings validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// API key failed format validation
    InvalidApiKey(String),
    /// A numeric bound is out of its valid range
    InvalidBound(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidApiKey(msg) => write!(f, "invalid API key: {}", msg),
            SettingsError::InvalidBound(msg) => write!(f, "invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// User-facing configuration, persisted in the store and edited
/// read-modify-write. Defaults are supplied when no record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Analysis-service API key; empty means analysis is unavailable
    #[serde(default)]
    pub api_key: String,

    /// Whether page visits are captured automatically
    #[serde(default = "default_auto_capture")]
    pub auto_capture: bool,

    /// Minimum body length, in words, for a capture to be persisted
    #[serde(default = "default_min_content_words")]
    pub min_content_words: usize,

    /// Domains whose pages are never captured
    #[serde(default)]
    pub skip_domains: Vec<String>,

    /// Minimum seconds between captures of the same tab/session
    #[serde(default = "default_capture_interval_secs")]
    pub capture_interval_secs: u64,

    /// Maximum number of processed-content records kept in the archive
    #[serde(default = "default_max_archive_entries")]
    pub max_archive_entries: usize,
}

fn default_auto_capture() -> bool {
    true
}

fn default_min_content_words() -> usize {
    100
}

fn default_capture_interval_secs() -> u64 {
    30
}

fn default_max_archive_entries() -> usize {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auto_capture: true,
            min_content_words: 100,
            skip_domains: Vec::new(),
            capture_interval_secs: 30,
            max_archive_entries: 1000,
        }
    }
}

impl Settings {
    /// Validate an API key: length and provider prefix.
    ///
    /// Rejected synchronously at the point of save; an empty key is allowed
    /// (analysis simply stays unavailable) but a malformed non-empty key is
    /// an error.
    pub fn validate_api_key(key: &str) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Ok(());
        }
        if key.len() <= API_KEY_MIN_LEN {
            return Err(SettingsError::InvalidApiKey(format!(
                "must be longer than {} characters",
                API_KEY_MIN_LEN
            )));
        }
        if !key.starts_with(API_KEY_PREFIX) {
            return Err(SettingsError::InvalidApiKey(format!(
                "must start with '{}'",
                API_KEY_PREFIX
            )));
        }
        Ok(())
    }

    /// Validate the full settings record before saving.
    pub fn validate(&self) -> Result<(), SettingsError> {
        Self::validate_api_key(&self.api_key)?;
        if self.min_content_words == 0 {
            return Err(SettingsError::InvalidBound(
                "min_content_words must be greater than 0".to_string(),
            ));
        }
        if self.max_archive_entries == 0 {
            return Err(SettingsError::InvalidBound(
                "max_archive_entries must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_capture);
        assert_eq!(settings.min_content_words, 100);
        assert_eq!(settings.max_archive_entries, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_api_key_validation() {
        assert!(Settings::validate_api_key("").is_ok());
        assert!(Settings::validate_api_key("AIzaSyExample_1234567890abc").is_ok());
        // Too short
        assert!(Settings::validate_api_key("AIzaShort").is_err());
        // Wrong prefix
        assert!(Settings::validate_api_key("sk-1234567890abcdefghijklmn").is_err());
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let mut settings = Settings::default();
        settings.min_content_words = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.max_archive_entries = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
