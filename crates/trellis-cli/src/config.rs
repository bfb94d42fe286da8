//! CLI configuration (database location).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the CLI keeps its state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path of the SQLite database
    pub db_path: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            db_path: base.join("trellis").join("trellis.db"),
        }
    }
}

impl CliConfig {
    fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trellis").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_file() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Persist the config file.
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_file() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Ensure the database's parent directory exists and return the path.
    pub fn prepared_db_path(&self) -> Result<PathBuf> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        Ok(self.db_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_under_data_dir() {
        let config = CliConfig::default();
        assert!(config.db_path.ends_with("trellis/trellis.db"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig {
            db_path: PathBuf::from("/tmp/x.db"),
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.db_path, config.db_path);
    }
}
