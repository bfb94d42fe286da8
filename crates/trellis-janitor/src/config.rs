//! Configuration for Janitor operations

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Janitor.
///
/// # Examples
///
/// ```
/// use trellis_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.max_content_age_days, 7);
///
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.max_content_age_days, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Content and page nodes older than this are evicted (in days)
    pub max_content_age_days: u64,

    /// Minimum gap between two eviction passes (in hours)
    pub min_pass_gap_hours: u64,

    /// How often the background worker wakes up (in minutes)
    pub sweep_interval_minutes: u64,

    /// Remove edges left dangling by a pass. Disabling this reproduces the
    /// lax behavior of keeping edges whose page endpoint was evicted.
    #[serde(default = "default_cascade")]
    pub cascade_evict_edges: bool,
}

fn default_cascade() -> bool {
    true
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            max_content_age_days: 7,
            min_pass_gap_hours: 24,
            sweep_interval_minutes: 60,
            cascade_evict_edges: true,
        }
    }
}

impl JanitorConfig {
    /// Aggressive cleanup: shorter retention, more frequent wake-ups.
    pub fn aggressive() -> Self {
        Self {
            max_content_age_days: 3,
            min_pass_gap_hours: 12,
            sweep_interval_minutes: 30,
            cascade_evict_edges: true,
        }
    }

    /// Lenient cleanup: longer retention for archival use.
    pub fn lenient() -> Self {
        Self {
            max_content_age_days: 30,
            min_pass_gap_hours: 24,
            sweep_interval_minutes: 240,
            cascade_evict_edges: true,
        }
    }

    /// Get the maximum content age as a Duration.
    pub fn max_content_age(&self) -> Duration {
        Duration::from_secs(self.max_content_age_days * 86400)
    }

    /// Get the minimum pass gap as a Duration.
    pub fn min_pass_gap(&self) -> Duration {
        Duration::from_secs(self.min_pass_gap_hours * 3600)
    }

    /// Get the worker wake-up interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }
}
