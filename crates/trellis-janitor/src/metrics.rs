//! Metrics collection for Janitor operations

use trellis_domain::EvictionStats;

/// Counters accumulated across sweep cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct JanitorMetrics {
    /// Content records removed across all sweeps
    pub content_removed: usize,

    /// Page nodes removed across all sweeps
    pub nodes_removed: usize,

    /// Edges removed by the cascade across all sweeps
    pub edges_removed: usize,

    /// Sweeps that actually ran
    pub sweep_count: usize,

    /// Sweeps suppressed by the once-per-gap throttle
    pub skipped_count: usize,
}

impl JanitorMetrics {
    /// Create new empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sweep's eviction counts into the totals.
    pub fn record_sweep(&mut self, stats: EvictionStats) {
        self.content_removed += stats.content_removed;
        self.nodes_removed += stats.nodes_removed;
        self.edges_removed += stats.edges_removed;
        self.sweep_count += 1;
    }

    /// Record a throttled (skipped) invocation.
    pub fn record_skip(&mut self) {
        self.skipped_count += 1;
    }

    /// Total entities removed across all sweeps.
    pub fn total_removed(&self) -> usize {
        self.content_removed + self.nodes_removed + self.edges_removed
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Janitor: {} sweeps ({} skipped), removed {} content, {} nodes, {} edges",
            self.sweep_count,
            self.skipped_count,
            self.content_removed,
            self.nodes_removed,
            self.edges_removed
        )
    }
}
