//! Core Janitor implementation

use crate::{JanitorConfig, JanitorError, JanitorMetrics};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use trellis_domain::traits::GraphStore;
use trellis_domain::EvictionStats;

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Result of an opportunistic sweep attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The pass ran; these are its counts
    Swept(EvictionStats),
    /// Suppressed by the once-per-gap throttle
    Skipped,
}

/// Removes aged content and page nodes from a graph store.
///
/// Concept nodes are deliberately never touched. With the cascade enabled,
/// edges whose endpoints disappeared are removed in the same pass.
pub struct Janitor {
    config: JanitorConfig,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration.
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Get a reference to the accumulated metrics.
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Opportunistic sweep: runs only when the configured gap has elapsed
    /// since the last recorded pass.
    pub fn maybe_sweep<S: GraphStore>(
        &mut self,
        store: &mut S,
    ) -> Result<SweepOutcome, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let now = current_timestamp();
        let last = store
            .last_cleanup()
            .map_err(|e| JanitorError::Store(e.to_string()))?;

        if let Some(last) = last {
            if now.saturating_sub(last) < self.config.min_pass_gap().as_secs() {
                debug!("eviction pass skipped, last ran {}s ago", now - last);
                self.metrics.record_skip();
                return Ok(SweepOutcome::Skipped);
            }
        }

        let stats = self.sweep_at(store, now)?;
        Ok(SweepOutcome::Swept(stats))
    }

    /// Unthrottled sweep, for explicit operator invocation.
    pub fn sweep<S: GraphStore>(&mut self, store: &mut S) -> Result<EvictionStats, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        self.sweep_at(store, current_timestamp())
    }

    fn sweep_at<S: GraphStore>(
        &mut self,
        store: &mut S,
        now: u64,
    ) -> Result<EvictionStats, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let cutoff = now.saturating_sub(self.config.max_content_age().as_secs());

        let stats = store
            .evict_older_than(cutoff, self.config.cascade_evict_edges)
            .map_err(|e| JanitorError::Store(e.to_string()))?;
        store
            .record_cleanup(now)
            .map_err(|e| JanitorError::Store(e.to_string()))?;

        self.metrics.record_sweep(stats);
        info!(
            content = stats.content_removed,
            nodes = stats.nodes_removed,
            edges = stats.edges_removed,
            "eviction pass complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_domain::{EdgeKind, GraphEdge, GraphNode};
    use trellis_store::SqliteStore;

    const DAY: u64 = 86400;

    fn seeded_store(now: u64) -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();

        let old_page = GraphNode::page("https://example.com/old", "Old", 5.0, now - 8 * DAY);
        let new_page = GraphNode::page("https://example.com/new", "New", 5.0, now - DAY);
        let concept = GraphNode::concept("ai", old_page.id.clone(), now - 8 * DAY);

        store.upsert_node(old_page.clone()).unwrap();
        store.upsert_node(new_page.clone()).unwrap();
        store.upsert_node(concept.clone()).unwrap();
        store
            .add_edge(GraphEdge::new(
                old_page.id,
                concept.id.clone(),
                EdgeKind::RelatesTo,
                0.5,
                "mentions",
                now - 8 * DAY,
            ))
            .unwrap();
        store
            .add_edge(GraphEdge::new(
                new_page.id,
                concept.id,
                EdgeKind::RelatesTo,
                0.5,
                "mentions",
                now - DAY,
            ))
            .unwrap();

        store
    }

    #[test]
    fn test_sweep_removes_aged_pages_and_cascades_edges() {
        let now = current_timestamp();
        let mut store = seeded_store(now);
        let mut janitor = Janitor::new(JanitorConfig::default());

        let stats = janitor.sweep(&mut store).unwrap();
        assert_eq!(stats.nodes_removed, 1);
        assert_eq!(stats.edges_removed, 1);

        let snapshot = store.graph_snapshot().unwrap();
        // Concept plus the fresh page survive; no dangling edges remain.
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        for edge in &snapshot.edges {
            assert!(store.get_node(&edge.source).unwrap().is_some());
            assert!(store.get_node(&edge.target).unwrap().is_some());
        }
    }

    #[test]
    fn test_maybe_sweep_throttles_to_gap() {
        let now = current_timestamp();
        let mut store = seeded_store(now);
        let mut janitor = Janitor::new(JanitorConfig::default());

        let first = janitor.maybe_sweep(&mut store).unwrap();
        assert!(matches!(first, SweepOutcome::Swept(_)));

        let second = janitor.maybe_sweep(&mut store).unwrap();
        assert_eq!(second, SweepOutcome::Skipped);

        assert_eq!(janitor.metrics().sweep_count, 1);
        assert_eq!(janitor.metrics().skipped_count, 1);
    }

    #[test]
    fn test_maybe_sweep_runs_after_gap_elapsed() {
        let now = current_timestamp();
        let mut store = seeded_store(now);
        // Pretend the previous pass ran two days ago.
        store.record_cleanup(now - 2 * DAY).unwrap();

        let mut janitor = Janitor::new(JanitorConfig::default());
        let outcome = janitor.maybe_sweep(&mut store).unwrap();
        assert!(matches!(outcome, SweepOutcome::Swept(_)));
    }

    #[test]
    fn test_forced_sweep_ignores_throttle() {
        let now = current_timestamp();
        let mut store = seeded_store(now);
        store.record_cleanup(now).unwrap();

        let mut janitor = Janitor::new(JanitorConfig::default());
        // maybe_sweep would skip; sweep runs regardless.
        assert!(janitor.sweep(&mut store).is_ok());
        assert_eq!(janitor.metrics().sweep_count, 1);
    }
}
