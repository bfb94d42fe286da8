//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates (trellis-store).

use crate::content::ProcessedContent;
use crate::edge::GraphEdge;
use crate::node::{GraphNode, NodeId};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// A full read of the graph: every node and every edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All nodes, unordered
    pub nodes: Vec<GraphNode>,
    /// All edges, unordered
    pub edges: Vec<GraphEdge>,
}

/// A content-archive search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Archive identifier of the matching record
    pub id: String,
    /// Source URL
    pub url: String,
    /// Page title
    pub title: String,
    /// Analysis summary
    pub summary: String,
    /// When the page was captured (unix seconds)
    pub captured_at: u64,
}

/// Counts from an eviction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionStats {
    /// Processed-content records removed
    pub content_removed: usize,
    /// Page nodes removed
    pub nodes_removed: usize,
    /// Edges removed by the cascade
    pub edges_removed: usize,
}

/// Trait for the persistent graph store.
///
/// Implemented by the infrastructure layer (trellis-store).
pub trait GraphStore {
    /// Error type for store operations
    type Error;

    /// Insert or replace a node, keyed by its identifier.
    fn upsert_node(&mut self, node: GraphNode) -> Result<(), Self::Error>;

    /// Get a node by identifier.
    fn get_node(&self, id: &NodeId) -> Result<Option<GraphNode>, Self::Error>;

    /// Add an edge. Returns `false` without modifying anything when an edge
    /// with the same identifier already exists.
    fn add_edge(&mut self, edge: GraphEdge) -> Result<bool, Self::Error>;

    /// Read the full graph.
    fn graph_snapshot(&self) -> Result<GraphSnapshot, Self::Error>;

    /// Look up archived content by URL (dedup query).
    fn find_content_by_url(&self, url: &str) -> Result<Option<ProcessedContent>, Self::Error>;

    /// Store processed content, replacing any record with the same URL, then
    /// trim the archive to the `max_entries` newest records.
    fn store_content(
        &mut self,
        content: ProcessedContent,
        max_entries: usize,
    ) -> Result<(), Self::Error>;

    /// Case-insensitive substring search over title, body, and concepts.
    /// At most 50 hits, newest first.
    fn search_content(&self, query: &str) -> Result<Vec<SearchHit>, Self::Error>;

    /// Load settings, supplying defaults when no record exists.
    fn load_settings(&self) -> Result<Settings, Self::Error>;

    /// Persist settings.
    fn save_settings(&mut self, settings: &Settings) -> Result<(), Self::Error>;

    /// Remove content and page nodes captured before `cutoff`; when
    /// `cascade` is set, also remove edges left dangling by the pass.
    fn evict_older_than(&mut self, cutoff: u64, cascade: bool)
        -> Result<EvictionStats, Self::Error>;

    /// When the last eviction pass ran, if ever (unix seconds).
    fn last_cleanup(&self) -> Result<Option<u64>, Self::Error>;

    /// Record an eviction pass at `at` (unix seconds).
    fn record_cleanup(&mut self, at: u64) -> Result<(), Self::Error>;
}
