//! Graph nodes - the entities of the knowledge graph

use crate::ident::{digest_id, normalize_label, normalize_url};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum importance score a node can carry.
pub const MAX_IMPORTANCE: f64 = 10.0;

/// Unique identifier for a graph node.
///
/// Derived deterministically from what the node represents:
/// - page nodes hash their normalized URL
/// - concept nodes hash their normalized label
///
/// so repeated observations converge on one node across restarts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Derive the id for a page node from its URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_domain::NodeId;
    ///
    /// let a = NodeId::for_page("https://example.com/post/");
    /// let b = NodeId::for_page("https://example.com/post#intro");
    /// assert_eq!(a, b);
    /// ```
    pub fn for_page(url: &str) -> Self {
        Self(digest_id(&normalize_url(url)))
    }

    /// Derive the id for a concept node from its label.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_domain::NodeId;
    ///
    /// assert_eq!(
    ///     NodeId::for_concept("Neural Networks"),
    ///     NodeId::for_concept("  neural   networks ")
    /// );
    /// ```
    pub fn for_concept(label: &str) -> Self {
        Self(digest_id(&normalize_label(label)))
    }

    /// Reconstruct an id from its stored string form.
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of entity a node represents.
///
/// Only `Page` and `Concept` are produced by the current pipeline; `Author`
/// and `Domain` are modeled for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A captured web page
    Page,
    /// A concept mentioned by one or more pages
    Concept,
    /// An author of a page (modeled, unused)
    Author,
    /// A web domain (modeled, unused)
    Domain,
}

impl NodeKind {
    /// Storage string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Page => "page",
            NodeKind::Concept => "concept",
            NodeKind::Author => "author",
            NodeKind::Domain => "domain",
        }
    }

    /// Parse a storage string back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "page" => Some(NodeKind::Page),
            "concept" => Some(NodeKind::Concept),
            "author" => Some(NodeKind::Author),
            "domain" => Some(NodeKind::Domain),
            _ => None,
        }
    }
}

/// An entity in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique, content-derived identifier
    pub id: NodeId,

    /// What this node represents
    pub kind: NodeKind,

    /// Human-readable label (page title or concept name)
    pub label: String,

    /// Source URL (page nodes only)
    pub url: Option<String>,

    /// Short summary from analysis (page nodes only)
    pub summary: Option<String>,

    /// Domain the page was captured from
    pub domain: Option<String>,

    /// Heuristic content type of the source page
    pub content_type: Option<String>,

    /// Importance score, clamped to [0, MAX_IMPORTANCE]
    pub importance: f64,

    /// Page nodes that mention this concept (concept nodes only).
    ///
    /// Appends are not deduplicated; per-URL dedup upstream keeps repeats rare.
    pub mentioned_by: Vec<NodeId>,

    /// When this node was created (unix seconds)
    pub created_at: u64,
}

impl GraphNode {
    /// Create a page node. Importance is clamped on entry.
    pub fn page(
        url: &str,
        label: impl Into<String>,
        importance: f64,
        created_at: u64,
    ) -> Self {
        Self {
            id: NodeId::for_page(url),
            kind: NodeKind::Page,
            label: label.into(),
            url: Some(url.to_string()),
            summary: None,
            domain: None,
            content_type: None,
            importance: importance.clamp(0.0, MAX_IMPORTANCE),
            mentioned_by: Vec::new(),
            created_at,
        }
    }

    /// Create a concept node with its first mentioning page.
    pub fn concept(label: impl Into<String>, mentioned_by: NodeId, created_at: u64) -> Self {
        let label = label.into();
        Self {
            id: NodeId::for_concept(&label),
            kind: NodeKind::Concept,
            label,
            url: None,
            summary: None,
            domain: None,
            content_type: None,
            importance: 1.0,
            mentioned_by: vec![mentioned_by],
            created_at,
        }
    }

    /// Attach a summary (builder style).
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach the source domain (builder style).
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Attach the content type (builder style).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Increase importance by `delta`, clamped to [0, MAX_IMPORTANCE].
    pub fn bump_importance(&mut self, delta: f64) {
        self.importance = (self.importance + delta).clamp(0.0, MAX_IMPORTANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids_converge_on_normalized_url() {
        let a = GraphNode::page("https://example.com/a/", "A", 5.0, 0);
        let b = GraphNode::page("https://EXAMPLE.com/a", "A again", 5.0, 1);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_concept_ids_converge_on_normalized_label() {
        let page = NodeId::for_page("https://example.com");
        let a = GraphNode::concept("Neural Networks", page.clone(), 0);
        let b = GraphNode::concept("neural  networks", page, 0);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_page_and_concept_ids_differ_for_same_text() {
        assert_ne!(NodeId::for_page("rust"), NodeId::for_concept("rust"));
    }

    #[test]
    fn test_importance_clamped_on_creation() {
        let node = GraphNode::page("https://example.com", "A", 99.0, 0);
        assert_eq!(node.importance, MAX_IMPORTANCE);

        let node = GraphNode::page("https://example.com", "A", -3.0, 0);
        assert_eq!(node.importance, 0.0);
    }

    #[test]
    fn test_bump_importance_clamps() {
        let page = NodeId::for_page("https://example.com");
        let mut node = GraphNode::concept("ai", page, 0);
        for _ in 0..100 {
            node.bump_importance(0.5);
        }
        assert_eq!(node.importance, MAX_IMPORTANCE);

        node.bump_importance(-100.0);
        assert_eq!(node.importance, 0.0);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NodeKind::Page,
            NodeKind::Concept,
            NodeKind::Author,
            NodeKind::Domain,
        ] {
            assert_eq!(NodeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::parse("unknown"), None);
    }
}
