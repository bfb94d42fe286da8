//! Graph edges - directed relationships between nodes

use crate::ident::digest_id;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a graph edge.
///
/// Derived deterministically from the ordered (source, target) pair, so a
/// second observation of the same relationship maps to the same id and the
/// store can treat the re-add as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Derive the id for the ordered endpoint pair.
    pub fn for_pair(source: &NodeId, target: &NodeId) -> Self {
        Self(digest_id(&format!("{}->{}", source, target)))
    }

    /// Reconstruct an id from its stored string form.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of relationship an edge expresses.
///
/// Only `RelatesTo` is produced by the current pipeline; the other kinds are
/// modeled for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A page mentions a concept
    RelatesTo,
    /// A page was written by an author (modeled, unused)
    AuthoredBy,
    /// A page belongs to a domain (modeled, unused)
    PartOf,
    /// Two entities are semantically similar (modeled, unused)
    SimilarTo,
}

impl EdgeKind {
    /// Storage string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::RelatesTo => "relates_to",
            EdgeKind::AuthoredBy => "authored_by",
            EdgeKind::PartOf => "part_of",
            EdgeKind::SimilarTo => "similar_to",
        }
    }

    /// Parse a storage string back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relates_to" => Some(EdgeKind::RelatesTo),
            "authored_by" => Some(EdgeKind::AuthoredBy),
            "part_of" => Some(EdgeKind::PartOf),
            "similar_to" => Some(EdgeKind::SimilarTo),
            _ => None,
        }
    }
}

/// A directed relationship between two nodes.
///
/// Edges are written once at first co-occurrence of their endpoints; repeat
/// co-occurrence never refreshes strength or label (first observation wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Unique identifier derived from the endpoint pair
    pub id: EdgeId,

    /// Source node
    pub source: NodeId,

    /// Target node
    pub target: NodeId,

    /// Kind of relationship
    pub kind: EdgeKind,

    /// Relationship strength [0.0, 1.0]
    pub strength: f64,

    /// Free-text relationship label
    pub label: String,

    /// When this edge was established (unix seconds)
    pub created_at: u64,
}

impl GraphEdge {
    /// Create a new edge; the id is derived from the endpoint pair.
    pub fn new(
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        strength: f64,
        label: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            id: EdgeId::for_pair(&source, &target),
            source,
            target,
            kind,
            strength: strength.clamp(0.0, 1.0),
            label: label.into(),
            created_at,
        }
    }
}
