//! Result types for the non-content analysis calls

use serde::{Deserialize, Serialize};

/// A scored relationship between a concept and an existing concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRelation {
    /// The existing concept this one relates to
    pub concept: String,

    /// Similarity score in [0, 1]
    pub similarity: f64,
}

/// Semantic expansion of a search query.
///
/// The empty default is the failure value: callers treat it as "search the
/// literal query only".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryExpansion {
    /// Alternative phrasings of the query
    pub variations: Vec<String>,

    /// Concepts related to the query
    pub related_concepts: Vec<String>,

    /// Intent classification (informational, navigational, exploratory, ...)
    pub intent: String,
}

impl QueryExpansion {
    /// Whether the expansion carries anything usable.
    pub fn is_empty(&self) -> bool {
        self.variations.is_empty() && self.related_concepts.is_empty()
    }
}
