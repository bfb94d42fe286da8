//! The structured result of external content analysis

use serde::{Deserialize, Serialize};

/// Maximum number of concepts an analysis may carry.
pub const MAX_CONCEPTS: usize = 10;

/// Maximum number of related topics an analysis may carry.
pub const MAX_RELATED_TOPICS: usize = 5;

/// Structured analysis of a captured page, as returned by the external model.
///
/// The analysis client enforces the shape invariants (concept and topic caps,
/// confidence range) before an instance reaches the rest of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Key concepts mentioned by the page (at most [`MAX_CONCEPTS`])
    pub concepts: Vec<String>,

    /// Short summary of the page
    pub summary: String,

    /// Content-type label assigned by the model
    pub content_type: String,

    /// Author, when the model could identify one
    pub author: Option<String>,

    /// The single main topic of the page
    pub main_topic: String,

    /// Related topics (at most [`MAX_RELATED_TOPICS`])
    pub related_topics: Vec<String>,

    /// Model confidence in this analysis, in [0, 1]
    pub confidence: f64,
}

impl ContentAnalysis {
    /// Enforce the shape invariants in place: caps on list lengths,
    /// confidence clamped to [0, 1], blank concepts dropped.
    pub fn sanitize(&mut self) {
        self.concepts.retain(|c| !c.trim().is_empty());
        self.concepts.truncate(MAX_CONCEPTS);
        self.related_topics.truncate(MAX_RELATED_TOPICS);
        self.confidence = self.confidence.clamp(0.0, 1.0);
    }
}
