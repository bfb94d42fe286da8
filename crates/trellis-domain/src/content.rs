//! Content records flowing through the ingestion pipeline

use crate::analysis::ContentAnalysis;
use crate::ident::{digest_id, normalize_url};
use serde::{Deserialize, Serialize};

/// Metadata attached to a capture at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Domain the page was served from
    pub domain: String,

    /// Heuristically detected content type (research, documentation, ...)
    pub content_type: String,

    /// Word count of the cleaned body text
    pub word_count: usize,
}

/// Text and metadata lifted from a visited page.
///
/// Ephemeral: produced by the capture step, consumed immediately by the
/// pipeline, and persisted only as part of [`ProcessedContent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedContent {
    /// Source URL
    pub url: String,

    /// Resolved page title
    pub title: String,

    /// Cleaned plain-text body
    pub text: String,

    /// When the capture happened (unix seconds)
    pub captured_at: u64,

    /// Extraction-time metadata
    pub metadata: PageMetadata,
}

/// A captured page plus its analysis, archived by URL.
///
/// One record per distinct URL; a later capture of the same URL replaces the
/// record wholesale. Owned by the graph store, mutated only through the
/// pipeline's store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedContent {
    /// Identifier derived from the normalized URL
    pub id: String,

    /// Source URL
    pub url: String,

    /// Resolved page title
    pub title: String,

    /// Cleaned plain-text body
    pub text: String,

    /// Domain the page was served from
    pub domain: String,

    /// Heuristically detected content type
    pub content_type: String,

    /// Word count of the body
    pub word_count: usize,

    /// When the capture happened (unix seconds)
    pub captured_at: u64,

    /// External analysis of the content
    pub analysis: ContentAnalysis,
}

impl ProcessedContent {
    /// Derive the archive identifier for a URL.
    pub fn id_for_url(url: &str) -> String {
        digest_id(&normalize_url(url))
    }

    /// Fold a capture and its analysis into the persistent record.
    pub fn from_capture(capture: CapturedContent, analysis: ContentAnalysis) -> Self {
        Self {
            id: Self::id_for_url(&capture.url),
            url: capture.url,
            title: capture.title,
            text: capture.text,
            domain: capture.metadata.domain,
            content_type: capture.metadata.content_type,
            word_count: capture.metadata.word_count,
            captured_at: capture.captured_at,
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(url: &str) -> CapturedContent {
        CapturedContent {
            url: url.to_string(),
            title: "Title".to_string(),
            text: "Body text".to_string(),
            captured_at: 1_700_000_000,
            metadata: PageMetadata {
                domain: "example.com".to_string(),
                content_type: "article".to_string(),
                word_count: 2,
            },
        }
    }

    #[test]
    fn test_id_matches_page_node_derivation() {
        use crate::node::NodeId;

        let url = "https://example.com/post/";
        assert_eq!(
            ProcessedContent::id_for_url(url),
            NodeId::for_page(url).as_str()
        );
    }

    #[test]
    fn test_from_capture_carries_fields() {
        let analysis = ContentAnalysis {
            concepts: vec!["ai".to_string()],
            summary: "s".to_string(),
            content_type: "article".to_string(),
            author: None,
            main_topic: "ai".to_string(),
            related_topics: vec![],
            confidence: 0.9,
        };
        let processed = ProcessedContent::from_capture(capture("https://example.com/a"), analysis);
        assert_eq!(processed.url, "https://example.com/a");
        assert_eq!(processed.domain, "example.com");
        assert_eq!(processed.word_count, 2);
        assert_eq!(processed.id, ProcessedContent::id_for_url("https://example.com/a"));
    }
}
