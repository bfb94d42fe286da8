//! Parse model output into structured records
//!
//! Models sometimes wrap JSON in markdown code fences despite instructions;
//! the fence is stripped before parsing. Anything that still fails to parse
//! becomes `None` / empty — a skipped item, never an error.

use crate::types::{ConceptRelation, QueryExpansion};
use serde::Deserialize;
use tracing::warn;
use trellis_domain::ContentAnalysis;

/// Strip a markdown code fence if the response is wrapped in one.
fn strip_fences(response: &str) -> String {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Drop the opening fence line (``` or ```json) and the closing fence.
        return lines[1..lines.len().saturating_sub(1)].join("\n");
    }
    trimmed.to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    concepts: Vec<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    main_topic: Option<String>,
    #[serde(default)]
    related_topics: Vec<String>,
    #[serde(default)]
    confidence: f64,
}

/// Parse a content-analysis response. `None` on any shape problem.
pub(crate) fn parse_analysis(response: &str) -> Option<ContentAnalysis> {
    let json = strip_fences(response);
    let raw: RawAnalysis = match serde_json::from_str(&json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("unparseable analysis response: {}", e);
            return None;
        }
    };

    if raw.concepts.is_empty() {
        warn!("analysis response carried no concepts, skipping");
        return None;
    }

    let mut analysis = ContentAnalysis {
        concepts: raw.concepts,
        summary: raw.summary,
        content_type: raw.content_type.unwrap_or_else(|| "article".to_string()),
        author: raw.author,
        main_topic: raw.main_topic.unwrap_or_default(),
        related_topics: raw.related_topics,
        confidence: raw.confidence,
    };
    analysis.sanitize();
    Some(analysis)
}

#[derive(Deserialize)]
struct RawRelation {
    concept: String,
    similarity: f64,
}

/// Parse a relationship-scoring response: drop scores below `threshold`,
/// keep the strongest `max` relations. Empty on any shape problem.
pub(crate) fn parse_relations(response: &str, threshold: f64, max: usize) -> Vec<ConceptRelation> {
    let json = strip_fences(response);
    let raw: Vec<RawRelation> = match serde_json::from_str(&json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("unparseable relation response: {}", e);
            return Vec::new();
        }
    };

    let mut relations: Vec<ConceptRelation> = raw
        .into_iter()
        .filter(|r| r.similarity >= threshold)
        .map(|r| ConceptRelation {
            concept: r.concept,
            similarity: r.similarity.clamp(0.0, 1.0),
        })
        .collect();
    relations.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    relations.truncate(max);
    relations
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExpansion {
    #[serde(default)]
    variations: Vec<String>,
    #[serde(default)]
    related_concepts: Vec<String>,
    #[serde(default)]
    intent: String,
}

/// Parse a query-expansion response. The empty default on any shape problem.
pub(crate) fn parse_expansion(response: &str) -> QueryExpansion {
    let json = strip_fences(response);
    match serde_json::from_str::<RawExpansion>(&json) {
        Ok(raw) => QueryExpansion {
            variations: raw.variations,
            related_concepts: raw.related_concepts,
            intent: raw.intent,
        },
        Err(e) => {
            warn!("unparseable expansion response: {}", e);
            QueryExpansion::default()
        }
    }
}
