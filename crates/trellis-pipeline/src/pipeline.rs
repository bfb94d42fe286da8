//! The ingestion pipeline

use crate::error::PipelineError;
use crate::importance::page_importance;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use trellis_analysis::Analyst;
use trellis_domain::analysis::MAX_CONCEPTS;
use trellis_domain::ident::normalize_url;
use trellis_domain::traits::GraphStore;
use trellis_domain::{
    CapturedContent, EdgeKind, GraphEdge, GraphNode, NodeId, ProcessedContent,
};

/// Label written on page→concept edges.
const MENTION_LABEL: &str = "mentions";

/// What an ingestion attempt did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Content was analyzed and committed to the graph
    Ingested {
        /// Id of the page node
        page: NodeId,
        /// Concepts attached to the page
        concepts: usize,
        /// Edges newly created (existing edges are not counted)
        edges_added: usize,
    },

    /// The URL is already archived; nothing was re-analyzed or re-stored
    DuplicateUrl,

    /// Another ingestion of this URL is currently running
    AlreadyInFlight,

    /// Body is shorter than the configured persistence minimum
    BelowMinimumLength {
        /// Words in the capture
        words: usize,
        /// Configured minimum
        min: usize,
    },

    /// The analysis call failed or returned nothing usable; nothing stored
    AnalysisUnavailable,
}

// Removes its URL from the in-flight set on every exit path, including
// panics and early returns.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl InFlightGuard {
    fn acquire(
        set: Arc<Mutex<HashSet<String>>>,
        key: String,
    ) -> Result<Option<Self>, PipelineError> {
        let mut in_flight = set
            .lock()
            .map_err(|e| PipelineError::Poisoned(e.to_string()))?;
        if !in_flight.insert(key.clone()) {
            return Ok(None);
        }
        drop(in_flight);
        Ok(Some(Self { set, key }))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.set.lock() {
            in_flight.remove(&self.key);
        }
    }
}

/// Orchestrates capture → analysis → graph commit.
pub struct Pipeline<S: GraphStore> {
    store: Arc<Mutex<S>>,
    analyst: Arc<Analyst>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl<S> Pipeline<S>
where
    S: GraphStore,
    S::Error: std::fmt::Display,
{
    /// Create a pipeline over a shared store and analyst.
    pub fn new(store: Arc<Mutex<S>>, analyst: Arc<Analyst>) -> Self {
        Self {
            store,
            analyst,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Ingest one captured page. Idempotent per URL.
    pub async fn ingest(&self, content: CapturedContent) -> Result<IngestOutcome, PipelineError> {
        let key = normalize_url(&content.url);
        let _guard = match InFlightGuard::acquire(self.in_flight.clone(), key)? {
            Some(guard) => guard,
            None => {
                debug!(url = %content.url, "ingestion already in flight, skipping");
                return Ok(IngestOutcome::AlreadyInFlight);
            }
        };

        // Gates that need the store: settings and the dedup lookup. The lock
        // is released before the analysis call suspends.
        let settings = {
            let store = self.lock_store()?;
            if store
                .find_content_by_url(&content.url)
                .map_err(Self::store_err)?
                .is_some()
            {
                debug!(url = %content.url, "already archived, skipping");
                return Ok(IngestOutcome::DuplicateUrl);
            }
            store.load_settings().map_err(Self::store_err)?
        };

        if content.metadata.word_count < settings.min_content_words {
            return Ok(IngestOutcome::BelowMinimumLength {
                words: content.metadata.word_count,
                min: settings.min_content_words,
            });
        }

        let Some(analysis) = self.analyst.analyze(&content.text, &content.url).await else {
            return Ok(IngestOutcome::AnalysisUnavailable);
        };

        let captured_at = content.captured_at;
        let page_id = NodeId::for_page(&content.url);
        let importance = page_importance(
            content.metadata.word_count,
            &analysis.content_type,
            analysis.concepts.len(),
        );

        let page_node = GraphNode::page(&content.url, &content.title, importance, captured_at)
            .with_summary(&analysis.summary)
            .with_domain(&content.metadata.domain)
            .with_content_type(&analysis.content_type);

        let concepts = analysis.concepts.clone();
        let strength = analysis.confidence;
        let processed = ProcessedContent::from_capture(content, analysis);

        let mut edges_added = 0;
        {
            let mut store = self.lock_store()?;
            store
                .store_content(processed, settings.max_archive_entries)
                .map_err(Self::store_err)?;
            store.upsert_node(page_node).map_err(Self::store_err)?;

            for concept in concepts.iter().take(MAX_CONCEPTS) {
                let concept_id = NodeId::for_concept(concept);
                match store.get_node(&concept_id).map_err(Self::store_err)? {
                    Some(mut node) => {
                        node.bump_importance(0.5);
                        node.mentioned_by.push(page_id.clone());
                        store.upsert_node(node).map_err(Self::store_err)?;
                    }
                    None => {
                        let node = GraphNode::concept(concept, page_id.clone(), captured_at);
                        store.upsert_node(node).map_err(Self::store_err)?;
                    }
                }

                let edge = GraphEdge::new(
                    page_id.clone(),
                    concept_id,
                    EdgeKind::RelatesTo,
                    strength,
                    MENTION_LABEL,
                    captured_at,
                );
                if store.add_edge(edge).map_err(Self::store_err)? {
                    edges_added += 1;
                }
            }
        }

        info!(page = %page_id, concepts = concepts.len(), edges_added, "page ingested");
        Ok(IngestOutcome::Ingested {
            page: page_id,
            concepts: concepts.len(),
            edges_added,
        })
    }

    fn lock_store(&self) -> Result<std::sync::MutexGuard<'_, S>, PipelineError> {
        self.store
            .lock()
            .map_err(|e| PipelineError::Poisoned(e.to_string()))
    }

    fn store_err(e: S::Error) -> PipelineError {
        PipelineError::Store(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_analysis::AnalysisConfig;
    use trellis_domain::PageMetadata;
    use trellis_llm::MockModel;
    use trellis_store::SqliteStore;

    const ANALYSIS_AI_ETHICS: &str = r#"{
        "concepts": ["AI", "Ethics"],
        "summary": "A page about AI and ethics.",
        "contentType": "article",
        "mainTopic": "AI",
        "relatedTopics": ["Philosophy"],
        "confidence": 0.9
    }"#;

    fn capture(url: &str, text: &str, words: usize) -> CapturedContent {
        CapturedContent {
            url: url.to_string(),
            title: format!("Title of {}", url),
            text: text.to_string(),
            captured_at: 1_700_000_000,
            metadata: PageMetadata {
                domain: "example.com".to_string(),
                content_type: "article".to_string(),
                word_count: words,
            },
        }
    }

    fn pipeline_with(model: MockModel) -> (Pipeline<SqliteStore>, Arc<Mutex<SqliteStore>>) {
        let store = Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap()));
        let mut config = AnalysisConfig::default();
        config.min_call_interval_ms = 1;
        let analyst = Arc::new(Analyst::new(Arc::new(model), config));
        (Pipeline::new(store.clone(), analyst), store)
    }

    #[tokio::test]
    async fn test_ingest_commits_page_concepts_and_edges() {
        let model = MockModel::new(ANALYSIS_AI_ETHICS);
        let (pipeline, store) = pipeline_with(model);

        let outcome = pipeline
            .ingest(capture("https://example.com/a", "alpha body", 500))
            .await
            .unwrap();

        match outcome {
            IngestOutcome::Ingested {
                concepts,
                edges_added,
                ..
            } => {
                assert_eq!(concepts, 2);
                assert_eq!(edges_added, 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let snapshot = store.lock().unwrap().graph_snapshot().unwrap();
        assert_eq!(snapshot.nodes.len(), 3); // 1 page + 2 concepts
        assert_eq!(snapshot.edges.len(), 2);
    }

    #[tokio::test]
    async fn test_dedup_same_url_is_noop() {
        let model = MockModel::new(ANALYSIS_AI_ETHICS);
        let (pipeline, store) = pipeline_with(model.clone());

        let first = pipeline
            .ingest(capture("https://example.com/a", "first version", 500))
            .await
            .unwrap();
        assert!(matches!(first, IngestOutcome::Ingested { .. }));

        // Same URL, different content: strict first-write-wins.
        let second = pipeline
            .ingest(capture("https://example.com/a", "second version", 800))
            .await
            .unwrap();
        assert_eq!(second, IngestOutcome::DuplicateUrl);

        // No re-analysis happened.
        assert_eq!(model.call_count(), 1);

        let store = store.lock().unwrap();
        let archived = store
            .find_content_by_url("https://example.com/a")
            .unwrap()
            .unwrap();
        assert_eq!(archived.text, "first version");

        let pages: Vec<_> = store
            .graph_snapshot()
            .unwrap()
            .nodes
            .into_iter()
            .filter(|n| n.kind == trellis_domain::NodeKind::Page)
            .collect();
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_concept_convergence_across_urls() {
        let model = MockModel::new(r#"{
            "concepts": ["Neural Networks"],
            "summary": "s",
            "contentType": "article",
            "mainTopic": "nn",
            "relatedTopics": [],
            "confidence": 0.8
        }"#);
        let (pipeline, store) = pipeline_with(model);

        pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();
        pipeline
            .ingest(capture("https://example.com/b", "beta", 500))
            .await
            .unwrap();

        let store = store.lock().unwrap();
        let concept = store
            .get_node(&NodeId::for_concept("Neural Networks"))
            .unwrap()
            .unwrap();

        let page_a = NodeId::for_page("https://example.com/a");
        let page_b = NodeId::for_page("https://example.com/b");
        assert_eq!(concept.mentioned_by, vec![page_a, page_b]);

        let snapshot = store.graph_snapshot().unwrap();
        let concept_nodes = snapshot
            .nodes
            .iter()
            .filter(|n| n.kind == trellis_domain::NodeKind::Concept)
            .count();
        assert_eq!(concept_nodes, 1);
        assert_eq!(snapshot.edges.len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_failure_stores_nothing() {
        let model = MockModel::default();
        model.add_error("Text to analyze", "service down");
        let (pipeline, store) = pipeline_with(model);

        let outcome = pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();
        assert_eq!(outcome, IngestOutcome::AnalysisUnavailable);

        let store = store.lock().unwrap();
        assert!(store
            .find_content_by_url("https://example.com/a")
            .unwrap()
            .is_none());
        assert!(store.graph_snapshot().unwrap().nodes.is_empty());
    }

    #[tokio::test]
    async fn test_below_minimum_length_skips_analysis() {
        let model = MockModel::new(ANALYSIS_AI_ETHICS);
        let (pipeline, _store) = pipeline_with(model.clone());

        let outcome = pipeline
            .ingest(capture("https://example.com/a", "tiny", 10))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            IngestOutcome::BelowMinimumLength { words: 10, min: 100 }
        );
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_same_url_suppressed() {
        let model = MockModel::new(ANALYSIS_AI_ETHICS);
        let (pipeline, _store) = pipeline_with(model);

        // On a current-thread runtime the first ingest holds the in-flight
        // guard across its analysis await when the second is polled.
        let (a, b) = tokio::join!(
            pipeline.ingest(capture("https://example.com/a", "alpha", 500)),
            pipeline.ingest(capture("https://example.com/a", "alpha", 500)),
        );

        let outcomes = [a.unwrap(), b.unwrap()];
        assert!(outcomes
            .iter()
            .any(|o| matches!(o, IngestOutcome::Ingested { .. })));
        assert!(outcomes.iter().any(|o| *o == IngestOutcome::AlreadyInFlight));
    }

    #[tokio::test]
    async fn test_in_flight_released_after_completion() {
        let model = MockModel::default();
        model.add_error("Text to analyze", "down");
        let (pipeline, _store) = pipeline_with(model);

        let first = pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();
        assert_eq!(first, IngestOutcome::AnalysisUnavailable);

        // The failed attempt released the guard: the retry is not blocked as
        // in-flight (and, since nothing was stored, not a duplicate either).
        let second = pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();
        assert_eq!(second, IngestOutcome::AnalysisUnavailable);
    }

    #[tokio::test]
    async fn test_end_to_end_two_page_scenario() {
        let model = MockModel::new(ANALYSIS_AI_ETHICS);
        let (pipeline, store) = pipeline_with(model);

        // Page A: 500 words, concepts [AI, Ethics].
        pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();

        {
            let store = store.lock().unwrap();
            let snapshot = store.graph_snapshot().unwrap();
            assert_eq!(snapshot.nodes.len(), 3); // 1 page + 2 concepts
            assert_eq!(snapshot.edges.len(), 2);

            let ai = store.get_node(&NodeId::for_concept("AI")).unwrap().unwrap();
            assert_eq!(ai.importance, 1.0);
            assert_eq!(ai.mentioned_by.len(), 1);
        }

        // Page B: same concepts.
        pipeline
            .ingest(capture("https://example.com/b", "beta", 500))
            .await
            .unwrap();

        let store = store.lock().unwrap();
        let snapshot = store.graph_snapshot().unwrap();

        let pages = snapshot
            .nodes
            .iter()
            .filter(|n| n.kind == trellis_domain::NodeKind::Page)
            .count();
        let concepts = snapshot
            .nodes
            .iter()
            .filter(|n| n.kind == trellis_domain::NodeKind::Concept)
            .count();
        assert_eq!(pages, 2);
        assert_eq!(concepts, 2);
        assert_eq!(snapshot.edges.len(), 4);

        for label in ["AI", "Ethics"] {
            let node = store.get_node(&NodeId::for_concept(label)).unwrap().unwrap();
            assert_eq!(node.importance, 1.5);
            assert_eq!(node.mentioned_by.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_concepts_capped_at_ten() {
        let concepts: Vec<String> = (0..15).map(|i| format!("\"c{}\"", i)).collect();
        let response = format!(
            r#"{{"concepts": [{}], "summary": "s", "contentType": "article",
                "mainTopic": "t", "relatedTopics": [], "confidence": 0.5}}"#,
            concepts.join(",")
        );
        let model = MockModel::new(response);
        let (pipeline, store) = pipeline_with(model);

        let outcome = pipeline
            .ingest(capture("https://example.com/a", "alpha", 500))
            .await
            .unwrap();
        match outcome {
            IngestOutcome::Ingested { concepts, .. } => assert_eq!(concepts, 10),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let snapshot = store.lock().unwrap().graph_snapshot().unwrap();
        assert_eq!(snapshot.edges.len(), 10);
    }
}
