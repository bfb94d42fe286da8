//! The Analyst - the public face of the analysis client

use crate::config::AnalysisConfig;
use crate::parser::{parse_analysis, parse_expansion, parse_relations};
use crate::prompt::{analysis_prompt, expansion_prompt, relation_prompt};
use crate::queue::RateLimitedClient;
use crate::types::{ConceptRelation, QueryExpansion};
use std::sync::Arc;
use tracing::{info, warn};
use trellis_domain::ContentAnalysis;
use trellis_llm::LanguageModel;

/// Analyzes captured content through the shared rate-limited queue.
///
/// Every public method swallows failures: the pipeline's contract is that an
/// unavailable or misbehaving model means "skip this item", never a crash.
pub struct Analyst {
    client: RateLimitedClient,
    config: AnalysisConfig,
}

impl Analyst {
    /// Create an Analyst over the given model.
    pub fn new(model: Arc<dyn LanguageModel>, config: AnalysisConfig) -> Self {
        let client = RateLimitedClient::new(model, config.min_call_interval());
        Self { client, config }
    }

    /// Analyze page text. `None` means "skip this item".
    pub async fn analyze(&self, text: &str, url: &str) -> Option<ContentAnalysis> {
        let prompt = analysis_prompt(text, url, self.config.max_prompt_chars);
        match self.client.generate(prompt).await {
            Ok(raw) => {
                let analysis = parse_analysis(&raw);
                if let Some(a) = &analysis {
                    info!(url, concepts = a.concepts.len(), "content analyzed");
                }
                analysis
            }
            Err(e) => {
                warn!(url, "analysis call failed: {}", e);
                None
            }
        }
    }

    /// Score how a concept relates to existing concepts. Empty on failure or
    /// when there is nothing to score against.
    pub async fn score_relationships(
        &self,
        concept: &str,
        existing: &[String],
    ) -> Vec<ConceptRelation> {
        if existing.is_empty() {
            return Vec::new();
        }
        let prompt = relation_prompt(concept, existing);
        match self.client.generate(prompt).await {
            Ok(raw) => parse_relations(
                &raw,
                self.config.similarity_threshold,
                self.config.max_relations,
            ),
            Err(e) => {
                warn!(concept, "relationship scoring failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Expand a search query. The empty default on failure.
    pub async fn expand_query(&self, query: &str) -> QueryExpansion {
        let prompt = expansion_prompt(query);
        match self.client.generate(prompt).await {
            Ok(raw) => parse_expansion(&raw),
            Err(e) => {
                warn!(query, "query expansion failed: {}", e);
                QueryExpansion::default()
            }
        }
    }
}
