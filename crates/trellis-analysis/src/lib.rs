//! Trellis Analysis Client
//!
//! Wraps the external language model behind a single rate-limited request
//! queue and converts raw model output into structured records.
//!
//! # Architecture
//!
//! ```text
//! callers → RateLimitedClient (FIFO queue, one worker, enforced spacing)
//!              → LanguageModel (HTTP)
//!              → parser (fence stripping, tolerant JSON)
//! ```
//!
//! All three call kinds (content analysis, concept-relationship scoring,
//! search-query expansion) share the one queue, so the global rate limit
//! holds regardless of caller concurrency.
//!
//! # Failure semantics
//!
//! Network errors, non-success statuses, and unparseable responses are
//! logged and surface as `None` / empty results. They never panic, never
//! propagate, and never halt the queue.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis_analysis::{Analyst, AnalysisConfig};
//! use trellis_llm::MockModel;
//!
//! # async fn example() {
//! let model = MockModel::new(r#"{"concepts":["AI"],"summary":"s","contentType":"article","mainTopic":"AI","relatedTopics":[],"confidence":0.9}"#);
//! let analyst = Analyst::new(Arc::new(model), AnalysisConfig::default());
//!
//! let analysis = analyst.analyze("some page text", "https://example.com").await;
//! assert!(analysis.is_some());
//! # }
//! ```

#![warn(missing_docs)]

mod analyst;
mod config;
mod error;
mod parser;
mod prompt;
mod queue;
mod types;

pub use analyst::Analyst;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use queue::RateLimitedClient;
pub use types::{ConceptRelation, QueryExpansion};
