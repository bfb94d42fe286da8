//! Trellis Language-Model Layer
//!
//! Pluggable access to the external content-analysis model.
//!
//! # Architecture
//!
//! This crate defines the [`LanguageModel`] trait the analysis client calls
//! through, plus two implementations:
//!
//! - [`GeminiModel`]: the production HTTP backend
//! - [`MockModel`]: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use trellis_llm::{LanguageModel, MockModel};
//!
//! # async fn example() {
//! let model = MockModel::new("Hello from the model");
//! let reply = model.generate("any prompt").await.unwrap();
//! assert_eq!(reply, "Hello from the model");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use thiserror::Error;

pub use gemini::GeminiModel;

/// Errors that can occur when calling the external model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the service
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code returned by the service
        status: u16,
        /// Response body, for the log line
        body: String,
    },

    /// Response arrived but its shape was not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key is configured
    #[error("API key not configured")]
    MissingApiKey,
}

/// Text-generation interface to the external model.
///
/// One call, one prompt, one generated string. Rate limiting and response
/// parsing are the analysis client's concern, not the model's.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// What the mock returns for a given prompt.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Deterministic model for tests.
///
/// Returns canned responses without any network traffic and records the
/// instant and prompt of every call, so tests can assert call ordering and
/// spacing.
///
/// # Examples
///
/// ```
/// use trellis_llm::{LanguageModel, MockModel};
///
/// # async fn example() {
/// let model = MockModel::new("default");
/// model.add_response("ping", "pong");
/// assert_eq!(model.generate("ping").await.unwrap(), "pong");
/// assert_eq!(model.generate("other").await.unwrap(), "default");
/// assert_eq!(model.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<(Instant, String)>>>,
}

impl MockModel {
    /// Create a mock with a fixed response for all prompts.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a specific response for prompts containing `fragment`.
    ///
    /// Prompts are matched by substring so tests don't have to reproduce
    /// whole prompt templates.
    pub fn add_response(&self, fragment: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(fragment.into(), MockReply::Text(response.into()));
    }

    /// Register an error for prompts containing `fragment`.
    pub fn add_error(&self, fragment: impl Into<String>, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(fragment.into(), MockReply::Error(message.into()));
    }

    /// Number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Instants at which each call arrived, in call order.
    pub fn call_instants(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (fragment, reply) in responses.iter() {
            if prompt.contains(fragment.as_str()) {
                return match reply {
                    MockReply::Text(text) => Ok(text.clone()),
                    MockReply::Error(msg) => Err(ModelError::Communication(msg.clone())),
                };
            }
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response() {
        let model = MockModel::new("fixed");
        assert_eq!(model.generate("anything").await.unwrap(), "fixed");
    }

    #[tokio::test]
    async fn test_mock_fragment_matching() {
        let model = MockModel::default();
        model.add_response("alpha", "a");
        model.add_response("beta", "b");

        assert_eq!(model.generate("prompt with alpha inside").await.unwrap(), "a");
        assert_eq!(model.generate("beta goes here").await.unwrap(), "b");
        assert_eq!(model.generate("neither").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let model = MockModel::default();
        model.generate("first").await.unwrap();
        model.generate("second").await.unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(model.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_mock_scripted_error() {
        let model = MockModel::default();
        model.add_error("bad", "scripted failure");

        let result = model.generate("a bad prompt").await;
        assert!(matches!(result, Err(ModelError::Communication(_))));
        // The failed call is still recorded.
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_clone_shares_call_log() {
        let model = MockModel::new("x");
        let clone = model.clone();
        model.generate("one").await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }
}
