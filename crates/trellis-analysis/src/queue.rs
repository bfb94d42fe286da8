//! Rate-limited request queue
//!
//! One FIFO queue, one worker. Before each external call the worker waits
//! until the configured minimum interval has elapsed since the previous
//! call's completion, enforcing a global rate limit regardless of how many
//! callers are pending. The queue is unbounded; enqueueing never blocks the
//! producer, and each caller awaits only its own reply.

use crate::error::AnalysisError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};
use trellis_llm::{LanguageModel, ModelError};

struct Job {
    prompt: String,
    reply: oneshot::Sender<Result<String, ModelError>>,
}

/// Serializes all external model calls through one worker task.
#[derive(Clone)]
pub struct RateLimitedClient {
    tx: mpsc::UnboundedSender<Job>,
}

impl RateLimitedClient {
    /// Spawn the worker and return the client handle.
    ///
    /// The worker runs until every handle is dropped.
    pub fn new(model: Arc<dyn LanguageModel>, min_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(worker(model, rx, min_interval));
        Self { tx }
    }

    /// Enqueue a prompt and await its result.
    ///
    /// A model failure is returned to this caller only; the worker moves on
    /// to the next queued job either way.
    pub async fn generate(&self, prompt: String) -> Result<String, AnalysisError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Job {
                prompt,
                reply: reply_tx,
            })
            .map_err(|_| AnalysisError::QueueClosed)?;

        match reply_rx.await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AnalysisError::Model(e.to_string())),
            Err(_) => Err(AnalysisError::QueueClosed),
        }
    }
}

async fn worker(
    model: Arc<dyn LanguageModel>,
    mut rx: mpsc::UnboundedReceiver<Job>,
    min_interval: Duration,
) {
    let mut last_completed: Option<Instant> = None;

    while let Some(job) = rx.recv().await {
        if let Some(last) = last_completed {
            let elapsed = last.elapsed();
            if elapsed < min_interval {
                sleep(min_interval - elapsed).await;
            }
        }

        debug!(prompt_chars = job.prompt.len(), "dispatching model call");
        let result = model.generate(&job.prompt).await;
        last_completed = Some(Instant::now());

        if let Err(e) = &result {
            warn!("model call failed: {}", e);
        }
        // The caller may have given up; that is not the worker's problem.
        let _ = job.reply.send(result);
    }
}
