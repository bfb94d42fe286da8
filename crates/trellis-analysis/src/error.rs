//! Error types for the analysis client

use thiserror::Error;

/// Errors internal to the analysis client.
///
/// These stay inside the crate: the public `Analyst` surface converts every
/// failure into `None` or an empty result, per the system's error taxonomy.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The queue worker is gone (process shutting down)
    #[error("analysis queue closed")]
    QueueClosed,

    /// The model call itself failed
    #[error("model error: {0}")]
    Model(String),
}
