//! Error types for the pipeline

use thiserror::Error;

/// Errors that can occur during ingestion.
///
/// Only storage problems surface as errors; every content-level problem
/// (ineligible, duplicate, unanalyzable) is an [`crate::IngestOutcome`]
/// variant instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Graph store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// The in-flight set mutex was poisoned
    #[error("Pipeline state poisoned: {0}")]
    Poisoned(String),
}
