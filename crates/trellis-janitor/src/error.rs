//! Error types for the Janitor

use thiserror::Error;

/// Errors that can occur during maintenance operations.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Graph store operation failed
    #[error("Store error: {0}")]
    Store(String),
}
