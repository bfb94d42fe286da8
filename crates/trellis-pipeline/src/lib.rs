//! Trellis Ingestion Pipeline
//!
//! Orchestrates the path from a captured page to a committed graph update:
//!
//! ```text
//! CapturedContent → dedup → Analyst → ProcessedContent → graph delta → GraphStore
//! ```
//!
//! # Guarantees
//!
//! - Idempotent per URL: a second ingestion of an already-archived URL is a
//!   no-op (strict first-write-wins, no content comparison)
//! - Concurrent ingestion of the *same* URL is suppressed by an in-memory
//!   in-flight set, cleared on every exit path
//! - An unavailable analysis result aborts the ingestion with nothing stored;
//!   there are no partial records
//!
//! Concurrent ingestion of *different* URLs may interleave; individual store
//! mutations are atomic, cross-URL ordering is unspecified.

#![warn(missing_docs)]

mod error;
mod importance;
mod pipeline;

pub use error::PipelineError;
pub use importance::page_importance;
pub use pipeline::{IngestOutcome, Pipeline};
