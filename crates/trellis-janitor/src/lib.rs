//! Trellis Janitor
//!
//! Background maintenance: age-based eviction of archived content and page
//! nodes, with optional edge cascade.
//!
//! # Overview
//!
//! The Janitor removes ProcessedContent records and page nodes older than the
//! configured maximum age. Concept nodes are never evicted; they are cheap
//! and accumulate value over time. With the edge cascade enabled (the
//! default), edges left dangling by a pass are removed in the same pass, so
//! no edge ever references a missing node.
//!
//! Passes are opportunistic rather than scheduled: [`Janitor::maybe_sweep`]
//! runs at most once per configured gap (default: daily), however often it
//! is called. [`Janitor::sweep`] bypasses the throttle.
//!
//! # Usage
//!
//! ## One-time sweep
//!
//! ```no_run
//! use trellis_janitor::{Janitor, JanitorConfig};
//! use trellis_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("trellis.db")?;
//! let mut janitor = Janitor::new(JanitorConfig::default());
//! let stats = janitor.sweep(&mut store)?;
//! println!("{}", janitor.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background worker
//!
//! ```no_run
//! use trellis_janitor::{JanitorWorker, JanitorConfig};
//! use trellis_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::new("trellis.db")?;
//!     let mut worker = JanitorWorker::new(JanitorConfig::default());
//!     worker.run(store).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;
mod worker;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::{Janitor, SweepOutcome};
pub use metrics::JanitorMetrics;
pub use worker::JanitorWorker;
