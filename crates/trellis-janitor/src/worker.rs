//! Background worker for continuous Janitor operation

use crate::{Janitor, JanitorConfig, JanitorError};
use tokio::time::interval;
use trellis_domain::traits::GraphStore;

/// Runs the Janitor on a schedule.
///
/// Wakes up every `sweep_interval` and offers the Janitor a chance to run;
/// the once-per-gap throttle inside [`Janitor::maybe_sweep`] decides whether
/// anything actually happens.
pub struct JanitorWorker {
    janitor: Janitor,
    config: JanitorConfig,
}

impl JanitorWorker {
    /// Create a new background worker with the given configuration.
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            janitor: Janitor::new(config.clone()),
            config,
        }
    }

    /// Run until a shutdown signal (Ctrl+C) is received.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), JanitorError>
    where
        S: GraphStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.config.sweep_interval());

        tracing::info!(
            "Janitor worker started (interval: {:?})",
            self.config.sweep_interval()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.janitor.maybe_sweep(&mut store) {
                        tracing::error!("Sweep failed: {}", e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping janitor");
                    break;
                }
            }
        }

        tracing::info!("Janitor stopped. {}", self.janitor.metrics().summary());
        Ok(())
    }

    /// Offer the Janitor a fixed number of chances to run, without waiting
    /// between them (useful for testing).
    pub async fn run_cycles<S>(&mut self, mut store: S, cycles: usize) -> Result<(), JanitorError>
    where
        S: GraphStore,
        S::Error: std::fmt::Display,
    {
        for _ in 0..cycles {
            self.janitor.maybe_sweep(&mut store)?;
        }
        Ok(())
    }

    /// Metrics accumulated so far.
    pub fn metrics(&self) -> &crate::JanitorMetrics {
        self.janitor.metrics()
    }
}
