//! Trellis Server
//!
//! The messaging surface between the capture client, the presentation layer,
//! and the settings UI. Exposes the four request kinds of the system over
//! loopback HTTP: submit a capture, read the graph, search, update settings.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::{info, warn};
use trellis_analysis::{AnalysisConfig, Analyst};
use trellis_capture::CaptureConfig;
use trellis_domain::traits::GraphStore;
use trellis_janitor::{JanitorConfig, JanitorWorker};
use trellis_llm::GeminiModel;
use trellis_pipeline::Pipeline;
use trellis_store::SqliteStore;

/// Server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(String),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared application state for a database path.
///
/// The API key comes from stored settings, falling back to the
/// `GEMINI_API_KEY` environment variable. A missing key is not fatal:
/// analysis calls simply report unavailable until a key is saved.
pub fn build_state(db_path: &str) -> Result<AppState, ServerError> {
    let store = SqliteStore::new(db_path).map_err(|e| ServerError::Store(e.to_string()))?;
    let settings = store
        .load_settings()
        .map_err(|e| ServerError::Store(e.to_string()))?;

    let api_key = if settings.api_key.is_empty() {
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    } else {
        settings.api_key
    };
    if api_key.is_empty() {
        warn!("no API key configured; captures will be rejected as analysis-unavailable");
    }

    let store = Arc::new(Mutex::new(store));
    let analyst = Arc::new(Analyst::new(
        Arc::new(GeminiModel::new(api_key)),
        AnalysisConfig::default(),
    ));

    Ok(AppState {
        store: store.clone(),
        pipeline: Arc::new(Pipeline::new(store, analyst.clone())),
        analyst,
        capture_config: Arc::new(CaptureConfig::default()),
    })
}

/// Start the server: store, pipeline, janitor worker, HTTP listener.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    info!("Starting Trellis server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.db_path);

    let state = build_state(&config.db_path)?;

    // The janitor gets its own connection so sweeps never contend with
    // request handling on the shared one.
    if config.db_path != ":memory:" {
        let janitor_store =
            SqliteStore::new(&config.db_path).map_err(|e| ServerError::Store(e.to_string()))?;
        tokio::spawn(async move {
            let mut worker = JanitorWorker::new(JanitorConfig::default());
            if let Err(e) = worker.run(janitor_store).await {
                warn!("janitor worker stopped: {}", e);
            }
        });
    }

    let app = create_router(state);
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_state_without_key() {
        // In-memory store, no key anywhere: state still builds.
        let state = build_state(":memory:").unwrap();
        let snapshot = state.store.lock().unwrap().graph_snapshot().unwrap();
        assert!(snapshot.nodes.is_empty());
    }
}
