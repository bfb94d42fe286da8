//! Command implementations.

pub mod capture;
pub mod graph;
pub mod related;
pub mod search;
pub mod settings;
pub mod sweep;

use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use trellis_analysis::{AnalysisConfig, Analyst};
use trellis_domain::traits::GraphStore;
use trellis_llm::GeminiModel;
use trellis_store::SqliteStore;

pub fn open_store(db_path: &Path) -> Result<Arc<Mutex<SqliteStore>>> {
    let store = SqliteStore::new(db_path)?;
    Ok(Arc::new(Mutex::new(store)))
}

pub(crate) fn lock<'a>(
    store: &'a Arc<Mutex<SqliteStore>>,
) -> Result<std::sync::MutexGuard<'a, SqliteStore>> {
    store.lock().map_err(|e| anyhow!("store poisoned: {}", e))
}

/// Build an analyst from the stored API key, falling back to GEMINI_API_KEY.
pub(crate) fn build_analyst(store: &Arc<Mutex<SqliteStore>>) -> Result<Arc<Analyst>> {
    let settings = lock(store)?.load_settings()?;
    let api_key = if settings.api_key.is_empty() {
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    } else {
        settings.api_key
    };
    Ok(Arc::new(Analyst::new(
        Arc::new(GeminiModel::new(api_key)),
        AnalysisConfig::default(),
    )))
}
