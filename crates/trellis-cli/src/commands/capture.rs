//! Ingest a saved HTML file.

use super::{build_analyst, lock};
use crate::cli::CaptureArgs;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use trellis_capture::{capture_page, CaptureConfig};
use trellis_domain::traits::GraphStore;
use trellis_pipeline::{IngestOutcome, Pipeline};
use trellis_store::SqliteStore;

pub async fn execute(args: CaptureArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let html = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let mut config = CaptureConfig::default();
    config.skip_domains.extend(lock(&store)?.load_settings()?.skip_domains);

    let captured = match capture_page(&args.url, &html, &config) {
        Ok(captured) => captured,
        Err(rejection) => {
            println!("Not captured: {}", rejection);
            return Ok(());
        }
    };

    println!(
        "Captured '{}' ({} words, {})",
        captured.title, captured.metadata.word_count, captured.metadata.content_type
    );

    let analyst = build_analyst(&store)?;
    let pipeline = Pipeline::new(store, analyst);

    match pipeline.ingest(captured).await? {
        IngestOutcome::Ingested {
            page,
            concepts,
            edges_added,
        } => {
            println!("Ingested page {} ({} concepts, {} new edges)", page, concepts, edges_added);
        }
        IngestOutcome::DuplicateUrl => println!("Already archived; nothing to do"),
        IngestOutcome::AlreadyInFlight => println!("Already being ingested"),
        IngestOutcome::BelowMinimumLength { words, min } => {
            println!("Skipped: {} words is below the configured minimum of {}", words, min)
        }
        IngestOutcome::AnalysisUnavailable => {
            println!("Analysis unavailable; nothing stored (is an API key configured?)")
        }
    }

    Ok(())
}
