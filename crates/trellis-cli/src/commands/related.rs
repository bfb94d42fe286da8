//! Score a concept against the graph's existing concepts.

use super::{build_analyst, lock};
use crate::cli::RelatedArgs;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use trellis_domain::traits::GraphStore;
use trellis_domain::NodeKind;
use trellis_store::SqliteStore;

pub async fn execute(args: RelatedArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let existing: Vec<String> = lock(&store)?
        .graph_snapshot()?
        .nodes
        .into_iter()
        .filter(|n| n.kind == NodeKind::Concept)
        .map(|n| n.label)
        .collect();

    if existing.is_empty() {
        println!("The graph has no concepts yet");
        return Ok(());
    }

    let analyst = build_analyst(&store)?;
    let relations = analyst.score_relationships(&args.concept, &existing).await;

    if relations.is_empty() {
        println!("No meaningful relationships found for '{}'", args.concept);
        return Ok(());
    }

    for relation in relations {
        println!("{:.2}  {}", relation.similarity, relation.concept);
    }
    Ok(())
}
