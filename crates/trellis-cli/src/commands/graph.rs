//! Show the graph.

use super::lock;
use crate::cli::GraphArgs;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use trellis_domain::traits::GraphStore;
use trellis_domain::NodeKind;
use trellis_store::SqliteStore;

pub fn execute(args: GraphArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let snapshot = lock(&store)?.graph_snapshot()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let pages = snapshot.nodes.iter().filter(|n| n.kind == NodeKind::Page).count();
    let concepts = snapshot
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Concept)
        .count();
    println!(
        "{} nodes ({} pages, {} concepts), {} edges",
        snapshot.nodes.len(),
        pages,
        concepts,
        snapshot.edges.len()
    );

    let mut nodes = snapshot.nodes;
    nodes.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    for node in nodes.iter().take(20) {
        println!(
            "  [{:>7}] {:<40} importance {:.1}",
            node.kind.as_str(),
            node.label,
            node.importance
        );
    }
    if nodes.len() > 20 {
        println!("  ... and {} more (use --json for the full snapshot)", nodes.len() - 20);
    }
    Ok(())
}
