//! Run an eviction pass.

use super::lock;
use crate::cli::SweepArgs;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use trellis_janitor::{Janitor, JanitorConfig, SweepOutcome};
use trellis_store::SqliteStore;

pub fn execute(args: SweepArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let mut janitor = Janitor::new(JanitorConfig::default());
    let mut store = lock(&store)?;

    if args.force {
        let stats = janitor.sweep(&mut *store)?;
        println!(
            "Removed {} content records, {} page nodes, {} edges",
            stats.content_removed, stats.nodes_removed, stats.edges_removed
        );
        return Ok(());
    }

    match janitor.maybe_sweep(&mut *store)? {
        SweepOutcome::Swept(stats) => println!(
            "Removed {} content records, {} page nodes, {} edges",
            stats.content_removed, stats.nodes_removed, stats.edges_removed
        ),
        SweepOutcome::Skipped => {
            println!("A pass already ran recently; use --force to run anyway")
        }
    }
    Ok(())
}
