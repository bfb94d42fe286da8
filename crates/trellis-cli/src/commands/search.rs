//! Search archived content.

use super::{build_analyst, lock};
use crate::cli::SearchArgs;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use trellis_domain::traits::GraphStore;
use trellis_store::SqliteStore;

pub async fn execute(args: SearchArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let mut queries = vec![args.query.clone()];

    if args.expand {
        let analyst = build_analyst(&store)?;
        let expansion = analyst.expand_query(&args.query).await;
        if expansion.is_empty() {
            println!("(query expansion unavailable, searching literally)");
        } else {
            println!("Expanded via: {}", expansion.variations.join(", "));
            queries.extend(expansion.variations);
            queries.extend(expansion.related_concepts);
        }
    }

    let mut seen = HashSet::new();
    let mut hits = Vec::new();
    {
        let store = lock(&store)?;
        for query in &queries {
            for hit in store.search_content(query)? {
                if seen.insert(hit.id.clone()) {
                    hits.push(hit);
                }
            }
        }
    }
    hits.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));

    if hits.is_empty() {
        println!("No matches for '{}'", args.query);
        return Ok(());
    }

    for hit in hits {
        println!("{}  {}", hit.title, hit.url);
        if !hit.summary.is_empty() {
            println!("    {}", hit.summary);
        }
    }
    Ok(())
}
