//! Show or edit settings.

use super::lock;
use crate::cli::SettingsArgs;
use anyhow::{bail, Result};
use std::sync::{Arc, Mutex};
use trellis_domain::traits::GraphStore;
use trellis_store::SqliteStore;

pub fn execute(args: SettingsArgs, store: Arc<Mutex<SqliteStore>>) -> Result<()> {
    let mut store = lock(&store)?;
    let mut settings = store.load_settings()?;

    let editing = args.api_key.is_some()
        || args.min_words.is_some()
        || args.auto_capture.is_some()
        || args.add_skip_domain.is_some();

    if !editing {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(min_words) = args.min_words {
        settings.min_content_words = min_words;
    }
    if let Some(auto_capture) = args.auto_capture {
        settings.auto_capture = auto_capture;
    }
    if let Some(domain) = args.add_skip_domain {
        if !settings.skip_domains.contains(&domain) {
            settings.skip_domains.push(domain);
        }
    }

    if let Err(e) = settings.validate() {
        bail!("not saved: {}", e);
    }
    store.save_settings(&settings)?;
    println!("Settings saved");
    Ok(())
}
