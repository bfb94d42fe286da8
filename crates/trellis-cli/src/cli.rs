//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trellis CLI - browse and maintain the local knowledge graph.
#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP messaging server
    Serve(ServeArgs),

    /// Capture a saved HTML file into the graph
    Capture(CaptureArgs),

    /// Search archived content
    Search(SearchArgs),

    /// Show the graph
    Graph(GraphArgs),

    /// Score a concept against the existing concepts
    Related(RelatedArgs),

    /// Run an eviction pass
    Sweep(SweepArgs),

    /// Show or edit settings
    Settings(SettingsArgs),
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Server config file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for the capture command.
#[derive(Debug, Parser)]
pub struct CaptureArgs {
    /// Path of the HTML file to ingest
    pub file: PathBuf,

    /// URL the file was saved from
    #[arg(short, long)]
    pub url: String,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    /// Widen the query through the analysis model first
    #[arg(long)]
    pub expand: bool,
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// Emit the full snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the related command.
#[derive(Debug, Parser)]
pub struct RelatedArgs {
    /// Concept to score against the graph's existing concepts
    pub concept: String,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Run even if a pass already ran within the configured gap
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the settings command.
#[derive(Debug, Parser)]
pub struct SettingsArgs {
    /// Set the analysis API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the minimum content length in words
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Toggle automatic capture
    #[arg(long)]
    pub auto_capture: Option<bool>,

    /// Add a domain to the skip list
    #[arg(long)]
    pub add_skip_domain: Option<String>,
}
