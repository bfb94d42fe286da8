//! Trellis CLI - operator interface for the local knowledge graph.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::CliConfig;
