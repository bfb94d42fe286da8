//! Trellis Server binary
//!
//! Starts the HTTP messaging surface for capture submission, graph reads,
//! search, and settings updates.

use std::env;
use std::process;
use trellis_server::{config::ServerConfig, start_server, ServerError};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Trellis Server - knowledge-graph ingestion service");
    println!();
    println!("USAGE:");
    println!("    trellis-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 7464)");
    println!("    - db_path: SQLite database path (default 'trellis.db')");
    println!();
    println!("    The analysis API key is read from stored settings, or from");
    println!("    the GEMINI_API_KEY environment variable as a fallback.");
}
