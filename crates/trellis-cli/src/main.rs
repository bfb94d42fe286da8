//! Trellis CLI - command-line interface for the local knowledge graph.

use clap::Parser;
use trellis_cli::commands;
use trellis_cli::{Cli, CliConfig, Command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load().unwrap_or_else(|_| {
        let cfg = CliConfig::default();
        cfg.save().ok();
        cfg
    });
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    match cli.command {
        Command::Serve(args) => {
            let server_config = match args.config {
                Some(path) => trellis_server::config::ServerConfig::from_file(path)?,
                None => {
                    let mut server_config = trellis_server::config::ServerConfig::default();
                    server_config.db_path =
                        config.prepared_db_path()?.to_string_lossy().into_owned();
                    server_config
                }
            };
            trellis_server::start_server(server_config).await?;
        }
        command => {
            let store = commands::open_store(&config.prepared_db_path()?)?;
            match command {
                Command::Capture(args) => commands::capture::execute(args, store).await?,
                Command::Search(args) => commands::search::execute(args, store).await?,
                Command::Graph(args) => commands::graph::execute(args, store)?,
                Command::Related(args) => commands::related::execute(args, store).await?,
                Command::Sweep(args) => commands::sweep::execute(args, store)?,
                Command::Settings(args) => commands::settings::execute(args, store)?,
                Command::Serve(_) => unreachable!(),
            }
        }
    }

    Ok(())
}
