//! Command-line interface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use console::style;

use crate::config::load_settings;
use crate::ingest::Ingestor;
use crate::scrapers::HttpClient;
use crate::seed;
use crate::server;
use crate::store::MemoryStore;

#[derive(Parser)]
#[command(name = "taikai")]
#[command(about = "Badminton tournament aggregation and search service")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./taikai.toml when present)
    #[arg(long, global = true, env = "TAIKAI_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Load demo data before binding
        #[arg(long)]
        seed: bool,
    },

    /// Run the ingestion pipeline once and report the outcome
    Scrape {
        /// Source ID (defaults to the first configured source)
        source_id: Option<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            seed: with_seed,
        } => {
            let store = Arc::new(MemoryStore::new());
            if with_seed {
                let created = seed::seed(store.as_ref()).await?;
                println!(
                    "{} {} demo tournaments loaded",
                    style("✓").green(),
                    created
                );
            }
            server::serve(&settings, store, &host, port).await
        }

        Commands::Scrape { source_id } => {
            let Some(source) = settings.source(source_id.as_deref()) else {
                bail!("unknown source {:?}", source_id.as_deref().unwrap_or("<first>"));
            };

            let store = Arc::new(MemoryStore::new());
            let ingestor = Ingestor::new(
                store.clone(),
                HttpClient::new(settings.request_timeout()),
                settings.politeness_delay(),
            );

            println!("Scraping {} ...", style(&source.id).cyan());
            let summary = ingestor.ingest(source).await?;
            println!(
                "{} {} scraped, {} new, {} duplicates",
                style("✓").green(),
                summary.scraped,
                summary.inserted,
                summary.skipped
            );
            Ok(())
        }
    }
}
