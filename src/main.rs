//! Pokedex CLI - explore the Pokemon world from your terminal
//!
//! An interactive REPL that pages through location areas, explores them, and
//! catches and inspects Pokemon using PokeAPI. Responses are cached in memory.

use std::io;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use pokedex::app::App;
use pokedex::cache::ResponseCache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::data::PokeApiClient;

/// Logs go to stderr so they never interleave with REPL output on stdout
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli)?;
    tracing::debug!(?config, "Starting Pokedex");

    let cache = Arc::new(ResponseCache::new(config.cache_interval)?);
    tracing::info!(interval = ?cache.interval(), "Response cache ready");
    let client = PokeApiClient::with_base_url(Arc::clone(&cache), config.base_url);
    let mut app = App::new(client, config.seed);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let result = app.run(stdin, &mut stdout).await;

    cache.shutdown().await;
    result?;
    Ok(())
}
