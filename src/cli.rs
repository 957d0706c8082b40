//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! validated `StartupConfig` for the cache, API client and catch RNG.

use clap::Parser;
use std::time::Duration;
use thiserror::Error;

use crate::data::DEFAULT_BASE_URL;

/// Default cache interval in seconds (5 minutes)
pub const DEFAULT_CACHE_INTERVAL_SECS: u64 = 300;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A zero interval would make the cache reaper spin
    #[error("Invalid cache interval: must be at least 1 second")]
    InvalidInterval,
}

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Seconds a cached API response stays fresh; stale responses are purged on
    /// the same cadence
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_INTERVAL_SECS)]
    pub cache_interval: u64,

    /// Root URL of the PokeAPI instance to query
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seed for catch attempts, for reproducible sessions
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub cache_interval: Duration,
    pub base_url: String,
    pub seed: Option<u64>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
            seed: None,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError::InvalidInterval)` if the cache interval is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::InvalidInterval);
        }
        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: cli.base_url.clone(),
            seed: cli.seed,
        })
    }
}
