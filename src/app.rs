//! Application state and the REPL loop for the Pokedex CLI
//!
//! This module holds the session state (paging cursor, caught Pokemon, catch RNG),
//! executes parsed commands against the API client, and drives the read-eval-print
//! loop over any async line source and any output sink.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::command::{Command, COMMANDS};
use crate::data::{ApiError, PokeApiClient};
use crate::pokedex::{is_caught, roll_catch, Pokedex};

/// Prompt printed before every input line
pub const PROMPT: &str = "Pokedex > ";

/// Errors that can end or interrupt a command
#[derive(Debug, Error)]
pub enum AppError {
    /// The API call behind a command failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading from the input failed
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// Writing to the output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether the REPL should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Session state for one REPL run
pub struct App {
    client: PokeApiClient,
    /// URL `map` fetches next; `None` once the last page was shown
    next: Option<String>,
    /// URL `mapb` fetches; `None` on the first page
    previous: Option<String>,
    pokedex: Pokedex,
    rng: StdRng,
}

impl App {
    /// Creates a session starting before the first location page.
    ///
    /// # Arguments
    /// * `client` - API client, carrying the shared response cache
    /// * `seed` - Fixed seed for catch rolls, or `None` for entropy
    pub fn new(client: PokeApiClient, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            next: Some(client.first_location_page_url()),
            previous: None,
            client,
            pokedex: Pokedex::new(),
            rng,
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Reads commands from `input` until `exit` or end of input.
    ///
    /// Parse errors and API errors are reported on `out` and the loop carries on.
    /// Bytes that are not UTF-8 are replaced rather than rejected. Only an I/O
    /// failure on `input` or `out` ends the loop with an error.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut buf = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .await
                .map_err(AppError::Read)?;
            if read == 0 {
                writeln!(out)?;
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let command = match Command::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };

            debug!(?command, "Executing command");
            match self.execute(command, out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(AppError::Api(e)) => writeln!(out, "Error: {e}")?,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Executes a single command, writing its output to `out`
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, AppError> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => match self.next.clone() {
                Some(url) => self.show_location_page(&url, out).await?,
                None => writeln!(out, "You're on the last page")?,
            },
            Command::MapBack => match self.previous.clone() {
                Some(url) => self.show_location_page(&url, out).await?,
                None => writeln!(out, "You're on the first page")?,
            },
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "{}: {}", info.usage, info.description)?;
        }
        Ok(())
    }

    async fn show_location_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<(), AppError> {
        let page = self.client.fetch_location_page(url).await?;
        self.next = page.next;
        self.previous = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), AppError> {
        writeln!(out, "Exploring {area}...")?;
        let location = self.client.fetch_location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &location.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), AppError> {
        let pokemon = self.client.fetch_pokemon(name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        let difficulty = pokemon.base_experience.unwrap_or(0);
        let roll = roll_catch(&mut self.rng, difficulty);
        debug!(pokemon = %pokemon.name, difficulty, roll, "Catch roll");

        if is_caught(difficulty, roll) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> std::io::Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            return writeln!(out, "you have not caught that pokemon");
        };
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for slot in &pokemon.types {
            writeln!(out, "  - {}", slot.kind.name)?;
        }
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.pokedex.is_empty() {
            return writeln!(out, "Your Pokedex is empty");
        }
        writeln!(out, "Your Pokedex ({} caught):", self.pokedex.len())?;
        for name in self.pokedex.names() {
            writeln!(out, " - {name}")?;
        }
        Ok(())
    }
}
