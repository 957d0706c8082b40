//! REPL command parsing
//!
//! Input lines are cleaned into lower-case words and turned into a `Command`.
//! The set of commands is closed; dispatch is a single `match` in the app.

use thiserror::Error;

/// Error types for command parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Unknown command: '{0}'. Type 'help' to list commands")]
    Unknown(String),

    /// The command needs an argument that was not given
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Next page of location areas
    Map,
    /// Previous page of location areas
    MapBack,
    /// List Pokemon found in a location area
    Explore(String),
    /// Try to catch a Pokemon
    Catch(String),
    /// Show a caught Pokemon
    Inspect(String),
    /// List caught Pokemon
    Pokedex,
}

/// Usage line and description of a command, for `help`
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command in the order `help` lists them
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        usage: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        usage: "map",
        description: "Displays the next 20 location areas",
    },
    CommandInfo {
        usage: "mapb",
        description: "Displays the previous 20 location areas",
    },
    CommandInfo {
        usage: "explore <area>",
        description: "Lists the Pokemon found in a location area",
    },
    CommandInfo {
        usage: "catch <pokemon>",
        description: "Throws a Pokeball at a Pokemon",
    },
    CommandInfo {
        usage: "inspect <pokemon>",
        description: "Shows details of a caught Pokemon",
    },
    CommandInfo {
        usage: "pokedex",
        description: "Lists every Pokemon you have caught",
    },
    CommandInfo {
        usage: "exit",
        description: "Exit the Pokedex",
    },
];

/// Splits a line into lower-case words, dropping surrounding and repeated whitespace
pub fn clean_input(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

impl Command {
    /// Parses cleaned words into a command.
    ///
    /// # Returns
    /// * `Ok(None)` for an empty line
    /// * `Ok(Some(Command))` when the first word names a command
    /// * `Err(CommandError)` for unknown commands or missing arguments
    pub fn parse(words: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = |argument: &'static str, command: &'static str| {
            args.first()
                .cloned()
                .ok_or(CommandError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(arg("area", "explore")?),
            "catch" => Command::Catch(arg("pokemon", "catch")?),
            "inspect" => Command::Inspect(arg("pokemon", "inspect")?),
            "pokedex" => Command::Pokedex,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Cleans and parses a raw input line
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        Self::parse(&clean_input(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_trims_and_splits() {
        assert_eq!(clean_input("  hello  world  "), ["hello", "world"]);
        assert_eq!(clean_input("hack the box"), ["hack", "the", "box"]);
        assert_eq!(
            clean_input("gobbles the    turkey  nom nom noooms"),
            ["gobbles", "the", "turkey", "nom", "nom", "noooms"]
        );
    }

    #[test]
    fn test_clean_input_lowercases() {
        assert_eq!(clean_input("Charmander Bulbasaur PIKACHU"), ["charmander", "bulbasaur", "pikachu"]);
    }

    #[test]
    fn test_clean_input_handles_tabs_and_blank_lines() {
        assert_eq!(clean_input("\tcatch\t pidgey \n"), ["catch", "pidgey"]);
        assert!(clean_input("   ").is_empty());
        assert!(clean_input("").is_empty());
    }

    #[test]
    fn test_parse_empty_line_is_none() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_commands_without_arguments() {
        assert_eq!(Command::parse_line("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse_line("EXIT").unwrap(), Some(Command::Exit));
        assert_eq!(Command::parse_line("map").unwrap(), Some(Command::Map));
        assert_eq!(Command::parse_line("mapb").unwrap(), Some(Command::MapBack));
        assert_eq!(Command::parse_line("pokedex").unwrap(), Some(Command::Pokedex));
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            Command::parse_line("explore pastoria-city-area").unwrap(),
            Some(Command::Explore("pastoria-city-area".to_string()))
        );
        assert_eq!(
            Command::parse_line("catch Pikachu").unwrap(),
            Some(Command::Catch("pikachu".to_string()))
        );
        assert_eq!(
            Command::parse_line("inspect pikachu extra words").unwrap(),
            Some(Command::Inspect("pikachu".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        let err = Command::parse_line("catch").unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingArgument {
                command: "catch",
                argument: "pokemon"
            }
        );
        assert_eq!(err.to_string(), "Usage: catch <pokemon>");
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse_line("fly somewhere").unwrap_err();
        assert_eq!(err, CommandError::Unknown("fly".to_string()));
        assert!(err.to_string().contains("fly"));
    }

    #[test]
    fn test_every_listed_command_parses() {
        for info in COMMANDS {
            let line = info.usage.replace('<', "").replace('>', "");
            assert!(
                Command::parse_line(&line).unwrap().is_some(),
                "{} should parse",
                info.usage
            );
        }
    }
}
