//! Pokedex CLI Library
//!
//! This module exposes the cache, API client, command parser and REPL for use in
//! the binary and in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod command;
pub mod data;
pub mod pokedex;
