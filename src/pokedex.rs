//! The user's collection of caught Pokemon and the catch roll

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;

use crate::data::Pokemon;

/// Added to base experience to form the roll range; the larger it is relative to
/// base experience, the easier the catch
const CATCH_MARGIN: u32 = 50;

/// A Pokemon in the Pokedex and when it was caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Caught Pokemon keyed by name, listed alphabetically
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch, replacing an earlier catch of the same Pokemon
    pub fn insert(&mut self, pokemon: Pokemon) {
        let entry = CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        };
        self.entries.insert(entry.pokemon.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `roll` catches a Pokemon with the given base experience.
///
/// Rolls are drawn from `0..base_experience + 50`; anything at or below the
/// base experience escapes.
pub fn is_caught(base_experience: u32, roll: u32) -> bool {
    roll > base_experience
}

/// Draws a catch roll for a Pokemon with the given base experience
pub fn roll_catch<R: Rng>(rng: &mut R, base_experience: u32) -> u32 {
    rng.gen_range(0..base_experience.saturating_add(CATCH_MARGIN))
}
