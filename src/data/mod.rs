//! Core data models for the Pokedex CLI
//!
//! This module contains the PokeAPI response types decoded from cached or freshly
//! fetched bodies, plus the client that performs the fetches.

pub mod client;

pub use client::{ApiError, PokeApiClient, DEFAULT_BASE_URL};

use serde::Deserialize;

/// A `{ name, url }` reference as PokeAPI returns it in lists
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of the paginated `location-area` listing
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPage {
    /// URL of the following page, absent on the last page
    pub next: Option<String>,
    /// URL of the preceding page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area and the Pokemon that can be encountered there
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    #[serde(default)]
    pub name: String,
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// The subset of a PokeAPI `pokemon` record the CLI displays
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Drives catch difficulty; some forms report null
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_page_parses_last_page() {
        let json = r#"{
            "count": 1089,
            "next": null,
            "previous": "https://pokeapi.co/api/v2/location-area/?offset=1060&limit=20",
            "results": [{"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"}]
        }"#;

        let page: LocationPage = serde_json::from_str(json).expect("Failed to parse page");

        assert!(page.next.is_none());
        assert!(page.previous.is_some());
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "canalave-city-area");
    }

    #[test]
    fn test_location_area_parses_encounters() {
        let json = r#"{
            "id": 1,
            "name": "pastoria-city-area",
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"}, "version_details": []},
                {"pokemon": {"name": "magikarp", "url": "https://pokeapi.co/api/v2/pokemon/129/"}, "version_details": []}
            ]
        }"#;

        let area: LocationArea = serde_json::from_str(json).expect("Failed to parse area");

        assert_eq!(area.name, "pastoria-city-area");
        let names: Vec<&str> = area
            .pokemon_encounters
            .iter()
            .map(|e| e.pokemon.name.as_str())
            .collect();
        assert_eq!(names, ["tentacool", "magikarp"]);
    }

    #[test]
    fn test_pokemon_parses_stats_and_types() {
        let json = r#"{
            "name": "pidgey",
            "base_experience": 50,
            "height": 3,
            "weight": 18,
            "stats": [
                {"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 56, "effort": 1, "stat": {"name": "speed", "url": ""}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "normal", "url": ""}},
                {"slot": 2, "type": {"name": "flying", "url": ""}}
            ]
        }"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Failed to parse pokemon");

        assert_eq!(pokemon.name, "pidgey");
        assert_eq!(pokemon.base_experience, Some(50));
        assert_eq!(pokemon.stats[1].stat.name, "speed");
        assert_eq!(pokemon.stats[1].effort, 1);
        assert_eq!(pokemon.types[1].kind.name, "flying");
    }

    #[test]
    fn test_pokemon_tolerates_null_base_experience() {
        let json = r#"{"name": "missingno", "base_experience": null, "height": 1, "weight": 1}"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Failed to parse pokemon");

        assert!(pokemon.base_experience.is_none());
        assert!(pokemon.stats.is_empty());
        assert!(pokemon.types.is_empty());
    }
}
