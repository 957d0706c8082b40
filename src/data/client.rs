//! PokeAPI client
//!
//! Every request goes through the shared `ResponseCache`: the full request URL is
//! looked up first, and only on a miss is the network used. Successful bodies are
//! stored as raw bytes before decoding so later hits decode the same payload.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::{LocationArea, LocationPage, Pokemon};
use crate::cache::ResponseCache;

/// Root of the public PokeAPI
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { status: StatusCode, url: String },
}

/// Client for PokeAPI backed by a shared response cache
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl PokeApiClient {
    /// Create a client for the public PokeAPI
    pub fn new(cache: Arc<ResponseCache>) -> Self {
        Self::with_base_url(cache, DEFAULT_BASE_URL)
    }

    /// Create a client against a different API root, e.g. a mock server
    pub fn with_base_url(cache: Arc<ResponseCache>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            cache,
        }
    }

    /// The cache this client reads from and writes to
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// URL of the first page of location areas
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// URL of a single location area
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    /// URL of a single Pokemon
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// Fetch a page of location areas by its full URL
    ///
    /// Page URLs come from the `next`/`previous` fields of an earlier page, or
    /// from `first_location_page_url`.
    pub async fn fetch_location_page(&self, url: &str) -> Result<LocationPage, ApiError> {
        self.fetch_json(url).await
    }

    /// Fetch a location area and its encounters by name
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    /// Fetch a Pokemon by name
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.fetch_raw(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns the body for `url`, from the cache when possible
    ///
    /// Only 2xx bodies are cached.
    pub async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(body) = self.cache.get(url) {
            debug!(%url, "Serving response from cache");
            return Ok(body);
        }

        debug!(%url, "Fetching from network");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Request failed");
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone());
        Ok(body)
    }
}
