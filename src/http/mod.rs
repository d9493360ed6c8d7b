use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::Track;

pub const DEFAULT_ENDPOINT: &str = "https://apitest.suno.com/api/songs";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("malformed catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    songs: Vec<Track>,
}

/// Boundary between the session's startup path and whatever actually
/// produces the track list. The concrete client does one HTTP GET; tests
/// substitute a canned provider.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<Track>, FetchError>;
}

pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    pub fn new(endpoint: String) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint from `SWIPEFEED_ENDPOINT` when set, the builtin default
    /// otherwise.
    pub fn from_env() -> Result<Self, FetchError> {
        let endpoint = std::env::var("SWIPEFEED_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }
}

#[async_trait]
impl CatalogProvider for CatalogClient {
    async fn fetch_catalog(&self) -> Result<Vec<Track>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        info!(endpoint = self.endpoint.as_str(), %status, "catalog_fetch");
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let decoded: CatalogResponse = serde_json::from_str(&body)?;
        Ok(decoded.songs)
    }
}
