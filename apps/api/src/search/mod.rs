//! Search: the SERP (RapidAPI Google search) client behind a `SearchProvider` trait.
//!
//! `AppState` holds an `Arc<dyn SearchProvider>`: `SerpClient` when `SERP_API_KEY` is set,
//! `OfflineSearch` otherwise.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::llm_client::http_client;

pub mod platforms;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SERP API error: status {0}")]
    Status(u16),

    #[error("No SERP API key configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerpResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerpResponse {
    #[serde(default)]
    pub results: Vec<SerpResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_keywords: Option<Vec<String>>,
}

/// A web search backend. Implement this to swap providers without touching the pipeline.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<SerpResponse, SearchError>;
}

/// RapidAPI Google search client.
#[derive(Clone)]
pub struct SerpClient {
    client: reqwest::Client,
    api_key: String,
    host: String,
}

impl SerpClient {
    pub fn new(api_key: String, host: String) -> Self {
        Self {
            client: http_client(),
            api_key,
            host,
        }
    }
}

#[async_trait]
impl SearchProvider for SerpClient {
    async fn search(&self, query: &str, limit: u32) -> Result<SerpResponse, SearchError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("https://{}/", self.host))
            .query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("related_keywords", "true"),
            ])
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let serp: SerpResponse = response.json().await?;
        debug!("SERP query {:?} returned {} results", query, serp.results.len());
        Ok(serp)
    }
}

/// Stand-in used when no SERP key is configured.
pub struct OfflineSearch;

#[async_trait]
impl SearchProvider for OfflineSearch {
    async fn search(&self, _query: &str, _limit: u32) -> Result<SerpResponse, SearchError> {
        Err(SearchError::NotConfigured)
    }
}
