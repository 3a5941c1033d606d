use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{Config, LlmProvider};
use crate::enrichment::{ContactEnricher, EnrichmentStore, FullEnrichClient, OfflineEnricher};
use crate::llm_client::{AnthropicClient, LanguageModel, OfflineModel, OpenAiClient};
use crate::research::SearchOptions;
use crate::search::{OfflineSearch, SearchProvider, SerpClient};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Picked at startup from `LLM_PROVIDER` and the configured keys. `OfflineModel` when none.
    pub llm: Arc<dyn LanguageModel>,
    pub search: Arc<dyn SearchProvider>,
    pub enricher: Arc<dyn ContactEnricher>,
    pub enrichments: EnrichmentStore,
    pub config: Config,
    pub search_options: SearchOptions,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let llm: Arc<dyn LanguageModel> = match config.resolved_llm_provider() {
            Some(LlmProvider::OpenAi) => Arc::new(OpenAiClient::new(
                config.openai_api_key.clone().unwrap_or_default(),
                config.openai_model.clone(),
            )),
            Some(LlmProvider::Anthropic) => Arc::new(AnthropicClient::new(
                config.anthropic_api_key.clone().unwrap_or_default(),
            )),
            None => {
                warn!("No LLM API key configured, endpoints will return mock data");
                Arc::new(OfflineModel)
            }
        };
        info!("LLM client initialized (provider: {})", llm.name());

        let search: Arc<dyn SearchProvider> = match &config.serp_api_key {
            Some(key) => Arc::new(SerpClient::new(key.clone(), config.serp_api_host.clone())),
            None => {
                warn!("SERP_API_KEY not set, discussion search returns no results");
                Arc::new(OfflineSearch)
            }
        };

        let enricher: Arc<dyn ContactEnricher> = match &config.fullenrich_api_key {
            Some(key) => Arc::new(FullEnrichClient::new(key.clone())),
            None => {
                warn!("FULLENRICH_API_KEY not set, enrichment returns synthesized contacts");
                Arc::new(OfflineEnricher)
            }
        };

        let search_options =
            SearchOptions::with_delay(Duration::from_millis(config.search_delay_ms));

        AppState {
            llm,
            search,
            enricher,
            enrichments: EnrichmentStore::default(),
            config,
            search_options,
        }
    }
}
