use anyhow::{Context, Result};

/// Placeholder value shipped in the sample `.env`; treated the same as an unset key.
const PLACEHOLDER_OPENAI_KEY: &str = "your_openai_api_key_here";

const DEFAULT_SERP_API_HOST: &str = "google-search74.p.rapidapi.com";

/// Which hosted LLM backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every third-party key is optional: a missing key switches that dependency to mock data.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_api_key: Option<String>,
    /// Explicit `LLM_PROVIDER` choice, if any.
    pub llm_provider: Option<LlmProvider>,
    pub serp_api_key: Option<String>,
    pub serp_api_host: String,
    pub search_delay_ms: u64,
    pub fullenrich_api_key: Option<String>,
    /// Externally reachable base URL, used to build the FullEnrich webhook URL.
    pub public_base_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider = match optional_env("LLM_PROVIDER") {
            Some(value) => Some(parse_provider(&value)?),
            None => None,
        };

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY")
                .filter(|key| key != PLACEHOLDER_OPENAI_KEY),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_provider,
            serp_api_key: optional_env("SERP_API_KEY"),
            serp_api_host: optional_env("SERP_API_HOST")
                .unwrap_or_else(|| DEFAULT_SERP_API_HOST.to_string()),
            search_delay_ms: optional_env("SEARCH_DELAY_MS")
                .unwrap_or_else(|| "500".to_string())
                .parse::<u64>()
                .context("SEARCH_DELAY_MS must be a number of milliseconds")?,
            fullenrich_api_key: optional_env("FULLENRICH_API_KEY"),
            public_base_url: optional_env("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Resolves the LLM provider: explicit choice first, then whichever key is present.
    /// `None` means no usable key and the service runs on mock data.
    pub fn resolved_llm_provider(&self) -> Option<LlmProvider> {
        match self.llm_provider {
            Some(LlmProvider::OpenAi) => self.openai_api_key.as_ref().map(|_| LlmProvider::OpenAi),
            Some(LlmProvider::Anthropic) => self
                .anthropic_api_key
                .as_ref()
                .map(|_| LlmProvider::Anthropic),
            None if self.openai_api_key.is_some() => Some(LlmProvider::OpenAi),
            None if self.anthropic_api_key.is_some() => Some(LlmProvider::Anthropic),
            None => None,
        }
    }

    /// URL FullEnrich should call back once a bulk enrichment finishes.
    pub fn fullenrich_webhook_url(&self) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{base}/api/webhook/fullenrich"))
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_provider(value: &str) -> Result<LlmProvider> {
    match value.to_lowercase().as_str() {
        "openai" => Ok(LlmProvider::OpenAi),
        "anthropic" => Ok(LlmProvider::Anthropic),
        other => anyhow::bail!("LLM_PROVIDER must be 'openai' or 'anthropic', got '{other}'"),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with every external key unset.
    pub fn offline() -> Self {
        Config {
            openai_api_key: None,
            openai_model: "gpt-4".to_string(),
            anthropic_api_key: None,
            llm_provider: None,
            serp_api_key: None,
            serp_api_host: DEFAULT_SERP_API_HOST.to_string(),
            search_delay_ms: 0,
            fullenrich_api_key: None,
            public_base_url: None,
            port: 3001,
            rust_log: "info".to_string(),
        }
    }
}
