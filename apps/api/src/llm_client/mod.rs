/// LLM Client: the single point of entry for every hosted-model call in the validator.
///
/// ARCHITECTURAL RULE: No other module may call OpenAI or Anthropic directly.
/// Services depend on the `LanguageModel` trait; `AppState` carries an
/// `Arc<dyn LanguageModel>` picked at startup from the configured keys.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::warn;

pub mod anthropic;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No LLM API key configured")]
    NotConfigured,
}

/// Cost/capability tier of a call. Providers map tiers to concrete models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Conversation turns, phrasing variations.
    Fast,
    /// Analysis, insights, content generation.
    Balanced,
    Advanced,
}

/// A single-turn completion request.
#[derive(Debug, Clone)]
pub struct Completion<'a> {
    pub tier: ModelTier,
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> Completion<'a> {
    pub fn new(tier: ModelTier, prompt: &'a str) -> Self {
        Self {
            tier,
            system: None,
            prompt,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    pub fn system(mut self, system: &'a str) -> Self {
        self.system = Some(system);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A hosted chat model. Implement this to add a provider without touching callers.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider label, surfaced in `/health`.
    fn name(&self) -> &'static str;

    /// `false` when no API key is configured and callers should serve mock data.
    fn is_available(&self) -> bool {
        true
    }

    /// Returns the text of the model's reply.
    async fn complete(&self, request: &Completion<'_>) -> Result<String, LlmError>;
}

/// Stand-in used when no API key is configured. Every call fails with `NotConfigured`.
pub struct OfflineModel;

#[async_trait]
impl LanguageModel for OfflineModel {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn complete(&self, _request: &Completion<'_>) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

/// Calls the model and deserializes its reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    llm: &dyn LanguageModel,
    request: &Completion<'_>,
) -> Result<T, LlmError> {
    let text = llm.complete(request).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Error envelope shared by the OpenAI and Anthropic APIs: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Sends the request built by `build`, retrying on 429, 5xx and transport errors
/// with exponential backoff (1s, 2s). Any other non-success status fails immediately.
pub(crate) async fn send_with_retry<F>(provider: &str, build: F) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "{provider} call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = match build().send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(LlmError::Http(e));
                continue;
            }
        };

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{provider} API returned {}: {}", status, body);
        let error = api_error(status.as_u16(), body);

        if status.as_u16() == 429 || status.is_server_error() {
            last_error = Some(error);
            continue;
        }
        return Err(error);
    }

    Err(last_error.unwrap_or(LlmError::RateLimited {
        retries: MAX_RETRIES,
    }))
}

/// `Api` error carrying the provider's `error.message`, or the raw body when it has none.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use tokio::time::Instant;

    use super::testing::ScriptedModel;
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        key: String,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_completion_builder_defaults() {
        let request = Completion::new(ModelTier::Fast, "hi")
            .system("sys")
            .temperature(0.2)
            .max_tokens(500);
        assert_eq!(request.system, Some("sys"));
        assert_eq!(request.max_tokens, 500);
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_complete_json_parses_fenced_reply() {
        let llm = ScriptedModel::replying(&["```json\n{\"key\": \"value\"}\n```"]);
        let probe: Probe = complete_json(&llm, &Completion::new(ModelTier::Fast, "p"))
            .await
            .unwrap();
        assert_eq!(probe.key, "value");
    }

    #[tokio::test]
    async fn test_complete_json_rejects_prose() {
        let llm = ScriptedModel::replying(&["Sure! Here is your JSON."]);
        let result: Result<Probe, _> =
            complete_json(&llm, &Completion::new(ModelTier::Fast, "p")).await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_complete_json_empty_reply_is_empty_content() {
        let llm = ScriptedModel::replying(&["   "]);
        let result: Result<Probe, _> =
            complete_json(&llm, &Completion::new(ModelTier::Fast, "p")).await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    /// Local HTTP server answering `POST /` with the scripted `(status, body)` pairs in order.
    /// Returns its URL and a hit counter.
    async fn scripted_server(replies: &[(u16, &str)]) -> (String, Arc<AtomicUsize>) {
        let script: Arc<Mutex<VecDeque<(u16, String)>>> = Arc::new(Mutex::new(
            replies.iter().map(|(s, b)| (*s, b.to_string())).collect(),
        ));
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let app = Router::new().route(
            "/",
            post(move || {
                let script = script.clone();
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = script
                        .lock()
                        .unwrap()
                        .pop_front()
                        .unwrap_or((500, String::new()));
                    (StatusCode::from_u16(status).unwrap(), body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (url, hits)
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_server_errors_with_backoff() {
        let (url, hits) = scripted_server(&[(503, "busy"), (503, "busy"), (200, "{}")]).await;
        let client = reqwest::Client::new();
        let started = Instant::now();

        let response = send_with_retry("test", || client.post(&url)).await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_fails_without_retry() {
        let (url, hits) = scripted_server(&[
            (400, r#"{"error": {"message": "Unknown model 'gpt-x'"}}"#),
            (200, "{}"),
        ])
        .await;
        let client = reqwest::Client::new();

        let result = send_with_retry("test", || client.post(&url)).await;

        match result {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unknown model 'gpt-x'");
            }
            other => panic!("expected a 400 API error, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_gives_up_after_three_attempts() {
        let (url, hits) = scripted_server(&[
            (429, r#"{"error": {"message": "Rate limit reached"}}"#),
            (429, r#"{"error": {"message": "Rate limit reached"}}"#),
            (429, r#"{"error": {"message": "Rate limit reached"}}"#),
            (200, "{}"),
        ])
        .await;
        let client = reqwest::Client::new();

        let result = send_with_retry("test", || client.post(&url)).await;

        assert!(matches!(
            result,
            Err(LlmError::Api { status: 429, ref message }) if message == "Rate limit reached"
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_offline_model_is_unavailable() {
        let llm = OfflineModel;
        assert!(!llm.is_available());
        let result = llm.complete(&Completion::new(ModelTier::Fast, "p")).await;
        assert!(matches!(result, Err(LlmError::NotConfigured)));
    }
}
