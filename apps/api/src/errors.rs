use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enrichment::EnrichmentError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Message safe to show a client. Provider bodies and keys never leave the server.
fn llm_error_message(error: &LlmError) -> String {
    let message = match error {
        LlmError::Api { status: 401, .. } => {
            "LLM API key is invalid. Please check your configuration."
        }
        LlmError::Api { status: 429, .. } | LlmError::RateLimited { .. } => {
            "LLM API rate limit exceeded. Please try again later."
        }
        LlmError::Http(e) if e.is_connect() || e.is_timeout() => {
            "Network error. Please check your internet connection."
        }
        LlmError::Parse(_) => "Invalid JSON response from the model",
        LlmError::EmptyContent => "No response from the model",
        LlmError::NotConfigured => "No LLM API key configured",
        _ => "An AI processing error occurred",
    };
    message.to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    llm_error_message(e),
                )
            }
            AppError::Enrichment(e) => {
                tracing::error!("Enrichment error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ENRICHMENT_ERROR",
                    "Contact enrichment failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_hides_provider_body() {
        let error = LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-abc***".to_string(),
        };
        let message = llm_error_message(&error);
        assert_eq!(message, "LLM API key is invalid. Please check your configuration.");
        assert!(!message.contains("sk-"));
    }

    #[test]
    fn test_rate_limit_messages() {
        let expected = "LLM API rate limit exceeded. Please try again later.";
        assert_eq!(
            llm_error_message(&LlmError::RateLimited { retries: 3 }),
            expected
        );
        let api_429 = LlmError::Api {
            status: 429,
            message: String::new(),
        };
        assert_eq!(llm_error_message(&api_429), expected);
    }

    #[test]
    fn test_status_codes() {
        let validation = AppError::Validation("productIdea is required".to_string());
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let missing = AppError::NotFound("Enrichment job x not found".to_string());
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let llm = AppError::from(LlmError::EmptyContent);
        assert_eq!(
            llm.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
