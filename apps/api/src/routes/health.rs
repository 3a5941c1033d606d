use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus which LLM backend is active (`offline` when none is configured).
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "openaiKeySet": state.config.openai_api_key.is_some(),
        "llmProvider": state.llm.name()
    }))
}

/// GET /api/test
pub async fn test_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Server is running!",
        "timestamp": Utc::now().to_rfc3339(),
        "openaiAvailable": state.config.openai_api_key.is_some()
    }))
}
