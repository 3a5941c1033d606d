pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::enrichment::handlers as enrichment;
use crate::state::AppState;
use crate::validator::handlers as validator;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/test", get(health::test_handler))
        // Validator API
        .route(
            "/api/product_validator/validate",
            post(validator::handle_validate),
        )
        .route(
            "/api/product_validator/outreach",
            post(validator::handle_outreach),
        )
        .route(
            "/api/product_validator/contacts",
            post(validator::handle_contacts),
        )
        .route(
            "/api/product_validator/inbound-content",
            post(validator::handle_inbound_content),
        )
        .route("/api/product_validator/chat", post(validator::handle_chat))
        .route(
            "/api/product_validator/analysis",
            post(validator::handle_analysis),
        )
        .route(
            "/api/product_validator/research",
            post(validator::handle_research),
        )
        // Enrichment API
        .route(
            "/api/product_validator/enrich-contacts",
            post(enrichment::handle_enrich_contacts),
        )
        .route(
            "/api/product_validator/enrichment-status/:id",
            get(enrichment::handle_enrichment_status),
        )
        .route(
            "/api/webhook/fullenrich",
            post(enrichment::handle_fullenrich_webhook),
        )
        .with_state(state)
}
