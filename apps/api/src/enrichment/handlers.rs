//! Axum route handlers for contact enrichment.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::enrichment::{mock_enrichment, BulkEnrichment, EnrichmentJob, JobStatus};
use crate::errors::AppError;
use crate::models::prospect::Prospect;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    #[serde(default)]
    pub prospects: Vec<Prospect>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichResponse {
    pub enrichment_id: String,
    pub status: JobStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/product_validator/enrich-contacts
///
/// Starts a bulk enrichment. Offline, the job completes immediately with synthesized data.
pub async fn handle_enrich_contacts(
    State(state): State<AppState>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<EnrichResponse>, AppError> {
    if request.prospects.is_empty() {
        return Err(AppError::Validation(
            "prospects must contain at least one prospect".to_string(),
        ));
    }

    let mut prospects = request.prospects;
    for prospect in &mut prospects {
        prospect
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string());
    }

    let job = if state.enricher.is_available() {
        let name = format!("product-validator-{}", Utc::now().format("%Y%m%d%H%M%S"));
        let webhook_url = state.config.fullenrich_webhook_url();
        let enrichment_id = state
            .enricher
            .submit(&name, &prospects, webhook_url.as_deref())
            .await?;
        EnrichmentJob::new(enrichment_id, JobStatus::InProgress, prospects)
    } else {
        info!("Enriching {} prospects with mock data", prospects.len());
        for prospect in &mut prospects {
            prospect.enriched = Some(mock_enrichment(prospect));
        }
        EnrichmentJob::new(Uuid::new_v4().to_string(), JobStatus::Completed, prospects)
    };

    let response = EnrichResponse {
        enrichment_id: job.id.clone(),
        status: job.status,
    };
    state.enrichments.insert(job).await;

    Ok(Json(response))
}

/// GET /api/product_validator/enrichment-status/:id
///
/// Returns the job, polling the provider first while it is unfinished.
pub async fn handle_enrichment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichmentJob>, AppError> {
    let job = state
        .enrichments
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Enrichment job {id} not found")))?;

    if job.status.is_finished() || !state.enricher.is_available() {
        return Ok(Json(job));
    }

    match state.enricher.fetch(&id).await {
        Ok(report) => {
            let updated = state.enrichments.apply(&id, &report).await.unwrap_or(job);
            Ok(Json(updated))
        }
        Err(e) => {
            warn!("Polling FullEnrich for {id} failed, returning stored job: {e}");
            Ok(Json(job))
        }
    }
}

/// POST /api/webhook/fullenrich
///
/// FullEnrich callback once a bulk enrichment finishes.
pub async fn handle_fullenrich_webhook(
    State(state): State<AppState>,
    Json(report): Json<BulkEnrichment>,
) -> Result<Json<Value>, AppError> {
    let id = report
        .job_id()
        .ok_or_else(|| AppError::Validation("id or enrichment_id is required".to_string()))?;
    let job = state
        .enrichments
        .apply(id, &report)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Enrichment job {id} not found")))?;

    info!(
        "FullEnrich webhook for {}: status {:?}, {} records",
        job.id,
        job.status,
        report.datas.len()
    );

    Ok(Json(json!({ "received": true })))
}
