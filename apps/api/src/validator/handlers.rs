//! Axum route handlers for the product validator.
//!
//! Every handler checks `state.llm.is_available()` first and serves the fixed mock
//! response when no LLM key is configured.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::conversation::analysis::{detect_audience, generate_market_analysis};
use crate::conversation::intake::{advance_context, analyze_user_input, ChatTurn};
use crate::conversation::mock::mock_market_analysis;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, strip_json_fences, Completion, LlmError, ModelTier};
use crate::models::conversation::ConversationContext;
use crate::models::market::{InboundContent, MarketAnalysis};
use crate::research::{run_complete_research_pipeline, ResearchReport};
use crate::search::platforms::Audience;
use crate::state::AppState;
use crate::validator::mock::{
    mock_chat_reply, mock_contacts, mock_deep_search, mock_inbound_content,
    MOCK_OUTREACH_MESSAGE,
};
use crate::validator::prompts::{
    build_contacts_prompt, build_deep_search_prompt, build_inbound_content_prompt,
    build_outreach_prompt,
};
use crate::validator::{json_field_text, ContactInfo};

const VALIDATOR_TEMPERATURE: f32 = 0.2;
const DEFAULT_TARGET_AUDIENCE: &str = "General users";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub product_idea: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default, rename = "resourcesJSON")]
    pub resources_json: Option<Value>,
}

/// Deep-search JSON as the model produced it, or its raw text when it was not JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ValidateResponse {
    Parsed(Value),
    Raw { raw: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachRequest {
    #[serde(default)]
    pub product_idea: Option<String>,
    #[serde(default, rename = "searchResultsJSON")]
    pub search_results_json: Option<Value>,
    #[serde(default, rename = "targetPersonJSON")]
    pub target_person_json: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OutreachResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactsRequest {
    #[serde(default, rename = "targetPersonJSON")]
    pub target_person_json: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub contacts: ContactInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundContentRequest {
    #[serde(default)]
    pub product_idea: Option<String>,
    #[serde(default, rename = "insightsJSON")]
    pub insights_json: Option<Value>,
    #[serde(default, rename = "icpsJSON")]
    pub icps_json: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundContentResponse {
    #[serde(default)]
    pub inbound_content: Vec<InboundContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: ConversationContext,
    #[serde(default)]
    pub has_resources: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub context: ConversationContext,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default, rename = "isB2B")]
    pub is_b2b: Option<bool>,
}

/// Trimmed, non-empty value of a required text field.
fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/product_validator/validate
///
/// Deep market search for a product idea. Non-JSON model output is returned as `{raw}`.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let product_idea = required(&request.product_idea, "productIdea")?;
    info!(
        "Validating product idea: {}",
        product_idea.chars().take(100).collect::<String>()
    );

    if !state.llm.is_available() {
        info!("No LLM configured, serving mock deep search");
        return Ok(Json(ValidateResponse::Parsed(mock_deep_search())));
    }

    let resources = json_field_text(request.resources_json.as_ref());
    let prompt = build_deep_search_prompt(
        product_idea,
        request.context.as_deref().filter(|c| !c.trim().is_empty()),
        resources.as_deref(),
    );
    let completion = Completion::new(ModelTier::Balanced, &prompt)
        .temperature(VALIDATOR_TEMPERATURE)
        .max_tokens(3000);

    let text = state.llm.complete(&completion).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    let parsed = serde_json::from_str::<Value>(strip_json_fences(&text));
    match parsed {
        Ok(parsed) => Ok(Json(ValidateResponse::Parsed(parsed))),
        Err(e) => {
            warn!("Deep search response was not valid JSON, returning raw text: {e}");
            Ok(Json(ValidateResponse::Raw { raw: text }))
        }
    }
}

/// POST /api/product_validator/outreach
pub async fn handle_outreach(
    State(state): State<AppState>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    let product_idea = request.product_idea.as_deref().map(str::trim).unwrap_or("");
    let search_results = json_field_text(request.search_results_json.as_ref());
    let target_person = json_field_text(request.target_person_json.as_ref());

    let (Some(search_results), Some(target_person)) = (search_results, target_person) else {
        return Err(missing_outreach_fields());
    };
    if product_idea.is_empty() {
        return Err(missing_outreach_fields());
    }

    if !state.llm.is_available() {
        return Ok(Json(OutreachResponse {
            message: MOCK_OUTREACH_MESSAGE.to_string(),
        }));
    }

    let prompt = build_outreach_prompt(product_idea, &search_results, &target_person);
    let completion = Completion::new(ModelTier::Balanced, &prompt)
        .temperature(VALIDATOR_TEMPERATURE)
        .max_tokens(500);

    let message = state.llm.complete(&completion).await?.trim().to_string();
    if message.is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    info!("Generated outreach message ({} chars)", message.len());
    Ok(Json(OutreachResponse { message }))
}

fn missing_outreach_fields() -> AppError {
    AppError::Validation(
        "productIdea, searchResultsJSON, and targetPersonJSON are required".to_string(),
    )
}

/// POST /api/product_validator/contacts
///
/// Unparseable model output is a 500: there is no useful raw fallback for contacts.
pub async fn handle_contacts(
    State(state): State<AppState>,
    Json(request): Json<ContactsRequest>,
) -> Result<Json<ContactsResponse>, AppError> {
    let target_person = json_field_text(request.target_person_json.as_ref())
        .ok_or_else(|| AppError::Validation("targetPersonJSON is required".to_string()))?;

    if !state.llm.is_available() {
        return Ok(Json(ContactsResponse {
            contacts: mock_contacts(),
        }));
    }

    let prompt = build_contacts_prompt(&target_person);
    let completion = Completion::new(ModelTier::Balanced, &prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(VALIDATOR_TEMPERATURE)
        .max_tokens(800);

    let contacts: ContactInfo = complete_json(state.llm.as_ref(), &completion).await?;

    info!("Found contact information");
    Ok(Json(ContactsResponse { contacts }))
}

/// POST /api/product_validator/inbound-content
pub async fn handle_inbound_content(
    State(state): State<AppState>,
    Json(request): Json<InboundContentRequest>,
) -> Result<Json<InboundContentResponse>, AppError> {
    let product_idea = required(&request.product_idea, "productIdea")?;

    if !state.llm.is_available() {
        return Ok(Json(InboundContentResponse {
            inbound_content: mock_inbound_content(product_idea),
        }));
    }

    let insights = json_field_text(request.insights_json.as_ref()).unwrap_or_else(|| "{}".into());
    let icps = json_field_text(request.icps_json.as_ref()).unwrap_or_else(|| "[]".into());
    let prompt = build_inbound_content_prompt(product_idea, &insights, &icps);
    let completion = Completion::new(ModelTier::Balanced, &prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(VALIDATOR_TEMPERATURE)
        .max_tokens(3000);

    let response: InboundContentResponse =
        complete_json(state.llm.as_ref(), &completion).await?;

    info!(
        "Generated {} inbound content pieces",
        response.inbound_content.len()
    );
    Ok(Json(response))
}

/// POST /api/product_validator/chat
///
/// One intake turn. The client round-trips `updatedContext` on the next call.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatTurn>, AppError> {
    let message = required(&request.message, "message")?;

    if !state.llm.is_available() {
        let response = mock_chat_reply(&request.context);
        let (updated_context, should_proceed_to_analysis) =
            advance_context(&request.context, message, response);
        return Ok(Json(ChatTurn {
            response: response.to_string(),
            updated_context,
            should_proceed_to_analysis,
        }));
    }

    let turn = analyze_user_input(
        state.llm.as_ref(),
        message,
        &request.context,
        request.has_resources,
    )
    .await;
    Ok(Json(turn))
}

/// POST /api/product_validator/analysis
///
/// Runs the research pipeline for the intake context and builds the dashboard content.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<MarketAnalysis>, AppError> {
    if !state.llm.is_available() {
        return Ok(Json(mock_market_analysis(&request.context)));
    }

    let analysis = generate_market_analysis(
        state.llm.as_ref(),
        state.search.as_ref(),
        &request.context,
        &state.search_options,
    )
    .await;
    Ok(Json(analysis))
}

/// POST /api/product_validator/research
///
/// Full research pipeline. Degrades step by step: offline providers yield the
/// fallback variations and insights with no discussions.
pub async fn handle_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchReport>, AppError> {
    let problem = required(&request.problem, "problem")?;
    let target = request
        .target_audience
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TARGET_AUDIENCE);
    let audience = match request.is_b2b {
        Some(is_b2b) => Audience::from_is_b2b(is_b2b),
        None => detect_audience(target, problem),
    };

    let report = run_complete_research_pipeline(
        state.llm.as_ref(),
        state.search.as_ref(),
        problem,
        target,
        audience,
        &state.search_options,
    )
    .await;
    Ok(Json(report))
}
