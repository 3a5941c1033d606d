//! Intake conversation: one chat turn that both replies to the founder and updates
//! what we know about their idea.

use serde::Serialize;
use tracing::{info, warn};

use crate::conversation::prompts::{HANDOFF_PHRASE, INTAKE_SYSTEM_TEMPLATE, INTAKE_USER_TEMPLATE};
use crate::llm_client::{Completion, LanguageModel, ModelTier};
use crate::models::conversation::{ConversationContext, Stage};

/// Exchanges after which the conversation always hands off to analysis.
pub const MAX_EXCHANGES: u32 = 3;

const TARGET_KEYWORDS: &[&str] = &["target", "audience", "customer", "client", "utilisateur"];
const PROBLEM_KEYWORDS: &[&str] = &["problem", "pain", "solve", "problème", "douleur", "résoudre"];
const PRODUCT_KEYWORDS: &[&str] = &["product", "app", "service", "solution", "produit"];

const UNAVAILABLE_REPLY: &str =
    "I'm having trouble connecting to my analysis engine. Could you try again in a moment?";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub response: String,
    pub updated_context: ConversationContext,
    pub should_proceed_to_analysis: bool,
}

/// Processes one founder message.
/// On LLM failure the turn still counts, but the context is otherwise untouched.
pub async fn analyze_user_input(
    llm: &dyn LanguageModel,
    message: &str,
    context: &ConversationContext,
    has_resources: bool,
) -> ChatTurn {
    let system = build_system_prompt(context, has_resources);
    let context_json = serde_json::to_string_pretty(context).unwrap_or_default();
    let prompt = INTAKE_USER_TEMPLATE
        .replace("{message}", message)
        .replace("{context_json}", &context_json);

    let request = Completion::new(ModelTier::Fast, &prompt)
        .system(&system)
        .temperature(0.7)
        .max_tokens(500);

    match llm.complete(&request).await {
        Ok(response) => {
            let (updated_context, should_proceed_to_analysis) =
                advance_context(context, message, &response);
            info!(
                "Intake turn {} -> stage {:?}",
                updated_context.message_count, updated_context.stage
            );
            ChatTurn {
                response,
                updated_context,
                should_proceed_to_analysis,
            }
        }
        Err(e) => {
            warn!("Intake LLM call failed: {e}");
            ChatTurn {
                response: UNAVAILABLE_REPLY.to_string(),
                updated_context: ConversationContext {
                    message_count: context.message_count + 1,
                    ..context.clone()
                },
                should_proceed_to_analysis: false,
            }
        }
    }
}

fn build_system_prompt(context: &ConversationContext, has_resources: bool) -> String {
    let stage = serde_json::to_value(context.stage)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    INTAKE_SYSTEM_TEMPLATE
        .replace("{message_count}", &context.message_count.to_string())
        .replace("{stage}", &stage)
        .replace("{has_product_idea}", &context.product_idea.is_some().to_string())
        .replace("{has_resources}", &has_resources.to_string())
        .replace(
            "{has_target_audience}",
            &context.target_audience.is_some().to_string(),
        )
        .replace(
            "{has_problem_description}",
            &context.problem_description.is_some().to_string(),
        )
        .replace("{handoff_phrase}", HANDOFF_PHRASE)
}

/// Applies keyword extraction and the stage transition for a successful turn.
/// Returns the new context and whether to hand off to analysis.
pub fn advance_context(
    context: &ConversationContext,
    message: &str,
    response: &str,
) -> (ConversationContext, bool) {
    let mut updated = ConversationContext {
        message_count: context.message_count + 1,
        ..context.clone()
    };

    let lowered = message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if mentions(TARGET_KEYWORDS) {
        updated.target_audience = Some(message.to_string());
    }
    if mentions(PROBLEM_KEYWORDS) {
        updated.problem_description = Some(message.to_string());
    }
    if context.product_idea.is_none() && mentions(PRODUCT_KEYWORDS) {
        updated.product_idea = Some(message.to_string());
    }

    let proceed = response.contains(HANDOFF_PHRASE) || updated.message_count >= MAX_EXCHANGES;

    if proceed {
        updated.stage = Stage::ReadyForAnalysis;
    } else if updated.message_count >= 1 {
        updated.stage = Stage::Gathering;
    }

    (updated, proceed)
}
