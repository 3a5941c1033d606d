//! Problem variations: rephrasings of the founder's problem used as search seeds.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Completion, LanguageModel, ModelTier};
use crate::research::prompts::VARIATIONS_PROMPT_TEMPLATE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationKind {
    Question,
    PainPoint,
    #[default]
    #[serde(other)]
    Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemVariation {
    pub text: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(rename = "type", default)]
    pub kind: VariationKind,
}

#[derive(Debug, Deserialize)]
struct VariationsEnvelope {
    #[serde(default)]
    variations: Vec<ProblemVariation>,
}

/// Asks the LLM for rephrasings of `original_problem`.
/// Never fails: any LLM or parse error, or an empty list, yields `fallback_variations`.
pub async fn generate_problem_variations(
    llm: &dyn LanguageModel,
    original_problem: &str,
) -> Vec<ProblemVariation> {
    let prompt = VARIATIONS_PROMPT_TEMPLATE.replace("{problem}", original_problem);
    let request = Completion::new(ModelTier::Fast, &prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.8)
        .max_tokens(2000);

    match complete_json::<VariationsEnvelope>(llm, &request).await {
        Ok(envelope) if !envelope.variations.is_empty() => {
            info!("Generated {} problem variations", envelope.variations.len());
            envelope.variations
        }
        Ok(_) => {
            warn!("LLM returned no problem variations, using fallbacks");
            fallback_variations(original_problem)
        }
        Err(e) => {
            warn!("Problem variation generation failed, using fallbacks: {e}");
            fallback_variations(original_problem)
        }
    }
}

pub fn fallback_variations(original_problem: &str) -> Vec<ProblemVariation> {
    let lowered = original_problem.to_lowercase();
    vec![
        ProblemVariation {
            text: original_problem.to_string(),
            reasoning: "Original problem statement".to_string(),
            kind: VariationKind::Statement,
        },
        ProblemVariation {
            text: format!("How to solve {lowered}"),
            reasoning: "Question format for user searches".to_string(),
            kind: VariationKind::Question,
        },
        ProblemVariation {
            text: format!("Why is {lowered} a problem"),
            reasoning: "Understanding the root cause".to_string(),
            kind: VariationKind::Question,
        },
    ]
}
