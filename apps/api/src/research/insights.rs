//! Research insights: LLM summary of the discussions the search step kept.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Completion, LanguageModel, ModelTier};
use crate::research::prompts::INSIGHTS_PROMPT_TEMPLATE;
use crate::research::DiscussionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
    #[default]
    #[serde(other)]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchInsights {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub key_insights: Vec<String>,
}

/// Summarizes `discussions` into insights. Never fails: errors yield `fallback_insights`.
pub async fn generate_research_insights(
    llm: &dyn LanguageModel,
    discussions: &[DiscussionResult],
    original_problem: &str,
) -> ResearchInsights {
    let prompt = build_insights_prompt(discussions, original_problem);
    let request = Completion::new(ModelTier::Balanced, &prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.7)
        .max_tokens(1500);

    match complete_json::<ResearchInsights>(llm, &request).await {
        Ok(insights) => {
            info!(
                "Generated insights: {} pain points, {} segments",
                insights.pain_points.len(),
                insights.segments.len()
            );
            insights
        }
        Err(e) => {
            warn!("Insight generation failed, using fallback insights: {e}");
            fallback_insights()
        }
    }
}

fn build_insights_prompt(discussions: &[DiscussionResult], original_problem: &str) -> String {
    let discussions_text = discussions
        .iter()
        .map(|d| format!("[{}] {}\n{}", d.platform, d.title, d.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    INSIGHTS_PROMPT_TEMPLATE
        .replace("{problem}", original_problem)
        .replace("{discussions}", &discussions_text)
}

pub fn fallback_insights() -> ResearchInsights {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    ResearchInsights {
        overview: "Analysis of user discussions reveals common patterns and pain points related to the problem.".to_string(),
        pain_points: strings(&[
            "Current solutions are inadequate",
            "Process is time-consuming",
            "Lack of proper tools",
        ]),
        segments: strings(&["Early adopters", "Professional users", "Casual users"]),
        opportunities: strings(&["Streamline the process", "Provide better tools"]),
        sentiment: Sentiment::Negative,
        key_insights: strings(&[
            "Users are actively seeking solutions",
            "Market demand exists",
            "Competition is limited",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    fn discussion(platform: &str, title: &str, content: &str) -> DiscussionResult {
        DiscussionResult {
            platform: platform.to_string(),
            title: title.to_string(),
            url: "https://example.com".to_string(),
            content: content.to_string(),
            author: "someone".to_string(),
            engagement: "10 likes, 2 comments".to_string(),
            relevance_score: 70,
            profile_url: "https://example.com".to_string(),
            profile_name: "someone".to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_each_discussion_with_platform_tag() {
        let prompt = build_insights_prompt(
            &[
                discussion("reddit.com", "Clients never pay on time", "Third reminder this week"),
                discussion("quora.com", "Best invoicing tool?", "Looking for automation"),
            ],
            "late invoice payments",
        );
        assert!(prompt.contains("Problem: \"late invoice payments\""));
        assert!(prompt.contains("[reddit.com] Clients never pay on time\nThird reminder this week"));
        assert!(prompt.contains("[quora.com] Best invoicing tool?"));
    }

    #[tokio::test]
    async fn test_parses_llm_insights() {
        let llm = ScriptedModel::replying(&[r#"{
            "overview": "Freelancers lose hours chasing payments.",
            "painPoints": ["Manual reminders"],
            "segments": ["Freelance designers", "Agencies"],
            "opportunities": ["Automated dunning"],
            "sentiment": "negative",
            "keyInsights": ["Payment delays hurt cash flow"]
        }"#]);

        let insights = generate_research_insights(&llm, &[], "late invoices").await;

        assert_eq!(insights.sentiment, Sentiment::Negative);
        assert_eq!(insights.segments.len(), 2);
        assert_eq!(insights.pain_points, vec!["Manual reminders".to_string()]);
    }

    #[tokio::test]
    async fn test_llm_failure_returns_fallback() {
        let insights = generate_research_insights(&ScriptedModel::failing(), &[], "x").await;
        assert_eq!(insights, fallback_insights());
        assert_eq!(insights.segments.len(), 3);
    }

    #[test]
    fn test_unknown_sentiment_reads_as_neutral() {
        let insights: ResearchInsights =
            serde_json::from_str(r#"{"overview": "o", "sentiment": "mixed"}"#).unwrap();
        assert_eq!(insights.sentiment, Sentiment::Neutral);
        assert!(insights.key_insights.is_empty());
    }
}
