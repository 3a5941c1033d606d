//! Market analysis: runs the research pipeline for the intake context, then asks the LLM
//! for the remaining dashboard content.
//!
//! Research-derived ICPs and discussions take precedence over anything the LLM invents.
//! If the LLM call or its parsing fails, the mock analysis fills the gaps.

use serde::Deserialize;
use tracing::{info, warn};

use crate::conversation::mock::{default_hypothesis, mock_market_analysis};
use crate::conversation::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::llm_client::{complete_json, Completion, LanguageModel, LlmError, ModelTier};
use crate::models::conversation::ConversationContext;
use crate::models::market::{Discussion, Icp, InboundContent, MarketAnalysis, OutreachMessage};
use crate::research::{
    run_complete_research_pipeline, DiscussionResult, ResearchInsights, SearchOptions,
};
use crate::search::platforms::Audience;
use crate::search::SearchProvider;

const DEFAULT_PROBLEM: &str = "Product validation challenge";
const DEFAULT_TARGET: &str = "General users";

const B2B_TARGET_MARKERS: &[&str] = &["business", "professional", "company"];
const B2B_PROBLEM_MARKERS: &[&str] = &["saas", "enterprise", "b2b"];

const B2B_CHANNELS: &[&str] = &["LinkedIn", "Reddit", "Industry Forums"];
const B2C_CHANNELS: &[&str] = &["Reddit", "Facebook", "Twitter"];

/// The LLM's half of the analysis. Every field is optional: partial output is still usable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GeneratedAnalysis {
    icps: Vec<Icp>,
    discussions: Vec<Discussion>,
    inbound_content: Vec<InboundContent>,
    outreach_messages: Vec<OutreachMessage>,
    hypothesis: Option<String>,
}

/// Business audience when the target or problem mentions business vocabulary.
pub fn detect_audience(target: &str, problem: &str) -> Audience {
    let target = target.to_lowercase();
    let problem = problem.to_lowercase();
    let is_b2b = B2B_TARGET_MARKERS.iter().any(|m| target.contains(m))
        || B2B_PROBLEM_MARKERS.iter().any(|m| problem.contains(m));
    Audience::from_is_b2b(is_b2b)
}

/// Maps a scored search hit onto the dashboard's 0–10 relevance scale.
pub fn to_discussion(result: &DiscussionResult) -> Discussion {
    Discussion {
        platform: result.platform.clone(),
        title: result.title.clone(),
        url: result.url.clone(),
        engagement: result.engagement.clone(),
        relevance: (result.relevance_score as f64 / 10.0).round() as u8,
        profile_url: result.profile_url.clone(),
        profile_name: result.profile_name.clone(),
    }
}

/// One ICP per insight segment, each carrying up to three pain points starting at its index.
pub fn icps_from_insights(insights: &ResearchInsights, audience: Audience) -> Vec<Icp> {
    let channels = match audience {
        Audience::B2b => B2B_CHANNELS,
        Audience::B2c => B2C_CHANNELS,
    };

    insights
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let headline_pain = insights
                .pain_points
                .get(index)
                .map(String::as_str)
                .unwrap_or("the core problem");
            let start = index.min(insights.pain_points.len());
            let end = (index + 3).min(insights.pain_points.len());

            Icp {
                title: segment.clone(),
                description: format!("{segment} experiencing {headline_pain}"),
                pain_points: insights.pain_points[start..end].to_vec(),
                channels: channels.iter().map(|c| c.to_string()).collect(),
            }
        })
        .collect()
}

pub async fn generate_market_analysis(
    llm: &dyn LanguageModel,
    search: &dyn SearchProvider,
    context: &ConversationContext,
    options: &SearchOptions,
) -> MarketAnalysis {
    let problem = context
        .problem_description
        .as_deref()
        .or(context.product_idea.as_deref())
        .unwrap_or(DEFAULT_PROBLEM);
    let target = context.target_audience.as_deref().unwrap_or(DEFAULT_TARGET);
    let audience = detect_audience(target, problem);

    let report =
        run_complete_research_pipeline(llm, search, problem, target, audience, options).await;

    let research_discussions: Vec<Discussion> =
        report.discussions.iter().map(to_discussion).collect();
    let research_icps = icps_from_insights(&report.insights, audience);

    match request_generated_analysis(llm, context, problem, target, &report.insights).await {
        Ok(generated) => {
            info!(
                "Market analysis generated: {} research ICPs, {} research discussions",
                research_icps.len(),
                research_discussions.len()
            );
            MarketAnalysis {
                icps: prefer_non_empty(research_icps, generated.icps),
                discussions: prefer_non_empty(research_discussions, generated.discussions),
                inbound_content: generated.inbound_content,
                outreach_messages: generated.outreach_messages,
                hypothesis: generated
                    .hypothesis
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| default_hypothesis(context)),
            }
        }
        Err(e) => {
            warn!("Market analysis LLM call failed, merging research into mock analysis: {e}");
            let mock = mock_market_analysis(context);
            MarketAnalysis {
                icps: prefer_non_empty(research_icps, mock.icps),
                discussions: prefer_non_empty(research_discussions, mock.discussions),
                ..mock
            }
        }
    }
}

async fn request_generated_analysis(
    llm: &dyn LanguageModel,
    context: &ConversationContext,
    problem: &str,
    target: &str,
    insights: &ResearchInsights,
) -> Result<GeneratedAnalysis, LlmError> {
    let insights_json = serde_json::to_string(insights)?;
    let resources = context
        .resources
        .as_ref()
        .filter(|r| !r.is_empty())
        .map(|r| r.join(", "))
        .unwrap_or_else(|| "None provided".to_string());

    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace(
            "{product_idea}",
            context.product_idea.as_deref().unwrap_or("Not specified"),
        )
        .replace("{target}", target)
        .replace("{problem}", problem)
        .replace("{resources}", &resources)
        .replace("{insights_json}", &insights_json);

    let request = Completion::new(ModelTier::Balanced, &prompt)
        .system(ANALYSIS_SYSTEM)
        .temperature(0.7)
        .max_tokens(3000);

    complete_json(llm, &request).await
}

fn prefer_non_empty<T>(primary: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::research::insights::fallback_insights;
    use crate::search::testing::{result, CannedSearch};

    fn options() -> SearchOptions {
        SearchOptions::with_delay(Duration::ZERO)
    }

    fn context() -> ConversationContext {
        ConversationContext {
            product_idea: Some("An invoicing bot".to_string()),
            target_audience: Some("Freelance designers".to_string()),
            problem_description: Some("late payments".to_string()),
            ..ConversationContext::default()
        }
    }

    #[test]
    fn test_detect_audience() {
        assert_eq!(detect_audience("Small business owners", "x"), Audience::B2b);
        assert_eq!(detect_audience("Parents", "a SaaS for chores"), Audience::B2b);
        assert_eq!(detect_audience("Parents", "bedtime routines"), Audience::B2c);
    }

    #[test]
    fn test_relevance_rounds_to_ten_point_scale() {
        let mut hit = DiscussionResult {
            platform: "reddit.com".to_string(),
            title: "t".to_string(),
            url: "u".to_string(),
            content: "c".to_string(),
            author: "a".to_string(),
            engagement: "e".to_string(),
            relevance_score: 85,
            profile_url: "p".to_string(),
            profile_name: "n".to_string(),
        };
        assert_eq!(to_discussion(&hit).relevance, 9);
        hit.relevance_score = 84;
        assert_eq!(to_discussion(&hit).relevance, 8);
        hit.relevance_score = 100;
        assert_eq!(to_discussion(&hit).relevance, 10);
    }

    #[test]
    fn test_icps_from_insights_slices_pain_points() {
        let insights = fallback_insights();
        let icps = icps_from_insights(&insights, Audience::B2c);

        assert_eq!(icps.len(), 3);
        assert_eq!(icps[0].title, "Early adopters");
        assert_eq!(
            icps[0].description,
            "Early adopters experiencing Current solutions are inadequate"
        );
        assert_eq!(icps[0].pain_points.len(), 3);
        assert_eq!(icps[2].pain_points, vec!["Lack of proper tools".to_string()]);
        assert_eq!(icps[0].channels, vec!["Reddit", "Facebook", "Twitter"]);
    }

    #[test]
    fn test_icp_without_matching_pain_point() {
        let insights = ResearchInsights {
            segments: vec!["A".to_string(), "B".to_string()],
            pain_points: vec!["only one".to_string()],
            ..fallback_insights()
        };
        let icps = icps_from_insights(&insights, Audience::B2b);
        assert_eq!(icps[1].description, "B experiencing the core problem");
        assert!(icps[1].pain_points.is_empty());
        assert_eq!(icps[1].channels[0], "LinkedIn");
    }

    #[tokio::test]
    async fn test_llm_failure_merges_research_into_mock() {
        // Every LLM call fails: fallback variations, fallback insights, mock analysis.
        let search = CannedSearch::new().with(
            r#"site:reddit.com "late payments""#,
            vec![result(
                "Clients paying late again",
                "https://reddit.com/u/inkdrop/comments/1",
                "late payments are a terrible problem",
            )],
        );

        let analysis =
            generate_market_analysis(&ScriptedModel::failing(), &search, &context(), &options())
                .await;

        // B2C: "Freelance designers" and "late payments" carry no business markers
        assert_eq!(analysis.icps.len(), 3);
        assert_eq!(analysis.icps[0].channels[0], "Reddit");
        assert_eq!(analysis.discussions.len(), 1);
        assert_eq!(analysis.discussions[0].profile_name, "inkdrop");
        assert_eq!(analysis.inbound_content.len(), 1);
        assert!(analysis.hypothesis.starts_with("Freelance designers experience"));
    }

    #[tokio::test]
    async fn test_generated_content_fills_what_research_lacks() {
        let llm = ScriptedModel::new(vec![
            Ok(r#"{"variations": [{"text": "late payments", "reasoning": "r", "type": "statement"}]}"#.to_string()),
            Ok(r#"{"overview": "o", "painPoints": [], "segments": [], "opportunities": [], "sentiment": "negative", "keyInsights": []}"#.to_string()),
            Ok(r#"{
                "icps": [{"title": "Agencies", "description": "d", "painPoints": ["p"], "channels": ["LinkedIn"]}],
                "discussions": [],
                "inboundContent": [{"type": "Twitter Poll", "platform": "Twitter", "content": "How late?", "cta": "Vote"}],
                "outreachMessages": [{"type": "Cold Email", "platform": "Email", "message": "Hi {firstName}", "personalization": ["{firstName}"]}],
                "hypothesis": "Agencies will pay to get paid faster."
            }"#.to_string()),
        ]);

        let analysis =
            generate_market_analysis(&llm, &CannedSearch::new(), &context(), &options()).await;

        assert_eq!(analysis.icps[0].title, "Agencies");
        assert!(analysis.discussions.is_empty());
        assert_eq!(analysis.inbound_content[0].content_type, "Twitter Poll");
        assert_eq!(analysis.outreach_messages.len(), 1);
        assert_eq!(analysis.hypothesis, "Agencies will pay to get paid faster.");

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[2].contains("Product Idea: An invoicing bot"));
        assert!(prompts[2].contains("Resources: None provided"));
    }

    #[tokio::test]
    async fn test_missing_hypothesis_uses_default() {
        let llm = ScriptedModel::new(vec![
            Err(LlmError::EmptyContent),
            Err(LlmError::EmptyContent),
            Ok(r#"{"inboundContent": []}"#.to_string()),
        ]);
        let analysis =
            generate_market_analysis(&llm, &CannedSearch::new(), &context(), &options()).await;
        assert_eq!(analysis.hypothesis, default_hypothesis(&context()));
        // research ICPs come from the fallback insights' three segments
        assert_eq!(analysis.icps.len(), 3);
    }
}
