//! Research pipeline: orchestrates variations, dork search, scoring and insights.
//!
//! Flow: generate_problem_variations → search_discussions_with_dorks → generate_research_insights.
//!
//! Strictly sequential. Search calls are spaced by a fixed delay; there is no
//! fan-out and no retry, a failed query is logged and skipped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::llm_client::LanguageModel;
use crate::research::dorks::{
    build_google_dork, extract_profile_name, generate_engagement_metrics, generate_profile_url,
};
use crate::research::insights::{generate_research_insights, ResearchInsights};
use crate::research::scoring::{calculate_advanced_score, MIN_RELEVANCE_SCORE};
use crate::research::variations::{generate_problem_variations, ProblemVariation};
use crate::research::DiscussionResult;
use crate::search::platforms::Audience;
use crate::search::SearchProvider;

/// Results kept by a full pipeline run.
pub const PIPELINE_MAX_RESULTS: usize = 20;

/// Knobs for the dork search step.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Only the first N variations are searched.
    pub max_variations: usize,
    /// Only the first N platforms of the audience's list are searched.
    pub max_platforms: usize,
    pub results_per_query: u32,
    pub min_score: u32,
    /// Pause before every search call.
    pub delay: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_variations: 5,
            max_platforms: 4,
            results_per_query: 10,
            min_score: MIN_RELEVANCE_SCORE,
            delay: Duration::from_millis(500),
        }
    }
}

impl SearchOptions {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    pub variations: Vec<ProblemVariation>,
    pub discussions: Vec<DiscussionResult>,
    pub insights: ResearchInsights,
}

/// Searches every (variation, platform) pair with a Google Dork, keeps hits scoring at
/// least `options.min_score`, and returns at most `max_results` sorted by score, best first.
pub async fn search_discussions_with_dorks(
    search: &dyn SearchProvider,
    variations: &[ProblemVariation],
    audience: Audience,
    max_results: usize,
    options: &SearchOptions,
) -> Vec<DiscussionResult> {
    let platforms = audience.platforms();
    let mut all_results: Vec<DiscussionResult> = Vec::new();

    'variations: for variation in variations.iter().take(options.max_variations) {
        for platform in platforms.iter().take(options.max_platforms).copied() {
            let dork = build_google_dork(platform, &variation.text);

            if !options.delay.is_zero() {
                tokio::time::sleep(options.delay).await;
            }

            let serp = match search.search(&dork, options.results_per_query).await {
                Ok(serp) => serp,
                Err(e) => {
                    warn!("Search failed for {platform}: {e}");
                    continue;
                }
            };

            let before = all_results.len();
            for hit in serp.results {
                let content = format!("{} {}", hit.description, hit.title);
                let relevance_score = calculate_advanced_score(&content, &variation.text, platform);
                if relevance_score < options.min_score {
                    continue;
                }

                let profile_name = extract_profile_name(&hit.url, &hit.title, platform);
                let profile_url = generate_profile_url(&hit.url, platform);

                all_results.push(DiscussionResult {
                    platform: platform.to_string(),
                    title: hit.title,
                    url: hit.url,
                    content: hit.description,
                    author: profile_name.clone(),
                    engagement: generate_engagement_metrics(),
                    relevance_score,
                    profile_url,
                    profile_name,
                });
            }
            debug!("{dork}: kept {} hits", all_results.len() - before);

            if all_results.len() >= max_results {
                break 'variations;
            }
        }
    }

    // Stable sort keeps search order among equal scores
    all_results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    all_results.truncate(max_results);
    all_results
}

/// Runs the three pipeline steps end to end.
pub async fn run_complete_research_pipeline(
    llm: &dyn LanguageModel,
    search: &dyn SearchProvider,
    original_problem: &str,
    target_audience: &str,
    audience: Audience,
    options: &SearchOptions,
) -> ResearchReport {
    info!(
        "Starting research pipeline ({:?}) for audience {:?}",
        audience, target_audience
    );

    info!("Generating problem variations...");
    let variations = generate_problem_variations(llm, original_problem).await;

    info!("Searching discussions with Google Dorks...");
    let discussions = search_discussions_with_dorks(
        search,
        &variations,
        audience,
        PIPELINE_MAX_RESULTS,
        options,
    )
    .await;
    info!("Found {} relevant discussions", discussions.len());

    info!("Generating research insights...");
    let insights = generate_research_insights(llm, &discussions, original_problem).await;

    info!("Research pipeline completed");

    ResearchReport {
        variations,
        discussions,
        insights,
    }
}
