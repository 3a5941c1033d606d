// Research pipeline: phrasing variations -> Google Dork search -> scoring -> insights.
// All LLM calls go through llm_client, all web searches through search.

pub mod dorks;
pub mod insights;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod variations;

use serde::{Deserialize, Serialize};

pub use insights::ResearchInsights;
pub use pipeline::{run_complete_research_pipeline, ResearchReport, SearchOptions};

/// A search hit that survived scoring. `relevance_score` is on a 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResult {
    pub platform: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub author: String,
    pub engagement: String,
    pub relevance_score: u32,
    pub profile_url: String,
    pub profile_name: String,
}
