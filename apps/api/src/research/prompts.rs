// LLM prompt templates for the research pipeline.

/// Phrasing variation prompt. Replace `{problem}` before sending.
pub const VARIATIONS_PROMPT_TEMPLATE: &str = r#"Generate 20 VERY DIFFERENT variations of this problem statement for user research:

Original problem: "{problem}"

Instructions:
- Use technical synonyms and the vocabulary of the domain
- Write user questions ("How to...", "Why...", "What tool...")
- Explore adjacent problems and sub-problems
- Vary the complexity (beginner to expert)
- Include negative and positive phrasings
- Think about different angles of approach

Required JSON format:
{
  "variations": [
    {
      "text": "variation of the problem",
      "reasoning": "why this variation is relevant",
      "type": "question|statement|pain_point"
    }
  ]
}

Return ONLY the JSON, no other text."#;

/// Insight summarization prompt. Replace `{problem}` and `{discussions}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze these user discussions and generate insights for user research:

Problem: "{problem}"

Discussions found:
{discussions}

Generate a JSON object with:
{
  "overview": "General summary (2-3 sentences)",
  "painPoints": ["Pain point 1", "Pain point 2", "Pain point 3"],
  "segments": ["User segment 1", "User segment 2", "User segment 3"],
  "opportunities": ["Business opportunity 1", "Business opportunity 2"],
  "sentiment": "negative|positive|neutral",
  "keyInsights": ["Key insight 1", "Key insight 2", "Key insight 3"]
}

Return ONLY the JSON, no other text."#;
