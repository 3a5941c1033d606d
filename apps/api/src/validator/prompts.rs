// LLM prompt templates for the validator endpoints.

/// Deep market search for a product idea.
/// Replace: {product_idea}, {context_line}, {resources_line}
pub const DEEP_SEARCH_PROMPT_TEMPLATE: &str = r#"You are an expert market researcher and product validation specialist. Your task is to analyze this product idea and generate realistic market research data based on your knowledge of current market trends and consumer behavior.

PRODUCT IDEA: {product_idea}
{context_line}
{resources_line}

Based on your understanding of the market, generate realistic findings for this product idea. Focus on:

1. RELEVANT DISCUSSIONS: realistic discussions where people talk about problems this product could solve
2. POTENTIAL CUSTOMERS: realistic customer segments who would benefit from this product
3. MARKET INSIGHTS: demand, competition and opportunities based on current market trends

Consider platforms like Reddit (relevant subreddits), LinkedIn posts, Twitter conversations, Quora questions, Product Hunt discussions and niche community forums.

Return your findings in this JSON format:
{
  "discussions": [
    {
      "platform": "reddit",
      "title": "Post title related to the product idea",
      "url": "https://reddit.com/r/relevantsubreddit/example",
      "author": "username",
      "authorContext": "Job or context",
      "content": "Post content describing a problem this product could solve...",
      "date": "2024-01-15",
      "relevance": 90,
      "problem": "Specific problem they're facing",
      "solution": "How the product could help them"
    }
  ],
  "people": [
    {
      "name": "Full Name",
      "platform": "linkedin",
      "context": "Job title and company",
      "problem": "Specific problem they're struggling with",
      "originalPost": "Post content...",
      "url": "https://linkedin.com/example",
      "engagement": "Engagement metrics"
    }
  ],
  "insights": {
    "marketDemand": "Assessment of market demand for this specific product",
    "commonPainPoints": ["Pain points related to this product category"],
    "bestChannels": ["Most effective channels for reaching this audience"],
    "nextSteps": ["Next steps for validating this product"]
  }
}

Make sure all the data is specifically relevant to the product idea: "{product_idea}". Generate at least 3-5 relevant discussions and 2-3 potential customers.

Return ONLY valid JSON, no additional text."#;

/// Personalized outreach message.
/// Replace: {product_idea}, {target_person_json}, {search_results_json}
pub const OUTREACH_PROMPT_TEMPLATE: &str = r#"You are an expert in customer outreach and user research messaging. Your task is to create a highly personalized outreach message for a potential customer.

PRODUCT IDEA: {product_idea}

TARGET PERSON JSON:
{target_person_json}

SEARCH CONTEXT:
{search_results_json}

Create a personalized outreach message that:
1. Shows understanding: reference their specific problem and situation
2. Provides value: explain how the product could help them
3. Is platform-appropriate: use the right tone
4. Has a clear call to action
5. Is concise: keep it under 150 words

Return only the message text, no additional formatting or explanations."#;

/// Contact lookup for one person. Replace: {target_person_json}
pub const CONTACTS_PROMPT_TEMPLATE: &str = r#"You are an expert in finding professional contact information and conducting web research.

PERSON TO FIND (JSON):
{target_person_json}

Find their contact information, including:
1. Professional email address
2. LinkedIn profile URL
3. Twitter handle (if relevant)
4. Company website
5. Any other professional contact methods

Return the results in this JSON format:
{
  "email": "person@company.com",
  "linkedin": "https://linkedin.com/in/username",
  "twitter": "@username",
  "company": "Company Name",
  "website": "https://company.com",
  "other": "Any other relevant contact info"
}

Omit fields you cannot find. Return ONLY valid JSON, no additional text."#;

/// Inbound content pieces for the identified ICPs.
/// Replace: {product_idea}, {insights_json}, {icps_json}
pub const INBOUND_CONTENT_PROMPT_TEMPLATE: &str = r#"You are an expert content strategist and inbound marketing specialist. Create engaging inbound content that will attract and engage the target audience for this product idea.

PRODUCT IDEA: {product_idea}

MARKET INSIGHTS:
{insights_json}

IDENTIFIED ICPS:
{icps_json}

Create one piece for each of: LinkedIn post, Twitter thread, Reddit post, newsletter content, blog post idea.
Each piece must address a pain point of a specific ICP, provide value, and end with a clear call to action.

Return your content in this JSON format:
{
  "inboundContent": [
    {
      "type": "LinkedIn Post",
      "platform": "LinkedIn",
      "title": "Engaging headline",
      "content": "Full post content with proper formatting...",
      "cta": "Clear call-to-action",
      "targetAudience": "Specific ICP this targets",
      "painPoint": "Pain point this addresses",
      "estimatedEngagement": "High/Medium/Low"
    }
  ]
}

Make sure all content is tailored to the product idea: "{product_idea}".
Return ONLY valid JSON, no additional text."#;

pub fn build_deep_search_prompt(
    product_idea: &str,
    context: Option<&str>,
    resources_json: Option<&str>,
) -> String {
    let context_line = context
        .map(|c| format!("CONTEXT: {c}"))
        .unwrap_or_default();
    let resources_line = resources_json
        .map(|r| format!("ADDITIONAL RESOURCES: {r}"))
        .unwrap_or_default();

    DEEP_SEARCH_PROMPT_TEMPLATE
        .replace("{context_line}", &context_line)
        .replace("{resources_line}", &resources_line)
        .replace("{product_idea}", product_idea)
}

pub fn build_outreach_prompt(
    product_idea: &str,
    search_results_json: &str,
    target_person_json: &str,
) -> String {
    OUTREACH_PROMPT_TEMPLATE
        .replace("{target_person_json}", target_person_json)
        .replace("{search_results_json}", search_results_json)
        .replace("{product_idea}", product_idea)
}

pub fn build_contacts_prompt(target_person_json: &str) -> String {
    CONTACTS_PROMPT_TEMPLATE.replace("{target_person_json}", target_person_json)
}

pub fn build_inbound_content_prompt(
    product_idea: &str,
    insights_json: &str,
    icps_json: &str,
) -> String {
    INBOUND_CONTENT_PROMPT_TEMPLATE
        .replace("{insights_json}", insights_json)
        .replace("{icps_json}", icps_json)
        .replace("{product_idea}", product_idea)
}
