//! Fixed responses served by the validator endpoints when no LLM key is configured.

use serde_json::{json, Value};

use crate::conversation::intake::MAX_EXCHANGES;
use crate::conversation::prompts::HANDOFF_PHRASE;
use crate::models::conversation::ConversationContext;
use crate::models::market::InboundContent;
use crate::validator::ContactInfo;

pub const MOCK_OUTREACH_MESSAGE: &str = "Hi there! I noticed your post about product validation challenges and thought our AI-powered validation tool might be exactly what you're looking for. Would love to show you a quick demo if you're interested!";

const MOCK_FOLLOW_UP: &str = "Thanks for sharing! Who exactly is your target audience, and what problem are you solving for them?";

pub fn mock_deep_search() -> Value {
    json!({
        "discussions": [
            {
                "platform": "reddit",
                "title": "Struggling to validate my SaaS idea",
                "url": "https://reddit.com/r/startups/example",
                "author": "founder123",
                "authorContext": "Solo founder",
                "content": "I have this idea for a SaaS tool but I'm not sure how to validate it properly...",
                "date": "2024-01-15",
                "relevance": 95,
                "problem": "Need systematic approach to validate ideas",
                "solution": "Your product could help by providing structured validation framework"
            }
        ],
        "people": [
            {
                "name": "Sarah Chen",
                "platform": "linkedin",
                "context": "Product Manager at Startup",
                "problem": "Struggling with product validation",
                "originalPost": "Looking for better ways to validate product ideas...",
                "url": "https://linkedin.com/example",
                "engagement": "15 likes, 8 comments"
            }
        ],
        "insights": {
            "marketDemand": "Strong demand for validation tools among founders",
            "commonPainPoints": ["Time constraints", "Lack of systematic approach", "Uncertainty"],
            "bestChannels": ["Reddit r/startups", "LinkedIn", "Twitter"],
            "nextSteps": ["Direct outreach", "Landing page", "MVP development"]
        }
    })
}

pub fn mock_contacts() -> ContactInfo {
    let fields = [
        ("email", "person@company.com"),
        ("linkedin", "https://linkedin.com/in/username"),
        ("twitter", "@username"),
        ("company", "Example Company"),
        ("website", "https://company.com"),
    ];
    ContactInfo(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect(),
    )
}

pub fn mock_inbound_content(product_idea: &str) -> Vec<InboundContent> {
    vec![
        InboundContent {
            content_type: "LinkedIn Post".to_string(),
            platform: "LinkedIn".to_string(),
            content: format!(
                "Quick question for my network: how do you handle the problem behind {product_idea} today?\n\nI'm researching this space and would love to hear what works and what doesn't."
            ),
            cta: "Share your experience in the comments".to_string(),
            title: Some("What's your current workaround?".to_string()),
            target_audience: Some("Early adopters".to_string()),
            pain_point: Some("Current solutions are inadequate".to_string()),
            estimated_engagement: Some("Medium".to_string()),
        },
        InboundContent {
            content_type: "Twitter Poll".to_string(),
            platform: "Twitter".to_string(),
            content: "What's the most frustrating part of solving this today?\n\n1. Too slow\n2. Too expensive\n3. No good tools\n4. Something else".to_string(),
            cta: "Vote and reply with details".to_string(),
            title: None,
            target_audience: Some("Professional users".to_string()),
            pain_point: Some("Process is time-consuming".to_string()),
            estimated_engagement: Some("High".to_string()),
        },
    ]
}

/// Offline chat reply: asks for the missing details until the exchange limit, then hands off.
pub fn mock_chat_reply(context: &ConversationContext) -> &'static str {
    if context.message_count + 1 >= MAX_EXCHANGES {
        HANDOFF_PHRASE
    } else {
        MOCK_FOLLOW_UP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_search_mock_shape() {
        let mock = mock_deep_search();
        assert_eq!(mock["discussions"][0]["relevance"], 95);
        assert_eq!(mock["people"][0]["name"], "Sarah Chen");
        assert_eq!(mock["insights"]["commonPainPoints"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_chat_reply_hands_off_on_last_exchange() {
        let early = ConversationContext::default();
        assert_eq!(mock_chat_reply(&early), MOCK_FOLLOW_UP);

        let last = ConversationContext {
            message_count: 2,
            ..ConversationContext::default()
        };
        assert_eq!(mock_chat_reply(&last), HANDOFF_PHRASE);
    }

    #[test]
    fn test_inbound_mock_mentions_product() {
        let content = mock_inbound_content("a meal planner");
        assert_eq!(content.len(), 2);
        assert!(content[0].content.contains("a meal planner"));
    }
}
