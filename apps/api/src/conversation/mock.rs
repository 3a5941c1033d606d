//! Fixed market analysis served when the LLM is unavailable or returns unusable output.

use crate::models::conversation::ConversationContext;
use crate::models::market::{Discussion, Icp, InboundContent, MarketAnalysis, OutreachMessage};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `<target> experience significant pain with <problem> and would be willing to try <product> ...`
pub fn default_hypothesis(context: &ConversationContext) -> String {
    format!(
        "{} experience significant pain with {} and would be willing to try {} if it addresses their core needs effectively.",
        context.target_audience.as_deref().unwrap_or("Target users"),
        context.problem_description.as_deref().unwrap_or("the current problem"),
        context.product_idea.as_deref().unwrap_or("a new solution"),
    )
}

pub fn mock_market_analysis(context: &ConversationContext) -> MarketAnalysis {
    MarketAnalysis {
        icps: vec![
            Icp {
                title: "Early Adopter Segment".to_string(),
                description: "Tech-savvy users experiencing the core problem you're solving"
                    .to_string(),
                pain_points: strings(&[
                    "Struggling with current solutions",
                    "Actively seeking alternatives",
                    "Willing to try new approaches",
                ]),
                channels: strings(&["LinkedIn", "Reddit", "Twitter", "Industry Forums"]),
            },
            Icp {
                title: "Professional Users".to_string(),
                description: "Business professionals who need this solution for work".to_string(),
                pain_points: strings(&[
                    "Current tools are inefficient",
                    "Need better workflow integration",
                    "Looking for time-saving solutions",
                ]),
                channels: strings(&["LinkedIn", "Slack Communities", "Industry Events"]),
            },
        ],
        discussions: vec![
            Discussion {
                platform: "LinkedIn".to_string(),
                title: "Anyone else frustrated with current solutions for this problem?"
                    .to_string(),
                url: "https://linkedin.com/posts/example-post".to_string(),
                engagement: "45 comments, 120 likes".to_string(),
                relevance: 8,
                profile_url: "https://linkedin.com/in/potential-user".to_string(),
                profile_name: "Sarah Chen".to_string(),
            },
            Discussion {
                platform: "Reddit".to_string(),
                title: "What tools do you use for [related problem]?".to_string(),
                url: "https://reddit.com/r/productivity/comments/example".to_string(),
                engagement: "67 upvotes, 34 comments".to_string(),
                relevance: 9,
                profile_url: "https://reddit.com/user/productivityguru".to_string(),
                profile_name: "ProductivityGuru".to_string(),
            },
        ],
        inbound_content: vec![InboundContent {
            content_type: "LinkedIn Post".to_string(),
            platform: "LinkedIn".to_string(),
            content: "I'm researching a problem many of us run into...\n\nHow do you currently handle [specific problem]? What's your biggest frustration?\n\nI'm building something to solve this and would love your input! 👇".to_string(),
            cta: "Comment with your experience".to_string(),
            title: None,
            target_audience: None,
            pain_point: None,
            estimated_engagement: None,
        }],
        outreach_messages: vec![OutreachMessage {
            message_type: "LinkedIn Comment".to_string(),
            platform: "LinkedIn".to_string(),
            message: "Great point about {specificPain}! I'm researching this exact problem right now. I'd love to hear more about your experience - could I send you a few quick questions by DM?".to_string(),
            personalization: strings(&["{specificPain}", "{firstName}"]),
        }],
        hypothesis: default_hypothesis(context),
    }
}
