use serde::{Deserialize, Serialize};

/// Ideal Customer Profile: a target-audience segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icp {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
}

/// A discussion surfaced to the dashboard. `relevance` is on a 0–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub platform: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub engagement: String,
    #[serde(default)]
    pub relevance: u8,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub profile_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub platform: String,
    pub content: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_engagement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub platform: String,
    pub message: String,
    #[serde(default)]
    pub personalization: Vec<String>,
}

/// Everything the dashboard renders after the intake conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub icps: Vec<Icp>,
    pub discussions: Vec<Discussion>,
    pub inbound_content: Vec<InboundContent>,
    pub outreach_messages: Vec<OutreachMessage>,
    pub hypothesis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_content_optional_fields_are_omitted() {
        let content = InboundContent {
            content_type: "LinkedIn Post".to_string(),
            platform: "LinkedIn".to_string(),
            content: "How do you handle this today?".to_string(),
            cta: "Comment below".to_string(),
            title: None,
            target_audience: None,
            pain_point: None,
            estimated_engagement: None,
        };
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], "LinkedIn Post");
        assert!(value.get("title").is_none());
        assert!(value.get("estimatedEngagement").is_none());
    }

    #[test]
    fn test_discussion_uses_camel_case_contract() {
        let json = r#"{
            "platform": "Reddit",
            "title": "What tools do you use?",
            "url": "https://reddit.com/r/x",
            "engagement": "67 upvotes",
            "relevance": 9,
            "profileUrl": "https://reddit.com/user/guru",
            "profileName": "Guru"
        }"#;
        let discussion: Discussion = serde_json::from_str(json).unwrap();
        assert_eq!(discussion.relevance, 9);
        assert_eq!(discussion.profile_name, "Guru");
    }

    #[test]
    fn test_icp_tolerates_missing_lists() {
        let icp: Icp =
            serde_json::from_str(r#"{"title": "Founders", "description": "Solo founders"}"#)
                .unwrap();
        assert!(icp.pain_points.is_empty());
        assert!(icp.channels.is_empty());
    }
}
