use serde::{Deserialize, Serialize};

/// A potential customer shown in sales mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub relevance_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enriched: Option<EnrichedData>,
}

impl Prospect {
    /// Splits `name` into (first, last). Single-word names have an empty last name.
    pub fn split_name(&self) -> (&str, &str) {
        let name = self.name.trim();
        match name.split_once(char::is_whitespace) {
            Some((first, last)) => (first, last.trim()),
            None => (name, ""),
        }
    }
}

/// Fields discovered by the enrichment provider. Snake_case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<u8>,
}

impl EnrichedData {
    pub fn is_empty(&self) -> bool {
        *self == EnrichedData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect(name: &str) -> Prospect {
        Prospect {
            id: None,
            name: name.to_string(),
            title: "CTO".to_string(),
            company: "Acme".to_string(),
            email: "cto@acme.io".to_string(),
            linkedin: String::new(),
            source: "LinkedIn".to_string(),
            relevance_score: 92,
            enriched: None,
        }
    }

    #[test]
    fn test_split_name_two_words() {
        assert_eq!(prospect("Sarah Chen").split_name(), ("Sarah", "Chen"));
    }

    #[test]
    fn test_split_name_keeps_compound_last_name() {
        assert_eq!(
            prospect("Marie de La Tour").split_name(),
            ("Marie", "de La Tour")
        );
    }

    #[test]
    fn test_split_name_single_word() {
        assert_eq!(prospect("Cher").split_name(), ("Cher", ""));
    }

    #[test]
    fn test_prospect_reads_ui_payload() {
        let json = r#"{
            "name": "Sarah Chen",
            "title": "Head of Product",
            "company": "TechCorp",
            "email": "sarah@techcorp.com",
            "linkedin": "https://linkedin.com/in/sarahchen",
            "source": "LinkedIn Discussion",
            "relevanceScore": 95
        }"#;
        let p: Prospect = serde_json::from_str(json).unwrap();
        assert_eq!(p.relevance_score, 95);
        assert!(p.id.is_none());
        assert!(p.enriched.is_none());
    }

    #[test]
    fn test_enriched_data_default_is_empty() {
        assert!(EnrichedData::default().is_empty());
        let data = EnrichedData {
            phone: Some("+1 555 0100".to_string()),
            ..EnrichedData::default()
        };
        assert!(!data.is_empty());
    }
}
