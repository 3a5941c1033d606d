use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::enrichment::{BulkEnrichment, ContactEnricher, EnrichmentError, PROSPECT_ID_FIELD};
use crate::llm_client::http_client;
use crate::models::prospect::Prospect;

const FULLENRICH_API_BASE: &str = "https://app.fullenrich.com/api/v1";
const ENRICH_FIELDS: &[&str] = &["contact.emails", "contact.phones"];

#[derive(Debug, Serialize)]
struct BulkRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<&'a str>,
    datas: Vec<ContactRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct ContactRequest<'a> {
    firstname: &'a str,
    lastname: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    company_name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    linkedin_url: &'a str,
    enrich_fields: &'static [&'static str],
    custom: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct BulkSubmitted {
    enrichment_id: String,
}

fn build_bulk_request<'a>(
    name: &'a str,
    prospects: &'a [Prospect],
    webhook_url: Option<&'a str>,
) -> BulkRequest<'a> {
    let datas = prospects
        .iter()
        .map(|prospect| {
            let (firstname, lastname) = prospect.split_name();
            let mut custom = Map::new();
            if let Some(id) = &prospect.id {
                custom.insert(PROSPECT_ID_FIELD.to_string(), Value::String(id.clone()));
            }
            ContactRequest {
                firstname,
                lastname,
                company_name: &prospect.company,
                linkedin_url: &prospect.linkedin,
                enrich_fields: ENRICH_FIELDS,
                custom,
            }
        })
        .collect();

    BulkRequest {
        name,
        webhook_url,
        datas,
    }
}

/// FullEnrich bulk contact enrichment API, bearer-token auth.
pub struct FullEnrichClient {
    api_key: String,
    http: reqwest::Client,
}

impl FullEnrichClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, EnrichmentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(EnrichmentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContactEnricher for FullEnrichClient {
    async fn submit(
        &self,
        name: &str,
        prospects: &[Prospect],
        webhook_url: Option<&str>,
    ) -> Result<String, EnrichmentError> {
        let body = build_bulk_request(name, prospects, webhook_url);

        let response = self
            .http
            .post(format!("{FULLENRICH_API_BASE}/contact/enrich/bulk"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let submitted: BulkSubmitted = Self::check(response).await?.json().await?;

        info!(
            "Submitted {} contacts to FullEnrich (enrichment {})",
            prospects.len(),
            submitted.enrichment_id
        );
        Ok(submitted.enrichment_id)
    }

    async fn fetch(&self, enrichment_id: &str) -> Result<BulkEnrichment, EnrichmentError> {
        let response = self
            .http
            .get(format!(
                "{FULLENRICH_API_BASE}/contact/enrich/bulk/{enrichment_id}"
            ))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let report: BulkEnrichment = Self::check(response).await?.json().await?;

        debug!(
            "FullEnrich {} status {}: {} records",
            enrichment_id,
            report.status,
            report.datas.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect(id: Option<&str>, name: &str) -> Prospect {
        Prospect {
            id: id.map(str::to_string),
            name: name.to_string(),
            title: "Head of Ops".to_string(),
            company: "Acme".to_string(),
            email: String::new(),
            linkedin: String::new(),
            source: "LinkedIn".to_string(),
            relevance_score: 75,
            enriched: None,
        }
    }

    #[test]
    fn test_bulk_request_body() {
        let prospects = vec![prospect(Some("p1"), "Ana Maria Ruiz"), prospect(None, "Bo")];
        let body = build_bulk_request(
            "batch",
            &prospects,
            Some("https://api.example.com/api/webhook/fullenrich"),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["name"], "batch");
        assert_eq!(
            json["webhook_url"],
            "https://api.example.com/api/webhook/fullenrich"
        );
        let first = &json["datas"][0];
        assert_eq!(first["firstname"], "Ana");
        assert_eq!(first["lastname"], "Maria Ruiz");
        assert_eq!(first["company_name"], "Acme");
        assert!(first.get("linkedin_url").is_none());
        assert_eq!(first["custom"]["prospect_id"], "p1");
        assert_eq!(first["enrich_fields"][0], "contact.emails");

        let second = &json["datas"][1];
        assert_eq!(second["lastname"], "");
        assert!(second["custom"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_webhook_url_omitted_when_unset() {
        let prospects = vec![prospect(Some("p1"), "Ana")];
        let json = serde_json::to_value(build_bulk_request("batch", &prospects, None)).unwrap();
        assert!(json.get("webhook_url").is_none());
    }
}
