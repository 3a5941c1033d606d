//! Contact enrichment: bulk jobs submitted to FullEnrich and tracked in memory until
//! the provider reports back by webhook or polling.
//!
//! Without a FullEnrich key, `OfflineEnricher` stands in and jobs complete immediately
//! with synthesized contact data.

pub mod fullenrich;
pub mod handlers;
pub mod store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::prospect::{EnrichedData, Prospect};

pub use fullenrich::FullEnrichClient;
pub use store::EnrichmentStore;

/// Custom field carrying our prospect id through the provider round trip.
pub const PROSPECT_ID_FIELD: &str = "prospect_id";

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FullEnrich API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No FullEnrich API key configured")]
    NotConfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Maps a provider status string (`IN_PROGRESS`, `FINISHED`, `CANCELED`, ...).
    pub fn from_provider(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "finished" | "completed" => JobStatus::Completed,
            "failed" | "canceled" | "cancelled" | "credits_insufficient" | "error" => {
                JobStatus::Failed
            }
            "" | "created" | "pending" => JobStatus::Pending,
            _ => JobStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentJob {
    pub id: String,
    pub status: JobStatus,
    pub prospects: Vec<Prospect>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnrichmentJob {
    pub fn new(id: String, status: JobStatus, prospects: Vec<Prospect>) -> Self {
        let now = Utc::now();
        Self {
            id,
            status,
            prospects,
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    /// Merges a provider report into the job. Records are matched to prospects by the
    /// `prospect_id` custom field, falling back to their position in the batch.
    pub fn apply(&mut self, report: &BulkEnrichment) {
        for (position, record) in report.datas.iter().enumerate() {
            let Some(contact) = &record.contact else {
                continue;
            };
            let enriched = contact.to_enriched();
            if enriched.is_empty() {
                continue;
            }

            let target = match record.prospect_id() {
                Some(id) => self
                    .prospects
                    .iter_mut()
                    .find(|p| p.id.as_deref() == Some(id)),
                None => self.prospects.get_mut(position),
            };
            if let Some(prospect) = target {
                prospect.enriched = Some(enriched);
            }
        }

        let status = JobStatus::from_provider(&report.status);
        if status != JobStatus::Pending {
            self.status = status;
        }
        if status == JobStatus::Failed {
            self.error = Some(format!("Provider reported status {}", report.status));
        }
        self.updated_at = Utc::now();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider payloads (GET bulk result and webhook body share this shape)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BulkEnrichment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub enrichment_id: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub datas: Vec<EnrichedRecord>,
}

impl BulkEnrichment {
    /// The enrichment this report belongs to: `id`, else `enrichment_id`.
    pub fn job_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.enrichment_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichedRecord {
    #[serde(default)]
    pub custom: Map<String, Value>,
    #[serde(default)]
    pub contact: Option<ContactRecord>,
}

impl EnrichedRecord {
    fn prospect_id(&self) -> Option<&str> {
        self.custom.get(PROSPECT_ID_FIELD).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub most_probable_email: Option<String>,
    #[serde(default)]
    pub most_probable_email_status: Option<String>,
    #[serde(default)]
    pub most_probable_phone: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailRecord>,
    #[serde(default)]
    pub phones: Vec<PhoneRecord>,
    #[serde(default)]
    pub social_medias: Vec<SocialMedia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailRecord {
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneRecord {
    pub number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialMedia {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ContactRecord {
    pub fn to_enriched(&self) -> EnrichedData {
        let email = self
            .most_probable_email
            .clone()
            .or_else(|| self.emails.first().map(|e| e.email.clone()));
        let email_status = self
            .most_probable_email_status
            .as_deref()
            .or_else(|| self.emails.first().and_then(|e| e.status.as_deref()));
        let social = |kind: &str| {
            self.social_medias
                .iter()
                .find(|s| s.kind.eq_ignore_ascii_case(kind))
                .map(|s| s.url.clone())
        };

        EnrichedData {
            email,
            phone: self
                .most_probable_phone
                .clone()
                .or_else(|| self.phones.first().map(|p| p.number.clone())),
            linkedin_url: social("linkedin"),
            twitter_url: social("twitter"),
            confidence_score: email_status.and_then(confidence_for_status),
            ..EnrichedData::default()
        }
    }
}

fn confidence_for_status(status: &str) -> Option<u8> {
    match status.to_uppercase().as_str() {
        "DELIVERABLE" => Some(95),
        "HIGH_PROBABILITY" => Some(80),
        "CATCH_ALL" => Some(60),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider seam
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ContactEnricher: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    /// Submits a bulk enrichment and returns the provider's enrichment id.
    async fn submit(
        &self,
        name: &str,
        prospects: &[Prospect],
        webhook_url: Option<&str>,
    ) -> Result<String, EnrichmentError>;

    async fn fetch(&self, enrichment_id: &str) -> Result<BulkEnrichment, EnrichmentError>;
}

/// Stand-in when `FULLENRICH_API_KEY` is unset.
pub struct OfflineEnricher;

#[async_trait]
impl ContactEnricher for OfflineEnricher {
    fn is_available(&self) -> bool {
        false
    }

    async fn submit(
        &self,
        _name: &str,
        _prospects: &[Prospect],
        _webhook_url: Option<&str>,
    ) -> Result<String, EnrichmentError> {
        Err(EnrichmentError::NotConfigured)
    }

    async fn fetch(&self, _enrichment_id: &str) -> Result<BulkEnrichment, EnrichmentError> {
        Err(EnrichmentError::NotConfigured)
    }
}

/// Synthesized enrichment for offline mode. Keeps whatever the prospect already has.
pub fn mock_enrichment(prospect: &Prospect) -> EnrichedData {
    let mut rng = rand::thread_rng();
    let (first, last) = prospect.split_name();
    let first = slug(first);
    let last = slug(last);
    let company = match slug(&prospect.company) {
        s if s.is_empty() => "company".to_string(),
        s => s,
    };
    let handle = if last.is_empty() {
        first.clone()
    } else {
        format!("{first}.{last}")
    };

    let email = if prospect.email.is_empty() {
        format!("{handle}@{company}.com")
    } else {
        prospect.email.clone()
    };
    let linkedin_url = if prospect.linkedin.is_empty() {
        format!("https://linkedin.com/in/{}", handle.replace('.', "-"))
    } else {
        prospect.linkedin.clone()
    };

    EnrichedData {
        email: Some(email),
        phone: Some(format!(
            "+1 (555) {:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10000)
        )),
        company_email: Some(format!("contact@{company}.com")),
        company_phone: None,
        company_website: Some(format!("https://{company}.com")),
        linkedin_url: Some(linkedin_url),
        twitter_url: None,
        confidence_score: Some(rng.gen_range(70..=98)),
    }
}

fn slug(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
