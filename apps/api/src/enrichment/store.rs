use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::enrichment::{BulkEnrichment, EnrichmentJob};

/// Finished jobs are dropped once they have not changed for this long.
const FINISHED_JOB_TTL_HOURS: i64 = 24;
/// Above this many jobs, the oldest finished ones are evicted first.
const MAX_JOBS: usize = 10_000;

/// In-memory enrichment job table, shared by the HTTP handlers. Lost on restart.
///
/// Finished jobs are pruned on insert, by age and then by table size. Jobs still waiting
/// on the provider are never evicted.
#[derive(Clone)]
pub struct EnrichmentStore {
    jobs: Arc<RwLock<HashMap<String, EnrichmentJob>>>,
    finished_ttl: Duration,
    max_jobs: usize,
}

impl Default for EnrichmentStore {
    fn default() -> Self {
        Self::with_limits(Duration::hours(FINISHED_JOB_TTL_HOURS), MAX_JOBS)
    }
}

impl EnrichmentStore {
    pub fn with_limits(finished_ttl: Duration, max_jobs: usize) -> Self {
        Self {
            jobs: Arc::default(),
            finished_ttl,
            max_jobs,
        }
    }

    pub async fn insert(&self, job: EnrichmentJob) {
        let mut jobs = self.jobs.write().await;
        self.prune(&mut jobs);
        jobs.insert(job.id.clone(), job);
    }

    pub async fn get(&self, id: &str) -> Option<EnrichmentJob> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Merges a provider report into job `id`. Returns the updated job, or `None` if unknown.
    pub async fn apply(&self, id: &str, report: &BulkEnrichment) -> Option<EnrichmentJob> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;
        job.apply(report);
        Some(job.clone())
    }

    /// Leaves room for one more job.
    fn prune(&self, jobs: &mut HashMap<String, EnrichmentJob>) {
        let before = jobs.len();
        let cutoff = Utc::now() - self.finished_ttl;
        jobs.retain(|_, job| !(job.status.is_finished() && job.updated_at < cutoff));

        if jobs.len() >= self.max_jobs {
            let mut finished: Vec<_> = jobs
                .values()
                .filter(|job| job.status.is_finished())
                .map(|job| (job.updated_at, job.id.clone()))
                .collect();
            finished.sort();
            let excess = jobs.len() + 1 - self.max_jobs;
            for (_, id) in finished.into_iter().take(excess) {
                jobs.remove(&id);
            }
        }

        if jobs.len() < before {
            debug!("Pruned {} enrichment jobs", before - jobs.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::JobStatus;

    fn job_updated_hours_ago(id: &str, status: JobStatus, hours: i64) -> EnrichmentJob {
        let mut job = EnrichmentJob::new(id.to_string(), status, Vec::new());
        job.updated_at = Utc::now() - Duration::hours(hours);
        job
    }

    #[tokio::test]
    async fn test_insert_get_apply() {
        let store = EnrichmentStore::default();
        store
            .insert(EnrichmentJob::new(
                "e1".to_string(),
                JobStatus::InProgress,
                Vec::new(),
            ))
            .await;

        assert_eq!(store.get("e1").await.unwrap().status, JobStatus::InProgress);
        assert!(store.get("missing").await.is_none());

        let report: BulkEnrichment =
            serde_json::from_str(r#"{"id": "e1", "status": "FINISHED", "datas": []}"#).unwrap();
        let updated = store.apply("e1", &report).await.unwrap();
        assert_eq!(updated.status, JobStatus::Completed);
        assert_eq!(store.get("e1").await.unwrap().status, JobStatus::Completed);
        assert!(store.apply("missing", &report).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_jobs() {
        let store = EnrichmentStore::default();
        let handle = store.clone();
        handle
            .insert(EnrichmentJob::new(
                "e2".to_string(),
                JobStatus::Completed,
                Vec::new(),
            ))
            .await;
        assert!(store.get("e2").await.is_some());
    }

    #[tokio::test]
    async fn test_stale_finished_jobs_are_pruned() {
        let store = EnrichmentStore::default();
        store
            .insert(job_updated_hours_ago("old-done", JobStatus::Completed, 25))
            .await;
        store
            .insert(job_updated_hours_ago("old-failed", JobStatus::Failed, 48))
            .await;
        store
            .insert(job_updated_hours_ago("old-running", JobStatus::InProgress, 48))
            .await;
        store
            .insert(job_updated_hours_ago("recent-done", JobStatus::Completed, 1))
            .await;

        assert!(store.get("old-done").await.is_none());
        assert!(store.get("old-failed").await.is_none());
        assert!(store.get("old-running").await.is_some());
        assert!(store.get("recent-done").await.is_some());
    }

    #[tokio::test]
    async fn test_size_cap_evicts_oldest_finished_first() {
        let store = EnrichmentStore::with_limits(Duration::hours(FINISHED_JOB_TTL_HOURS), 3);
        store
            .insert(job_updated_hours_ago("running", JobStatus::InProgress, 10))
            .await;
        store
            .insert(job_updated_hours_ago("older", JobStatus::Completed, 5))
            .await;
        store
            .insert(job_updated_hours_ago("newer", JobStatus::Completed, 2))
            .await;
        store
            .insert(EnrichmentJob::new("fresh".to_string(), JobStatus::Completed, Vec::new()))
            .await;

        assert!(store.get("older").await.is_none());
        assert!(store.get("running").await.is_some());
        assert!(store.get("newer").await.is_some());
        assert!(store.get("fresh").await.is_some());
    }
}
