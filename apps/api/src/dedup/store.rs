//! Read-only job store interface consumed by the detector, with a Postgres
//! implementation and an in-memory one.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::dedup::normalize::normalize_text;
use crate::models::job::JobPosting;

/// The narrow view of the job store the detector needs.
///
/// Carried in `DuplicateDetector` as `Arc<dyn JobStore>`.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>>;

    /// Postings discovered within the last `lookback_days` whose title contains at
    /// least one keyword (case-insensitive), newest first.
    async fn get_recent_jobs_by_title(
        &self,
        keywords: &[String],
        lookback_days: u32,
    ) -> Result<Vec<JobPosting>>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

const JOB_COLUMNS: &str =
    "id, title, company, description, location, source, url, discovered_at";

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM job_postings WHERE id = $1");
        sqlx::query_as::<_, JobPosting>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load job {id}"))
    }

    async fn get_recent_jobs_by_title(
        &self,
        keywords: &[String],
        lookback_days: u32,
    ) -> Result<Vec<JobPosting>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        let patterns: Vec<String> = keywords.iter().map(|k| ilike_contains(k)).collect();
        let lookback = i32::try_from(lookback_days).context("lookback_days out of range")?;

        let sql = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM job_postings
            WHERE discovered_at >= NOW() - make_interval(days => $1)
              AND title ILIKE ANY($2)
            ORDER BY discovered_at DESC
            "#
        );
        let jobs = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(lookback)
            .bind(&patterns)
            .fetch_all(&self.pool)
            .await
            .context("Failed to query recent jobs by title")?;

        debug!(
            "Title prefilter matched {} jobs for {} keywords",
            jobs.len(),
            keywords.len()
        );
        Ok(jobs)
    }
}

/// `%keyword%` with LIKE metacharacters escaped (backslash is the default escape).
fn ilike_contains(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Vec-backed store with the same query semantics as `PgJobStore`.
/// Backs the detector and router tests; the binary always runs against Postgres.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Vec<JobPosting>,
}

#[allow(dead_code)]
impl InMemoryJobStore {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>> {
        Ok(self.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn get_recent_jobs_by_title(
        &self,
        keywords: &[String],
        lookback_days: u32,
    ) -> Result<Vec<JobPosting>> {
        let cutoff = Utc::now() - Duration::days(i64::from(lookback_days));
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut matches: Vec<JobPosting> = self
            .jobs
            .iter()
            .filter(|j| j.discovered_at >= cutoff)
            .filter(|j| {
                let title = normalize_text(Some(&j.title));
                keywords.iter().any(|k| title.contains(k.as_str()))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.discovered_at.cmp(&a.discovered_at));
        Ok(matches)
    }
}
