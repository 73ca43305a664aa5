//! Duplicate detection: fetch target → select candidates → score → classify → partition.
//!
//! # spawn_blocking pattern
//! Scoring is pure CPU work (edit distances over up to 500-char descriptions per
//! candidate). It runs inside `tokio::task::spawn_blocking` on owned data so the
//! executor stays free while a large candidate set is scored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::dedup::candidates::select_candidates;
use crate::dedup::classify::{Tier, TierThresholds};
use crate::dedup::scoring::{weighted_score, FieldScores, PostingFields};
use crate::dedup::store::JobStore;
use crate::dedup::{DedupConfig, DedupError};
use crate::models::job::JobPosting;

/// How one candidate compared against the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub candidate_id: Uuid,
    /// Weighted similarity in [0.0, 1.0].
    pub similarity: f64,
    pub tier: Tier,
    pub fields: FieldScores,
}

/// Duplicate and Analyze results for one target, in candidate-selector order.
/// Different-tier candidates are scored but not returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionOutcome {
    pub target_id: Uuid,
    pub duplicates: Vec<SimilarityResult>,
    pub analyze: Vec<SimilarityResult>,
    pub candidates_considered: usize,
}

/// Result of an ad-hoc comparison between two postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub similarity: f64,
    pub tier: Tier,
    pub fields: FieldScores,
}

/// Stateless apart from its immutable config; safe to share behind an `Arc`
/// and call concurrently, including for the same target.
pub struct DuplicateDetector {
    store: Arc<dyn JobStore>,
    config: DedupConfig,
}

impl DuplicateDetector {
    pub fn new(store: Arc<dyn JobStore>, config: DedupConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Finds postings that duplicate (or may duplicate) `job_id`.
    ///
    /// Fails with `DedupError::NotFound` if the id does not resolve. Store errors
    /// propagate unchanged; nothing is retried and no partial outcome is returned.
    pub async fn find_duplicates(&self, job_id: Uuid) -> Result<DetectionOutcome, DedupError> {
        let target = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(DedupError::NotFound(job_id))?;

        let candidates =
            select_candidates(self.store.as_ref(), &target, self.config.lookback_days()).await?;
        let candidates_considered = candidates.len();

        let thresholds = self.config.thresholds();
        let results = tokio::task::spawn_blocking(move || {
            score_candidates(&target, &candidates, thresholds)
        })
        .await
        .map_err(|e| DedupError::Internal(format!("spawn_blocking failed in scoring: {e}")))?;

        let (duplicates, analyze) = partition_results(results);

        info!(
            "Dedup for job {job_id}: {candidates_considered} candidates, {} duplicates, {} to analyze",
            duplicates.len(),
            analyze.len()
        );

        Ok(DetectionOutcome {
            target_id: job_id,
            duplicates,
            analyze,
            candidates_considered,
        })
    }

    /// Scores two postings directly, without touching the store.
    pub fn compare(&self, a: PostingFields<'_>, b: PostingFields<'_>) -> Comparison {
        let (similarity, fields) = weighted_score(a, b);
        Comparison {
            similarity,
            tier: self.config.thresholds().classify(similarity),
            fields,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Synchronous scoring (runs inside spawn_blocking)
// ────────────────────────────────────────────────────────────────────────────

fn score_candidates(
    target: &JobPosting,
    candidates: &[JobPosting],
    thresholds: TierThresholds,
) -> Vec<SimilarityResult> {
    let target_fields = PostingFields::from(target);
    candidates
        .iter()
        .map(|candidate| {
            let (similarity, fields) = weighted_score(target_fields, PostingFields::from(candidate));
            let tier = thresholds.classify(similarity);
            debug!(
                "Job {} vs {}: similarity {:.4} ({:?})",
                target.id, candidate.id, similarity, tier
            );
            SimilarityResult {
                candidate_id: candidate.id,
                similarity,
                tier,
                fields,
            }
        })
        .collect()
}

/// Splits into (Duplicate, Analyze), preserving input order and dropping Different.
fn partition_results(
    results: Vec<SimilarityResult>,
) -> (Vec<SimilarityResult>, Vec<SimilarityResult>) {
    let mut duplicates = Vec::new();
    let mut analyze = Vec::new();
    for result in results {
        match result.tier {
            Tier::Duplicate => duplicates.push(result),
            Tier::Analyze => analyze.push(result),
            Tier::Different => {}
        }
    }
    (duplicates, analyze)
}
