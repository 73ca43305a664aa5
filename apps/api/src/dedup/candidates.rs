//! Candidate selection: narrows the comparison universe to recent postings whose
//! title shares at least one keyword with the target.
//!
//! This is a recall-oriented prefilter. A true duplicate whose title shares no
//! keyword with the target is missed; in exchange, comparison cost stays linear.

use chrono::{Duration, Utc};
use tracing::warn;

use crate::dedup::normalize::normalize_text;
use crate::dedup::store::JobStore;
use crate::dedup::DedupError;
use crate::models::job::JobPosting;

/// Articles, prepositions and conjunctions dropped from title keywords.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "for", "in", "at", "to", "of", "with", "as", "on", "by",
    "from",
];

const MIN_KEYWORD_CHARS: usize = 3;
const FALLBACK_KEYWORDS: usize = 2;

/// Keywords from a title: normalized tokens minus stopwords and tokens of two
/// characters or fewer, deduplicated in title order. When nothing survives, the
/// first two title tokens are used unfiltered.
pub fn title_keywords(title: &str) -> Vec<String> {
    let normalized = normalize_text(Some(title));
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut keywords: Vec<String> = Vec::new();
    for token in &tokens {
        if STOPWORDS.contains(token) || token.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    if keywords.is_empty() {
        keywords = tokens
            .iter()
            .take(FALLBACK_KEYWORDS)
            .map(|t| t.to_string())
            .collect();
        keywords.dedup();
    }
    keywords
}

/// Returns recent postings worth comparing against `target`, in store order.
/// Never includes the target itself or anything sharing its URL.
pub async fn select_candidates(
    store: &dyn JobStore,
    target: &JobPosting,
    lookback_days: u32,
) -> Result<Vec<JobPosting>, DedupError> {
    let keywords = title_keywords(&target.title);
    if keywords.is_empty() {
        warn!("Job {} has an empty title; no candidates selected", target.id);
        return Ok(Vec::new());
    }

    let cutoff = Utc::now() - Duration::days(i64::from(lookback_days));
    let recent = store
        .get_recent_jobs_by_title(&keywords, lookback_days)
        .await?;

    Ok(recent
        .into_iter()
        .filter(|job| job.id != target.id && job.url != target.url)
        .filter(|job| job.discovered_at >= cutoff)
        .collect())
}
