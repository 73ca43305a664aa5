// Near-duplicate detection for scraped job postings.
// Pipeline: candidate selection → per-field similarity → weighted score → tier.
// Read-only against the job store; callers decide what to do with the outcome.

pub mod candidates;
pub mod classify;
pub mod detector;
pub mod handlers;
pub mod normalize;
pub mod scoring;
pub mod similarity;
pub mod store;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::dedup::classify::TierThresholds;

pub use detector::DuplicateDetector;
pub use store::PgJobStore;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("Job {0} not found")]
    NotFound(Uuid),

    #[error("Invalid dedup configuration: {0}")]
    InvalidConfig(String),

    #[error("Job store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Scoring task failed: {0}")]
    Internal(String),
}

/// Immutable detector configuration. Validated once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DedupConfig {
    thresholds: TierThresholds,
    lookback_days: u32,
}

impl DedupConfig {
    pub fn new(
        duplicate_threshold: f64,
        analyze_threshold: f64,
        lookback_days: u32,
    ) -> Result<Self, DedupError> {
        let thresholds = TierThresholds::new(duplicate_threshold, analyze_threshold)?;
        if lookback_days == 0 {
            return Err(DedupError::InvalidConfig(
                "lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            thresholds,
            lookback_days,
        })
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = DedupConfig::default();
        assert_eq!(config.thresholds().duplicate(), 0.90);
        assert_eq!(config.thresholds().analyze(), 0.75);
        assert_eq!(config.lookback_days(), 30);
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let err = DedupConfig::new(0.9, 0.75, 0).unwrap_err();
        assert!(matches!(err, DedupError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_thresholds_propagate() {
        assert!(DedupConfig::new(0.5, 0.6, 30).is_err());
    }

    #[test]
    fn test_custom_config_accepted() {
        let config = DedupConfig::new(0.95, 0.8, 14).unwrap();
        assert_eq!(config.thresholds().duplicate(), 0.95);
        assert_eq!(config.lookback_days(), 14);
    }
}
