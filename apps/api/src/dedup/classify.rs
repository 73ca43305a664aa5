use serde::{Deserialize, Serialize};

use crate::dedup::DedupError;

pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.90;
pub const DEFAULT_ANALYZE_THRESHOLD: f64 = 0.75;

/// Outcome of comparing a candidate against a target posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Same opportunity, cross-posted.
    Duplicate,
    /// Close enough that a caller should look before deciding.
    Analyze,
    Different,
}

/// Lower bounds (inclusive) of the Duplicate and Analyze tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierThresholds {
    duplicate: f64,
    analyze: f64,
}

impl TierThresholds {
    /// Requires `0 <= analyze <= duplicate <= 1`. Out-of-range values are rejected, not clamped.
    pub fn new(duplicate: f64, analyze: f64) -> Result<Self, DedupError> {
        if !duplicate.is_finite() || !(0.0..=1.0).contains(&duplicate) {
            return Err(DedupError::InvalidConfig(format!(
                "duplicate_threshold must be within [0, 1], got {duplicate}"
            )));
        }
        if !analyze.is_finite() || !(0.0..=1.0).contains(&analyze) {
            return Err(DedupError::InvalidConfig(format!(
                "analyze_threshold must be within [0, 1], got {analyze}"
            )));
        }
        if analyze > duplicate {
            return Err(DedupError::InvalidConfig(format!(
                "analyze_threshold ({analyze}) must not exceed duplicate_threshold ({duplicate})"
            )));
        }
        Ok(Self { duplicate, analyze })
    }

    pub fn duplicate(&self) -> f64 {
        self.duplicate
    }

    pub fn analyze(&self) -> f64 {
        self.analyze
    }

    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.duplicate {
            Tier::Duplicate
        } else if score >= self.analyze {
            Tier::Analyze
        } else {
            Tier::Different
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            duplicate: DEFAULT_DUPLICATE_THRESHOLD,
            analyze: DEFAULT_ANALYZE_THRESHOLD,
        }
    }
}
