use serde::{Deserialize, Serialize};

use crate::dedup::similarity::{
    company_similarity, description_similarity, location_similarity, title_similarity,
};
use crate::models::job::JobPosting;

/// Relative contribution of each field to the combined similarity. Sums to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: f64,
    pub company: f64,
    pub description: f64,
    pub location: f64,
}

/// Description dominates: it carries most of what tells two roles apart.
pub const FIELD_WEIGHTS: FieldWeights = FieldWeights {
    title: 0.20,
    company: 0.10,
    description: 0.50,
    location: 0.20,
};

/// The four comparable fields of a posting, borrowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostingFields<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl<'a> From<&'a JobPosting> for PostingFields<'a> {
    fn from(job: &'a JobPosting) -> Self {
        PostingFields {
            title: Some(job.title.as_str()),
            company: job.company.as_deref(),
            description: job.description.as_deref(),
            location: job.location.as_deref(),
        }
    }
}

/// Per-field similarities behind one combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldScores {
    pub title: f64,
    pub company: f64,
    pub description: f64,
    pub location: f64,
}

impl FieldScores {
    pub fn compute(a: PostingFields<'_>, b: PostingFields<'_>) -> Self {
        FieldScores {
            title: title_similarity(a.title, b.title),
            company: company_similarity(a.company, b.company),
            description: description_similarity(a.description, b.description),
            location: location_similarity(a.location, b.location),
        }
    }

    /// 0.20*title + 0.10*company + 0.50*description + 0.20*location
    pub fn weighted(&self, weights: &FieldWeights) -> f64 {
        (weights.title * self.title
            + weights.company * self.company
            + weights.description * self.description
            + weights.location * self.location)
            .clamp(0.0, 1.0)
    }
}

/// Scores two postings and returns the combined similarity with its breakdown.
pub fn weighted_score(a: PostingFields<'_>, b: PostingFields<'_>) -> (f64, FieldScores) {
    let fields = FieldScores::compute(a, b);
    (fields.weighted(&FIELD_WEIGHTS), fields)
}
