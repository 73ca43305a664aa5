//! Axum route handlers for the Dedup API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::dedup::detector::{Comparison, DetectionOutcome};
use crate::dedup::scoring::PostingFields;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostingInput {
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl PostingInput {
    fn fields(&self) -> PostingFields<'_> {
        PostingFields {
            title: Some(self.title.as_str()),
            company: self.company.as_deref(),
            description: self.description.as_deref(),
            location: self.location.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub left: PostingInput,
    pub right: PostingInput,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs/:id/duplicates
pub async fn handle_find_duplicates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DetectionOutcome>, AppError> {
    let outcome = state.detector.find_duplicates(id).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/dedup/compare
///
/// Scores two postings supplied in the body; nothing is read from the store.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<Comparison>, AppError> {
    if request.left.title.trim().is_empty() || request.right.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let comparison = state
        .detector
        .compare(request.left.fields(), request.right.fields());
    Ok(Json(comparison))
}
