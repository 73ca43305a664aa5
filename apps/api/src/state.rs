use std::sync::Arc;

use sqlx::PgPool;

use crate::dedup::DuplicateDetector;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Used directly only by the readiness probe; the detector reads through its own store.
    pub db: PgPool,
    /// Immutable after startup; thresholds and lookback come from `Config`.
    pub detector: Arc<DuplicateDetector>,
}
