use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns service status and version; fails with 500 when the job store database is unreachable.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.db).await?;

    let config = state.detector.config();
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "dedup-api",
        "database": "ok",
        "dedup": {
            "duplicate_threshold": config.thresholds().duplicate(),
            "analyze_threshold": config.thresholds().analyze(),
            "lookback_days": config.lookback_days()
        }
    })))
}
