//! Health check handler.

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /health
///
/// Reports service liveness and database reachability. Always returns 200;
/// `db_healthy` reflects the probe result so load balancers can act on it.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = quill_db::health_check(&state.pool).await.is_ok();

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
