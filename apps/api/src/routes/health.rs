use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "CareerLens API is live!",
        "status": "Running"
    }))
}

/// GET /api/health
/// Returns service status, environment and version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.app_env,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
