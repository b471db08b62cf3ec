use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the active storage settings.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cv-history-api",
        "storage_backend": format!("{:?}", state.config.storage_backend).to_lowercase(),
        "max_versions": state.versions.max_versions()
    }))
}
