use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Reports both backends; either one failing makes the service unhealthy.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = state.store.ping().await.map_err(|e| e.to_string());
    let sessions = state.sessions.ping().await.map_err(|e| e.to_string());

    let status = if db.is_ok() && sessions.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let describe = |r: Result<(), String>| r.map_or_else(|e| e, |_| "connected".to_string());

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "error" },
            "db": describe(db),
            "sessions": describe(sessions),
        })),
    )
}
