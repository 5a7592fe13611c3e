use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::AppError, services::roster::RosterService, AppState};

/// GET /roster — player identifiers in roster order
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let players = RosterService::list(state.store.as_ref(), &state.collections.roster).await?;
    Ok(Json(json!({ "players": players })))
}
