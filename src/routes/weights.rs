use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    middleware::{json::AppJson, session::ActiveSession},
    models::{form::SubmissionReceipt, weight::SubmitWeightRequest},
    services::{session::SessionService, weight::WeightService},
    AppState,
};

/// POST /weights
pub async fn submit_weight(
    State(state): State<AppState>,
    ActiveSession(mut session): ActiveSession,
    AppJson(body): AppJson<SubmitWeightRequest>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError> {
    let receipt =
        WeightService::submit(state.store.as_ref(), &state.collections, &mut session, body).await?;
    SessionService::remember(state.sessions.as_ref(), &session).await;
    Ok((StatusCode::CREATED, Json(receipt)))
}
