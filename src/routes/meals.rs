use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    middleware::{json::AppJson, session::ActiveSession},
    models::{form::SubmissionReceipt, meal::SubmitMealRequest},
    services::{meal::MealService, session::SessionService},
    AppState,
};

/// POST /meals
pub async fn submit_meal(
    State(state): State<AppState>,
    ActiveSession(mut session): ActiveSession,
    AppJson(body): AppJson<SubmitMealRequest>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError> {
    let receipt =
        MealService::submit(state.store.as_ref(), &state.collections, &mut session, body).await?;
    SessionService::remember(state.sessions.as_ref(), &session).await;
    Ok((StatusCode::CREATED, Json(receipt)))
}
