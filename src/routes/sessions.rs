use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::{json::AppJson, session::ActiveSession},
    models::{
        meal::MealElementInput,
        session::{SelectPlayerRequest, SessionContext},
    },
    services::session::SessionService,
    AppState,
};

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionContext>), AppError> {
    let session = SessionService::start(state.sessions.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions
pub async fn get_session(ActiveSession(session): ActiveSession) -> Json<SessionContext> {
    Json(session)
}

/// DELETE /sessions
pub async fn end_session(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> Result<StatusCode, AppError> {
    SessionService::end(state.sessions.as_ref(), session.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /sessions/player
pub async fn select_player(
    State(state): State<AppState>,
    ActiveSession(mut session): ActiveSession,
    AppJson(body): AppJson<SelectPlayerRequest>,
) -> Result<Json<SessionContext>, AppError> {
    SessionService::select_player(
        state.store.as_ref(),
        &state.collections.roster,
        state.sessions.as_ref(),
        &mut session,
        body.player_id.as_deref(),
    )
    .await?;
    Ok(Json(session))
}

/// POST /sessions/meal-elements — queue one food element for the next meal
pub async fn add_meal_element(
    State(state): State<AppState>,
    ActiveSession(mut session): ActiveSession,
    AppJson(body): AppJson<MealElementInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let element =
        SessionService::add_pending_element(state.sessions.as_ref(), &mut session, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Food element added!",
            "element": element,
            "pending_elements": session.pending_elements,
        })),
    ))
}

/// DELETE /sessions/meal-elements
pub async fn clear_meal_elements(
    State(state): State<AppState>,
    ActiveSession(mut session): ActiveSession,
) -> Result<StatusCode, AppError> {
    SessionService::clear_pending_elements(state.sessions.as_ref(), &mut session).await?;
    Ok(StatusCode::NO_CONTENT)
}
